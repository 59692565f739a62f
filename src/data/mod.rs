// Data loading, caching, and exporting
pub mod cache_file;
pub mod export;
pub mod providers;

// Re-export commonly used types
pub use cache_file::CacheFile;
pub use providers::{
    CachedSeriesData, CreateSeriesData, DemoSeriesData, fetch_series_data,
    write_series_cache_async,
};
