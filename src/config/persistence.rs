//! File persistence and serialization configuration

/// Directory path for storing the cached series extract
pub const SERIES_CACHE_PATH: &str = "series_data";

/// Base filename for the series cache (without extension)
pub const SERIES_CACHE_FILENAME_WITHOUT_EXT: &str = "indicators";

/// Current version of the series cache serialization format
pub const SERIES_CACHE_VERSION: f64 = 1.0;

/// How stale the cached extract may be before the loader refuses it
pub const SERIES_CACHE_ACCEPTABLE_AGE_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Generate the versioned cache filename, e.g. "indicators_v1.bin"
pub fn series_cache_filename() -> String {
    format!(
        "{}_v{}.bin",
        SERIES_CACHE_FILENAME_WITHOUT_EXT, SERIES_CACHE_VERSION
    )
}

// Export targets for the presentation layer
pub const EXPORT_PATH: &str = "exports";
pub const ASSOCIATIONS_CSV_FILENAME: &str = "associations.csv";
pub const TRENDS_JSON_FILENAME: &str = "trend_reports.json";
