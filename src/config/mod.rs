//! Configuration module for the trend-lens application.

pub mod analysis;
mod debug; // Private so files must use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub mod persistence;

pub use analysis::{ANALYSIS, AnalysisConfig};
pub use debug::DEBUG_FLAGS;
pub use persistence::{
    ASSOCIATIONS_CSV_FILENAME, EXPORT_PATH, SERIES_CACHE_ACCEPTABLE_AGE_SECONDS,
    SERIES_CACHE_PATH, SERIES_CACHE_VERSION, TRENDS_JSON_FILENAME, series_cache_filename,
};
