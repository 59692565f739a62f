// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{label_trend, optimal_bins, scan_pairs, variation_of_information};
pub use data::{CacheFile, DemoSeriesData, fetch_series_data};
pub use domain::{IndicatorId, SeriesGroup, TrendDirection, TrendSpan};
pub use models::{IndicatorSeries, PairAssociation, SeriesCollection, TrendLabels};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use generated demo data as the primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_demo: bool,
}
