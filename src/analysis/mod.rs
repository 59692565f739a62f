// Analysis algorithms: trend labeling and pairwise association
pub mod binning;
pub mod info_metrics;
pub mod ols;
pub mod pair_scan;
pub mod trend_labeler;

// Re-export commonly used entry points
pub use binning::optimal_bins;
pub use info_metrics::variation_of_information;
pub use ols::{OlsFit, ols_regression, trend_t_value};
pub use pair_scan::scan_pairs;
pub use trend_labeler::label_trend;
