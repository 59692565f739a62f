// Data models for series analysis
// These modules contain pure business logic independent of I/O

pub mod association;
pub mod timeseries;
pub mod trend_labels;

// Re-export key types for convenience
pub use association::PairAssociation;
pub use timeseries::{IndicatorSeries, SeriesCollection, find_matching_series};
pub use trend_labels::{TrendLabels, TrendSummary};
