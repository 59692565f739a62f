//! Analysis and computation configuration

/// Settings for the rolling trend labeler
#[derive(Debug, Clone)]
pub struct TrendSettings {
    // Half-open horizon span tried at every index
    pub min_horizon: usize,
    pub max_horizon: usize,
    // Minimum absolute t-value for a horizon to qualify
    pub t_value_threshold: f64,
    // Minimum absolute slope for a horizon to qualify
    pub slope_threshold: f64,
}

/// Settings for the pairwise association scan
#[derive(Debug, Clone)]
pub struct AssociationSettings {
    // Normalize variation of information by the joint entropy so distances
    // land in [0, 1] and are comparable across pairs
    pub normalize: bool,
}

/// The master analysis configuration. The core functions take all of this
/// as explicit per-call parameters; these are the defaults the binaries
/// pass in.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub trend: TrendSettings,
    pub association: AssociationSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    trend: TrendSettings {
        min_horizon: 5,
        max_horizon: 20,
        // ~2 sigma: a trend must be clearly distinguishable from noise
        t_value_threshold: 2.0,
        slope_threshold: 0.0,
    },
    association: AssociationSettings { normalize: true },
};
