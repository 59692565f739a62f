use serde::{Deserialize, Serialize};

use crate::domain::indicator::IndicatorId;

/// One pairwise association result from the fan-out scan.
///
/// `variation_of_information` is the sentinel `1.0` when the joined pair
/// had no usable rows; when normalization was requested it otherwise lies
/// in `[0, 1]`, with mild overshoot above 1 possible from histogram
/// discretization noise (estimation error, not a bug).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PairAssociation {
    pub reference_id: IndicatorId,
    pub target_id: IndicatorId,
    pub correlation: f64,
    pub variation_of_information: f64,
}

impl PairAssociation {
    /// Identity key for the unordered result set.
    pub fn key(&self) -> (String, String) {
        (
            self.reference_id.name().to_string(),
            self.target_id.name().to_string(),
        )
    }
}
