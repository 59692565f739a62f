use serde::{Deserialize, Serialize};

use crate::domain::trend::TrendDirection;

/// Output of the rolling trend labeler: three sequences the same length as
/// the input close series.
///
/// Per index, `labels` holds `±(idx + horizon)` of the winning window
/// (sign of the winning t-value) or `0.0` when no horizon passed both
/// significance gates; `t_values` and `slopes` hold the winning fit's
/// statistics, `0.0` when neutral.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TrendLabels {
    pub labels: Vec<f64>,
    pub t_values: Vec<f64>,
    pub slopes: Vec<f64>,
}

impl TrendLabels {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn direction_at(&self, idx: usize) -> TrendDirection {
        TrendDirection::from_label(self.labels[idx])
    }

    pub fn summarize(&self) -> TrendSummary {
        let mut summary = TrendSummary::default();
        for &label in &self.labels {
            match TrendDirection::from_label(label) {
                TrendDirection::Long => summary.long += 1,
                TrendDirection::Short => summary.short += 1,
                TrendDirection::Neutral => summary.neutral += 1,
            }
        }
        summary
    }
}

/// Long/short/neutral counts across one labeled series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct TrendSummary {
    pub long: usize,
    pub short: usize,
    pub neutral: usize,
}
