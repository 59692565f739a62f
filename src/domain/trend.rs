use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Half-open range `[min_horizon, max_horizon)` of lookback window lengths
/// tried at every index by the trend labeler.
///
/// A linear fit needs at least two points, so `min_horizon >= 2`; the upper
/// bound is exclusive, matching how the horizon loop iterates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSpan {
    pub min_horizon: usize,
    pub max_horizon: usize,
}

impl TrendSpan {
    pub fn new(min_horizon: usize, max_horizon: usize) -> Result<Self> {
        let span = Self {
            min_horizon,
            max_horizon,
        };
        span.validate()?;
        Ok(span)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_horizon < 2 {
            bail!(
                "min_horizon must be at least 2 (got {}): a linear fit needs two points",
                self.min_horizon
            );
        }
        if self.max_horizon <= self.min_horizon {
            bail!(
                "horizon span is empty: [{}, {})",
                self.min_horizon,
                self.max_horizon
            );
        }
        Ok(())
    }

    /// Ascending iteration order is load-bearing: the labeler's tie-break
    /// rule prefers the later-evaluated (longer) horizon.
    pub fn horizons(&self) -> std::ops::Range<usize> {
        self.min_horizon..self.max_horizon
    }

    /// The longest window length actually tried (upper bound is exclusive).
    pub fn largest_horizon(&self) -> usize {
        self.max_horizon - 1
    }
}

/// Directional classification of one trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TrendDirection {
    Long,
    Short,
    Neutral,
}

impl TrendDirection {
    /// Labels carry the winning end index with the sign of the t-value;
    /// zero means no horizon passed the significance gates.
    pub fn from_label(label: f64) -> Self {
        if label > 0.0 {
            TrendDirection::Long
        } else if label < 0.0 {
            TrendDirection::Short
        } else {
            TrendDirection::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_rejects_short_fit_window() {
        assert!(TrendSpan::new(1, 10).is_err());
        assert!(TrendSpan::new(0, 10).is_err());
        assert!(TrendSpan::new(2, 10).is_ok());
    }

    #[test]
    fn test_span_rejects_empty_range() {
        assert!(TrendSpan::new(5, 5).is_err());
        assert!(TrendSpan::new(5, 4).is_err());
    }

    #[test]
    fn test_direction_from_label() {
        assert_eq!(TrendDirection::from_label(12.0), TrendDirection::Long);
        assert_eq!(TrendDirection::from_label(-7.0), TrendDirection::Short);
        assert_eq!(TrendDirection::from_label(0.0), TrendDirection::Neutral);
    }
}
