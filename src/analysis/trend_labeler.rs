//! Rolling-window trend labeling.
//!
//! For every starting index, fit a linear trend over every horizon in the
//! configured span and keep the horizon whose trend is most statistically
//! significant (largest absolute t-value) subject to a t-value gate and a
//! slope gate. The winning horizon is encoded as `±(idx + horizon)` with
//! the sign of its t-value; indices where nothing qualifies stay neutral.

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::analysis::ols::trend_t_value;
use crate::domain::trend::TrendSpan;
use crate::models::trend_labels::TrendLabels;
use crate::utils::maths_utils::sign;

/// Label every index of `close` with its most significant trend horizon.
///
/// Horizons are evaluated in ascending order and the running maximum uses a
/// non-strict comparison, so among horizons with the same absolute t-value
/// the longest one wins. That bias toward longer windows produces smoother,
/// lower-turnover labels than a plain argmax and must not be reordered.
///
/// Degenerate windows (non-finite t-value from zero variance or zero
/// degrees of freedom) are treated as no-signal: both t-value and slope
/// collapse to zero before gating. With both thresholds at zero such a
/// window evaluated last can still be recorded as the running best; the
/// label stays neutral because the sign of a zero t-value is zero. This is
/// a known quirk of the sweep, kept deliberately.
///
/// Indices too close to the end of the series for the longest horizon to
/// fit produce neutral outputs rather than an error.
pub fn label_trend(
    close: &[f64],
    span: TrendSpan,
    threshold: f64,
    slope_threshold: f64,
) -> Result<TrendLabels> {
    span.validate()?;
    if close.is_empty() {
        bail!("cannot label an empty series");
    }

    let n = close.len();
    let largest_horizon = span.largest_horizon();

    // Every index reads only its own windows of `close`, so the sweep
    // parallelizes cleanly across starting indices.
    let rows: Vec<(f64, f64, f64)> = (0..n)
        .into_par_iter()
        .map(|idx| {
            if idx + largest_horizon > n {
                // Not enough look-ahead data for the longest window
                return (0.0, 0.0, 0.0);
            }

            let mut max_abs_t = f64::NEG_INFINITY;
            let mut label = 0.0;
            let mut best_t_value = 0.0;
            let mut best_slope = 0.0;

            for horizon in span.horizons() {
                let end_idx = idx + horizon;
                let (mut t_value, mut slope) = match trend_t_value(&close[idx..end_idx]) {
                    Ok(fit) => fit,
                    // Singular window (flat prices): no signal
                    Err(_) => (0.0, 0.0),
                };
                if !t_value.is_finite() {
                    t_value = 0.0;
                    slope = 0.0;
                }

                let abs_t = t_value.abs();
                max_abs_t = max_abs_t.max(abs_t);
                if max_abs_t == abs_t && abs_t >= threshold && slope.abs() >= slope_threshold {
                    label = end_idx as f64 * sign(t_value);
                    best_t_value = t_value;
                    best_slope = slope;
                }
            }

            (label, best_t_value, best_slope)
        })
        .collect();

    let mut labels = Vec::with_capacity(n);
    let mut t_values = Vec::with_capacity(n);
    let mut slopes = Vec::with_capacity(n);
    for (label, t_value, slope) in rows {
        labels.push(label);
        t_values.push(t_value);
        slopes.push(slope);
    }

    Ok(TrendLabels {
        labels,
        t_values,
        slopes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linear series with a small alternating wiggle so residuals are
    /// nonzero (finite t-values) and roughly constant in amplitude, which
    /// makes the t-value grow with window length.
    fn noisy_line(n: usize, slope: f64, noise: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let wiggle = if i % 2 == 0 { noise } else { -noise };
                slope * i as f64 + wiggle
            })
            .collect()
    }

    #[test]
    fn test_recovers_true_slope_and_goes_long() {
        let close = noisy_line(60, 2.0, 1e-6);
        let span = TrendSpan::new(5, 10).unwrap();
        let result = label_trend(&close, span, 3.0, 0.1).unwrap();

        assert_eq!(result.len(), 60);
        // Mid-series index: the uptrend is overwhelming at every horizon,
        // so the longest window (horizon 9) wins and the label is positive
        assert_eq!(result.labels[10], (10 + 9) as f64);
        assert!(result.t_values[10] > 3.0);
        assert!((result.slopes[10] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_t_value_grows_with_horizon_on_clean_trend() {
        let close = noisy_line(200, 1.0, 1e-3);
        let (t_10, _) = trend_t_value(&close[0..10]).unwrap();
        let (t_40, _) = trend_t_value(&close[0..40]).unwrap();
        let (t_160, _) = trend_t_value(&close[0..160]).unwrap();
        assert!(
            t_10 < t_40 && t_40 < t_160,
            "t should increase with window length: {} {} {}",
            t_10,
            t_40,
            t_160
        );
    }

    #[test]
    fn test_unreachable_threshold_gates_everything() {
        let close = noisy_line(60, 2.0, 1e-3);
        let span = TrendSpan::new(5, 10).unwrap();
        let result = label_trend(&close, span, 1e9, 0.0).unwrap();

        assert!(result.labels.iter().all(|&l| l == 0.0));
        assert!(result.t_values.iter().all(|&t| t == 0.0));
        assert!(result.slopes.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_insufficient_lookahead_yields_neutral() {
        // Longest horizon is 11 but the series only has 10 points, so no
        // index can fit any window
        let close = noisy_line(10, 1.0, 1e-3);
        let span = TrendSpan::new(4, 12).unwrap();
        let result = label_trend(&close, span, 0.0, 0.0).unwrap();

        assert_eq!(result.len(), 10);
        assert!(result.labels.iter().all(|&l| l == 0.0));
    }

    #[test]
    fn test_later_horizon_wins_on_ties_or_better() {
        // At idx 0: horizon 3 fits [0, 0.2, 0.1] (weak positive trend,
        // |t| ≈ 0.58), horizon 4 adds the crash to -5.0 (strong negative
        // trend, |t| ≈ 1.68). The later-evaluated horizon meets the
        // non-strict running max and flips the label negative.
        let close = vec![0.0, 0.2, 0.1, -5.0];
        let span = TrendSpan::new(3, 5).unwrap();
        let result = label_trend(&close, span, 0.0, 0.0).unwrap();

        assert_eq!(result.labels[0], -4.0);
        assert!(result.t_values[0] < 0.0);
        assert!(result.slopes[0] < 0.0);
    }

    #[test]
    fn test_gated_short_horizon_still_loses_to_later_one() {
        // Same series, but a threshold the weak horizon-3 trend cannot
        // meet: only horizon 4 is recorded
        let close = vec![0.0, 0.2, 0.1, -5.0];
        let span = TrendSpan::new(3, 5).unwrap();
        let result = label_trend(&close, span, 1.0, 0.0).unwrap();

        assert_eq!(result.labels[0], -4.0);
    }

    #[test]
    fn test_nan_windows_degrade_to_no_signal() {
        let mut close = noisy_line(30, 1.0, 1e-3);
        close[7] = f64::NAN;
        let span = TrendSpan::new(5, 10).unwrap();
        let result = label_trend(&close, span, 0.0, 0.0).unwrap();

        // idx 0: horizons 5..7 avoid the NaN and the longest clean window
        // wins; horizons 8..9 hit it and are zeroed without dethroning it
        assert_eq!(result.labels[0], 7.0);
        // idx 3: every window [3, 8..12) covers index 7, so all horizons
        // are degenerate and the index stays neutral
        assert_eq!(result.labels[3], 0.0);
        assert_eq!(result.t_values[3], 0.0);
    }

    #[test]
    fn test_slope_gate_filters_shallow_trends() {
        let close = noisy_line(60, 0.01, 1e-5);
        let span = TrendSpan::new(5, 10).unwrap();
        // Highly significant but far too shallow for the slope gate
        let result = label_trend(&close, span, 0.0, 1.0).unwrap();
        assert!(result.labels.iter().all(|&l| l == 0.0));
    }

    #[test]
    fn test_empty_series_fails_fast() {
        let span = TrendSpan::new(3, 5).unwrap();
        assert!(label_trend(&[], span, 0.0, 0.0).is_err());
    }
}
