//! Entropy-optimal histogram bin counts (Hacine-Gharbi/Ravier closed forms).

use crate::utils::maths_utils::sign;

/// Hard bounds on the histogram resolution. The upper clamp keeps the 2-D
/// contingency tables computationally bounded and is part of the contract,
/// not a tuning knob.
pub const MIN_BINS: usize = 2;
pub const MAX_BINS: usize = 2056;

/// Optimal number of bins for discretizing `n_obs` samples.
///
/// Univariate (`corr` is None) uses the cube-root closed form; bivariate
/// uses the correlation-adjusted form with a shared bin count for both
/// axes. A correlation of exactly ±1 is nudged toward zero by 1e-5 to keep
/// the denominator alive; any non-finite intermediate (including a NaN
/// correlation from degenerate inputs) falls back to the minimum of 2.
pub fn optimal_bins(n_obs: usize, corr: Option<f64>) -> usize {
    let n = n_obs as f64;
    match corr {
        None => {
            let z = (8.0 + 324.0 * n + 12.0 * (36.0 * n + 729.0 * n * n).sqrt()).cbrt();
            let b = (z / 6.0 + 2.0 / (3.0 * z) + 1.0 / 3.0).round();
            clamp_bins(b)
        }
        Some(mut corr) => {
            if (1.0 - corr * corr) == 0.0 {
                // Perfect correlation: back off just enough to divide
                corr = sign(corr) * (corr.abs() - 1e-5);
            }
            let b = std::f64::consts::FRAC_1_SQRT_2
                * (1.0 + (1.0 + 24.0 * n / (1.0 - corr * corr)).sqrt()).sqrt();
            if !b.is_finite() {
                return MIN_BINS;
            }
            clamp_bins(b.round())
        }
    }
}

fn clamp_bins(b: f64) -> usize {
    if b <= MIN_BINS as f64 {
        MIN_BINS
    } else if b >= MAX_BINS as f64 {
        MAX_BINS
    } else {
        b as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_univariate_known_value() {
        // n = 100: z ≈ 40.17, b ≈ 7.04 -> 7
        assert_eq!(optimal_bins(100, None), 7);
    }

    #[test]
    fn test_bivariate_known_value() {
        // n = 100, corr = 0: sqrt(1 + 24·100) = 49 exactly, so
        // b = sqrt(50)/sqrt(2) = 5
        assert_eq!(optimal_bins(100, Some(0.0)), 5);
    }

    #[test]
    fn test_bounds_hold_across_inputs() {
        for &n in &[1usize, 10, 1_000, 100_000, 10_000_000] {
            for &corr in &[-0.99, -0.5, 0.0, 0.5, 0.99] {
                let bins = optimal_bins(n, Some(corr));
                assert!((MIN_BINS..=MAX_BINS).contains(&bins), "n={} corr={}", n, corr);
            }
            let bins = optimal_bins(n, None);
            assert!((MIN_BINS..=MAX_BINS).contains(&bins), "n={} univariate", n);
        }
    }

    #[test]
    fn test_perfect_correlation_does_not_blow_up() {
        for &corr in &[1.0, -1.0] {
            let bins = optimal_bins(500, Some(corr));
            assert!((MIN_BINS..=MAX_BINS).contains(&bins), "corr={}", corr);
        }
    }

    #[test]
    fn test_nan_correlation_falls_back_to_minimum() {
        assert_eq!(optimal_bins(50, Some(f64::NAN)), MIN_BINS);
    }

    #[test]
    fn test_tiny_sample_still_at_least_two() {
        assert_eq!(optimal_bins(1, None), 2);
        assert_eq!(optimal_bins(1, Some(0.5)), 2);
    }
}
