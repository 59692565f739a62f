//! Histogram-based information metrics: entropy, mutual information, and
//! the variation-of-information distance.
//!
//! All entropies and mutual information are measured in nats (natural
//! logarithm) — a VI value is only comparable to others computed with the
//! same base.

use crate::analysis::binning::optimal_bins;
use crate::utils::maths_utils::{get_min_max, pearson_correlation};

/// Shannon entropy (nats) of a histogram's counts. Counts are normalized
/// to probabilities internally; empty cells contribute nothing.
pub fn entropy(counts: &[f64]) -> f64 {
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mut h = 0.0;
    for &count in counts {
        if count > 0.0 {
            let p = count / total;
            h -= p * p.ln();
        }
    }
    h
}

/// Mutual information (nats) from a `bins × bins` joint contingency table
/// stored row-major. Tiny negative totals from floating-point cancellation
/// are clipped to zero.
pub fn mutual_information(joint: &[f64], bins: usize) -> f64 {
    debug_assert_eq!(joint.len(), bins * bins);

    let total: f64 = joint.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut row_sums = vec![0.0; bins];
    let mut col_sums = vec![0.0; bins];
    for i in 0..bins {
        for j in 0..bins {
            let count = joint[i * bins + j];
            row_sums[i] += count;
            col_sums[j] += count;
        }
    }

    let mut mi = 0.0;
    for i in 0..bins {
        for j in 0..bins {
            let count = joint[i * bins + j];
            if count > 0.0 {
                let p_joint = count / total;
                let p_row = row_sums[i] / total;
                let p_col = col_sums[j] / total;
                mi += p_joint * (p_joint / (p_row * p_col)).ln();
            }
        }
    }

    mi.max(0.0)
}

/// Histogram bounds for one axis. A zero-width range (constant series) is
/// widened by ±0.5 so every sample still lands in a bin.
fn bounded_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = get_min_max(values);
    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// Which of `bins` equal-width buckets over `range` a value falls in.
/// Clamping handles the maximum value landing on the final edge.
fn bin_index(value: f64, range: (f64, f64), bins: usize) -> usize {
    let (min, max) = range;
    let position = (value - min) / (max - min) * bins as f64;
    (position as usize).min(bins - 1)
}

pub fn histogram(values: &[f64], bins: usize, range: (f64, f64)) -> Vec<f64> {
    let mut counts = vec![0.0; bins];
    for &value in values {
        counts[bin_index(value, range, bins)] += 1.0;
    }
    counts
}

pub fn histogram_2d(
    x: &[f64],
    y: &[f64],
    bins: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Vec<f64> {
    let mut counts = vec![0.0; bins * bins];
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let row = bin_index(xi, x_range, bins);
        let col = bin_index(yi, y_range, bins);
        counts[row * bins + col] += 1.0;
    }
    counts
}

/// Variation of information between two aligned series, discretized at the
/// entropy-optimal bin count: `V = H(x) + H(y) - 2·I(x, y)`.
///
/// Rows where either side is non-finite are dropped in pairs first. If
/// nothing usable remains the sentinel `1.0` is returned — "no shared
/// information", not a computed metric. With `normalize` the distance is
/// divided by the joint entropy `H(x, y)`, landing in `[0, 1]` up to
/// discretization noise; two constant series have zero joint entropy and
/// zero distance, so the normalized result is 0.
pub fn variation_of_information(x: &[f64], y: &[f64], normalize: bool) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "input series must be aligned");

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();

    if xs.is_empty() {
        return 1.0;
    }

    let corr = pearson_correlation(&xs, &ys);
    let bins = optimal_bins(xs.len(), Some(corr));

    let x_range = bounded_range(&xs);
    let y_range = bounded_range(&ys);

    let joint = histogram_2d(&xs, &ys, bins, x_range, y_range);
    let i_xy = mutual_information(&joint, bins);
    let h_x = entropy(&histogram(&xs, bins, x_range));
    let h_y = entropy(&histogram(&ys, bins, y_range));

    let mut v = h_x + h_y - 2.0 * i_xy;
    if normalize {
        let h_xy = h_x + h_y - i_xy; // joint entropy
        if h_xy > 0.0 {
            v /= h_xy;
        } else {
            v = 0.0;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wavy(n: usize, frequency: f64, drift: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (i as f64 * frequency).sin() * 3.0 + i as f64 * drift)
            .collect()
    }

    #[test]
    fn test_entropy_of_uniform_counts() {
        let h = entropy(&[5.0, 5.0, 5.0, 5.0]);
        assert!((h - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_of_single_cell_is_zero() {
        assert_eq!(entropy(&[10.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_mutual_information_of_diagonal_table_equals_entropy() {
        // Perfectly dependent variables: the joint table is diagonal and
        // mutual information equals the marginal entropy
        let joint = vec![3.0, 0.0, 0.0, 7.0];
        let mi = mutual_information(&joint, 2);
        assert!((mi - entropy(&[3.0, 7.0])).abs() < 1e-12);
    }

    #[test]
    fn test_vi_is_symmetric() {
        let x = wavy(120, 0.7, 0.05);
        let y = wavy(120, 1.3, -0.02);
        let forward = variation_of_information(&x, &y, true);
        let backward = variation_of_information(&y, &x, true);
        assert!(
            (forward - backward).abs() < 1e-9,
            "VI not symmetric: {} vs {}",
            forward,
            backward
        );
    }

    #[test]
    fn test_vi_self_distance_is_zero() {
        let x = wavy(100, 0.7, 0.05);
        let v = variation_of_information(&x, &x, true);
        assert!(v.abs() < 1e-9, "self distance should be 0, got {}", v);
    }

    #[test]
    fn test_vi_empty_input_returns_sentinel() {
        assert_eq!(variation_of_information(&[], &[], true), 1.0);
        assert_eq!(variation_of_information(&[], &[], false), 1.0);
    }

    #[test]
    fn test_vi_fully_nan_input_returns_sentinel() {
        let x = vec![f64::NAN; 20];
        let y = wavy(20, 0.7, 0.0);
        assert_eq!(variation_of_information(&x, &y, true), 1.0);
    }

    #[test]
    fn test_vi_constant_against_varying_is_maximal() {
        // A constant series shares no information with anything: V = H(y)
        // and the normalization divides by exactly H(y)
        let x = vec![2.5; 80];
        let y = wavy(80, 0.9, 0.1);
        let v = variation_of_information(&x, &y, true);
        assert!((v - 1.0).abs() < 1e-12, "got {}", v);
    }

    #[test]
    fn test_vi_normalized_stays_near_unit_interval() {
        let x = wavy(200, 0.31, 0.02);
        let y = wavy(200, 2.17, -0.04);
        let v = variation_of_information(&x, &y, true);
        // Discretization noise may push slightly past 1, but not far
        assert!(v > 0.0 && v < 1.05, "got {}", v);
    }
}
