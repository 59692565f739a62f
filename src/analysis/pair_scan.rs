//! Fan-out evaluation of every (reference, target) series pair.
//!
//! Each pair is independent and side-effect-free, so the Cartesian product
//! is dispatched across the rayon worker pool (bounded to available
//! parallelism). One pair's numerical failure is logged and dropped rather
//! than aborting the batch: the scan always returns whatever succeeded.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use itertools::iproduct;
use rayon::prelude::*;

use crate::analysis::info_metrics::variation_of_information;
use crate::models::association::PairAssociation;
use crate::models::timeseries::IndicatorSeries;
use crate::utils::maths_utils::pearson_correlation;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Evaluate correlation and variation of information for every
/// (reference, target) pair.
///
/// Pairs whose timestamp inner-join is empty after dropping incomplete
/// rows are skipped silently (nothing to measure). Setting `cancel` stops
/// the scan cooperatively: pairs that have not started are discarded and
/// the partial result set is returned without error. Result order follows
/// the input product; callers needing a different order re-sort.
pub fn scan_pairs(
    references: &[&IndicatorSeries],
    targets: &[&IndicatorSeries],
    normalize: bool,
    cancel: &AtomicBool,
) -> Vec<PairAssociation> {
    let jobs: Vec<(&IndicatorSeries, &IndicatorSeries)> =
        iproduct!(references.iter().copied(), targets.iter().copied()).collect();

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pair_scan {
        log::info!(
            "Pair scan: {} references x {} targets = {} jobs",
            references.len(),
            targets.len(),
            jobs.len()
        );
    }

    let results: Vec<PairAssociation> = jobs
        .par_iter()
        .filter_map(|(reference, target)| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            match evaluate_pair(reference, target, normalize) {
                Ok(association) => association,
                Err(error) => {
                    log::warn!(
                        "Pair ({}, {}) failed and was dropped: {:#}",
                        reference.id,
                        target.id,
                        error
                    );
                    None
                }
            }
        })
        .collect();

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pair_scan {
        log::info!(
            "Pair scan finished: {} of {} pairs produced results",
            results.len(),
            jobs.len()
        );
    }

    results
}

/// One pairwise evaluation: inner-join on timestamps, drop incomplete
/// rows, then correlate and measure variation of information. `Ok(None)`
/// means the joined set was empty — skip, not an error.
fn evaluate_pair(
    reference: &IndicatorSeries,
    target: &IndicatorSeries,
    normalize: bool,
) -> Result<Option<PairAssociation>> {
    let (reference_values, target_values) = reference.align_with(target);
    if reference_values.is_empty() {
        return Ok(None);
    }

    let correlation = pearson_correlation(&reference_values, &target_values);
    let vi = variation_of_information(&reference_values, &target_values, normalize);

    Ok(Some(PairAssociation {
        reference_id: reference.id.clone(),
        target_id: target.id.clone(),
        correlation,
        variation_of_information: vi,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{IndicatorId, SeriesGroup};
    use std::collections::HashSet;

    fn series(name: &str, group: SeriesGroup, values: Vec<f64>) -> IndicatorSeries {
        let timestamps: Vec<i64> = (0..values.len() as i64).collect();
        IndicatorSeries::new(IndicatorId::new(name), group, timestamps, values)
            .expect("test series should be valid")
    }

    fn wavy(n: usize, frequency: f64) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * frequency).sin() * 2.0).collect()
    }

    #[test]
    fn test_all_nan_target_is_dropped_not_fatal() {
        let references: Vec<IndicatorSeries> = (0..3)
            .map(|i| {
                series(
                    &format!("ref_{}", i),
                    SeriesGroup::Reference,
                    wavy(50, 0.3 + i as f64 * 0.2),
                )
            })
            .collect();

        let mut targets: Vec<IndicatorSeries> = (0..3)
            .map(|i| {
                series(
                    &format!("tgt_{}", i),
                    SeriesGroup::Target,
                    wavy(50, 0.9 + i as f64 * 0.2),
                )
            })
            .collect();
        targets.push(series("tgt_nan", SeriesGroup::Target, vec![f64::NAN; 50]));

        let reference_refs: Vec<&IndicatorSeries> = references.iter().collect();
        let target_refs: Vec<&IndicatorSeries> = targets.iter().collect();

        let cancel = AtomicBool::new(false);
        let results = scan_pairs(&reference_refs, &target_refs, true, &cancel);

        // 3 references x 3 usable targets; the 3 pairs touching the
        // all-NaN target joined empty and were silently dropped
        assert_eq!(results.len(), 9);
        let keys: HashSet<_> = results.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), 9, "results must be unique per pair");
        assert!(keys.iter().all(|(_, target)| target != "tgt_nan"));
    }

    #[test]
    fn test_disjoint_timestamps_skip_pair() {
        let reference = IndicatorSeries::new(
            IndicatorId::new("ref"),
            SeriesGroup::Reference,
            vec![0, 1, 2],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        let target = IndicatorSeries::new(
            IndicatorId::new("tgt"),
            SeriesGroup::Target,
            vec![10, 11, 12],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();

        let cancel = AtomicBool::new(false);
        let results = scan_pairs(&[&reference], &[&target], true, &cancel);
        assert!(results.is_empty());
    }

    #[test]
    fn test_cancellation_stops_the_batch() {
        let reference = series("ref", SeriesGroup::Reference, wavy(50, 0.4));
        let target = series("tgt", SeriesGroup::Target, wavy(50, 1.1));

        let cancel = AtomicBool::new(true);
        let results = scan_pairs(&[&reference], &[&target], true, &cancel);
        assert!(results.is_empty());
    }

    #[test]
    fn test_identical_pair_has_zero_distance() {
        let values = wavy(100, 0.7);
        let reference = series("ref", SeriesGroup::Reference, values.clone());
        let target = series("tgt", SeriesGroup::Target, values);

        let cancel = AtomicBool::new(false);
        let results = scan_pairs(&[&reference], &[&target], true, &cancel);
        assert_eq!(results.len(), 1);
        assert!((results[0].correlation - 1.0).abs() < 1e-9);
        assert!(results[0].variation_of_information.abs() < 1e-9);
    }
}
