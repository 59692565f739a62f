use std::collections::BTreeSet;

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::domain::indicator::{IndicatorId, SeriesGroup};

// ============================================================================
// IndicatorSeries: one identified numeric time series
// ============================================================================

/// A time-ordered numeric series as handed over by the query layer.
///
/// Timestamps are epoch milliseconds, strictly increasing and unique;
/// values may be NaN for missing observations. The analysis routines never
/// sort or deduplicate — ordering is validated once here, at construction.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IndicatorSeries {
    pub id: IndicatorId,
    pub group: SeriesGroup,
    pub timestamps_ms: Vec<i64>,
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    pub fn new(
        id: IndicatorId,
        group: SeriesGroup,
        timestamps_ms: Vec<i64>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if timestamps_ms.len() != values.len() {
            bail!(
                "series {}: {} timestamps vs {} values",
                id,
                timestamps_ms.len(),
                values.len()
            );
        }
        if let Some(window) = timestamps_ms.windows(2).find(|w| w[0] >= w[1]) {
            bail!(
                "series {}: timestamps not strictly increasing at {} -> {}",
                id,
                window[0],
                window[1]
            );
        }
        Ok(Self {
            id,
            group,
            timestamps_ms,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.first().copied()
    }

    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.last().copied()
    }

    /// Inner-join this series with another on shared timestamps, dropping
    /// any joined row where either value is non-finite (paired removal).
    ///
    /// Both sides carry strictly increasing timestamps, so a two-pointer
    /// merge suffices. Returns the two aligned value columns.
    pub fn align_with(&self, other: &IndicatorSeries) -> (Vec<f64>, Vec<f64>) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        let mut i = 0;
        let mut j = 0;
        while i < self.timestamps_ms.len() && j < other.timestamps_ms.len() {
            let ts_a = self.timestamps_ms[i];
            let ts_b = other.timestamps_ms[j];
            if ts_a == ts_b {
                let va = self.values[i];
                let vb = other.values[j];
                if va.is_finite() && vb.is_finite() {
                    left.push(va);
                    right.push(vb);
                }
                i += 1;
                j += 1;
            } else if ts_a < ts_b {
                i += 1;
            } else {
                j += 1;
            }
        }

        (left, right)
    }
}

pub fn find_matching_series<'a>(
    series_data: &'a [IndicatorSeries],
    name: &str,
) -> Result<&'a IndicatorSeries> {
    series_data
        .iter()
        .find(|series| series.id.name() == name)
        .ok_or_else(|| anyhow!("No series found with name {}", name))
}

// ============================================================================
// SeriesCollection: the unit of cache persistence
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SeriesCollection {
    pub name: String, // Metadata e.g. "Warehouse extract 2010-2024"
    pub version: f64,
    pub series: Vec<IndicatorSeries>,
}

impl SeriesCollection {
    pub fn references(&self) -> Vec<&IndicatorSeries> {
        self.series
            .iter()
            .filter(|s| s.group == SeriesGroup::Reference)
            .collect()
    }

    pub fn targets(&self) -> Vec<&IndicatorSeries> {
        self.series
            .iter()
            .filter(|s| s.group == SeriesGroup::Target)
            .collect()
    }

    pub fn unique_series_names(&self) -> Vec<String> {
        // BTreeSet maintains sorted order and ensures uniqueness
        self.series
            .iter()
            .map(|s| s.id.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
