//! Series data providers, resolved in priority order.
//!
//! The binary builds a provider chain (cached extract first, demo data as
//! fallback, or the reverse with `--prefer-demo`) and takes the first one
//! that succeeds. This keeps the analysis code ignorant of where its
//! series came from.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{SERIES_CACHE_ACCEPTABLE_AGE_SECONDS, SERIES_CACHE_VERSION};
use crate::data::cache_file::CacheFile;
use crate::domain::indicator::{IndicatorId, SeriesGroup};
use crate::models::timeseries::{IndicatorSeries, SeriesCollection};
use crate::utils::TimeUtils;
use crate::utils::time_utils::how_many_seconds_ago;

#[async_trait]
pub trait CreateSeriesData {
    // Either create a series collection OR return an anyhow::error
    async fn create_series_data(&self) -> Result<SeriesCollection>;

    /// A unique identifier for this implementation (so that afterwards we
    /// know which one we used).
    fn signature(&self) -> &'static str;
}

pub async fn fetch_series_data(
    implementations: &[Box<dyn CreateSeriesData + Send + Sync>],
) -> Result<(SeriesCollection, &'static str)> {
    for imp in implementations {
        match imp.create_series_data().await {
            Ok(data) => {
                return Ok((data, imp.signature()));
            }
            Err(e) => {
                log::info!("Provider {} failed: {:#}", imp.signature(), e);
                // Continue to the next implementation
            }
        }
    }
    Err(anyhow!("All providers failed to create series data"))
}

/// Persist a freshly generated collection in the background so the next
/// run can start from disk.
pub async fn write_series_cache_async(data: SeriesCollection) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let cache = CacheFile::new(data, SERIES_CACHE_VERSION);
        cache.save_to_path(&CacheFile::default_cache_path())
    })
    .await?
}

// ============================================================================
// Provider: versioned bincode cache on local disk
// ============================================================================

pub struct CachedSeriesData;

#[async_trait]
impl CreateSeriesData for CachedSeriesData {
    async fn create_series_data(&self) -> Result<SeriesCollection> {
        let path = CacheFile::default_cache_path();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!("Checking validity of local cache at {:?}...", path);
        }

        let cache = CacheFile::load_from_path(&path)?;

        if cache.version != SERIES_CACHE_VERSION {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                cache.version,
                SERIES_CACHE_VERSION
            );
        }

        let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
        if seconds_ago > SERIES_CACHE_ACCEPTABLE_AGE_SECONDS {
            bail!(
                "Cache too old: created {} seconds ago (limit: {} seconds)",
                seconds_ago,
                SERIES_CACHE_ACCEPTABLE_AGE_SECONDS
            );
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!(
                "Cache valid: v{}, {}s old, {} series",
                cache.version,
                seconds_ago,
                cache.data.series.len()
            );
        }

        Ok(cache.data)
    }

    fn signature(&self) -> &'static str {
        "Local cache"
    }
}

// ============================================================================
// Provider: deterministic synthetic extract
// ============================================================================

/// Synthetic stand-in for the warehouse extract: a few policy-rate style
/// reference indicators and a handful of sector-aggregate targets, monthly
/// from 2010. Deterministic so downstream numbers are reproducible.
pub struct DemoSeriesData;

// 2010-01-01T00:00:00Z
const DEMO_START_MS: i64 = 1_262_304_000_000;
const DEMO_MONTHS: usize = 180;

#[async_trait]
impl CreateSeriesData for DemoSeriesData {
    async fn create_series_data(&self) -> Result<SeriesCollection> {
        let timestamps: Vec<i64> = (0..DEMO_MONTHS as i64)
            .map(|i| DEMO_START_MS + i * TimeUtils::MS_IN_30_D)
            .collect();

        let mut series = Vec::new();

        // Reference indicators: slow-moving stepped rates
        for (name, base, step_every, step_size) in [
            ("german_interest", 1.0, 24usize, 0.25),
            ("us_interest", 0.5, 18, 0.50),
            ("philippine_interest", 3.5, 30, -0.25),
        ] {
            let mut noise = Lcg::new(seed_from(name));
            let values: Vec<f64> = (0..DEMO_MONTHS)
                .map(|i| base + (i / step_every) as f64 * step_size + noise.next_signed() * 0.05)
                .collect();
            series.push(IndicatorSeries::new(
                IndicatorId::new(name),
                SeriesGroup::Reference,
                timestamps.clone(),
                values,
            )?);
        }

        // Target aggregates: trending levels with cyclical swings and a
        // patch of missing observations each
        for (idx, (name, drift, swing)) in [
            ("telecom_mean_cap", 0.8, 6.0),
            ("energy_mean_cap", 1.4, 9.0),
            ("banks_mean_cap", 0.5, 12.0),
            ("utilities_mean_cap", 0.3, 4.0),
            ("retail_mean_cap", 1.1, 7.5),
        ]
        .into_iter()
        .enumerate()
        {
            let mut noise = Lcg::new(seed_from(name));
            let gap_start = 20 + idx * 17;
            let values: Vec<f64> = (0..DEMO_MONTHS)
                .map(|i| {
                    if (gap_start..gap_start + 4).contains(&i) {
                        return f64::NAN; // reporting gap
                    }
                    100.0
                        + drift * i as f64
                        + swing * (i as f64 * 0.21).sin()
                        + noise.next_signed() * 2.0
                })
                .collect();
            series.push(IndicatorSeries::new(
                IndicatorId::new(name),
                SeriesGroup::Target,
                timestamps.clone(),
                values,
            )?);
        }

        Ok(SeriesCollection {
            name: "Synthetic demo extract".to_string(),
            version: SERIES_CACHE_VERSION,
            series,
        })
    }

    fn signature(&self) -> &'static str {
        "Demo generator"
    }
}

fn seed_from(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
        (acc ^ b as u64).wrapping_mul(0x1000_0000_01b3)
    })
}

/// Small linear congruential generator; enough randomness for demo wiggle
/// without pulling in an RNG crate.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    /// Uniform-ish value in [-1, 1].
    fn next_signed(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}
