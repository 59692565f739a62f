use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;

use trend_lens::config::{
    ANALYSIS, ASSOCIATIONS_CSV_FILENAME, EXPORT_PATH, TRENDS_JSON_FILENAME,
};
use trend_lens::data::export::{TrendReport, write_associations_csv, write_trend_reports_json};
use trend_lens::data::providers::{
    CachedSeriesData, CreateSeriesData, DemoSeriesData, fetch_series_data,
    write_series_cache_async,
};
use trend_lens::domain::trend::TrendSpan;
use trend_lens::utils::time_utils::epoch_ms_to_date;
use trend_lens::{Cli, label_trend, scan_pairs};

fn main() -> Result<()> {
    // A. Init logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Data loading (blocking on the runtime)
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let providers: Vec<Box<dyn CreateSeriesData + Send + Sync>> = if args.prefer_demo {
        vec![Box::new(DemoSeriesData), Box::new(CachedSeriesData)]
    } else {
        vec![Box::new(CachedSeriesData), Box::new(DemoSeriesData)]
    };
    let (collection, signature) = rt.block_on(fetch_series_data(&providers))?;
    log::info!(
        "Loaded {} series ({} references, {} targets) via: {}",
        collection.series.len(),
        collection.references().len(),
        collection.targets().len(),
        signature
    );

    if let (Some(first), Some(last)) = (
        collection.series.iter().filter_map(|s| s.first_timestamp_ms()).min(),
        collection.series.iter().filter_map(|s| s.last_timestamp_ms()).max(),
    ) {
        log::info!(
            "Extract covers {} to {}",
            epoch_ms_to_date(first),
            epoch_ms_to_date(last)
        );
    }

    // D. Background cache write so the next run starts from disk
    let cache_write = if signature == "Demo generator" {
        let cache_data = collection.clone();
        Some(rt.spawn(async move {
            if let Err(e) = write_series_cache_async(cache_data).await {
                log::error!("Failed to write series cache: {:#}", e);
            }
        }))
    } else {
        None
    };

    // E. Pairwise association scan across all (reference, target) pairs
    let references = collection.references();
    let targets = collection.targets();
    let cancel = AtomicBool::new(false);
    let associations = scan_pairs(
        &references,
        &targets,
        ANALYSIS.association.normalize,
        &cancel,
    );
    log::info!(
        "Association scan produced {} records from {} x {} pairs",
        associations.len(),
        references.len(),
        targets.len()
    );

    // F. Trend labels for every target series
    let span = TrendSpan::new(ANALYSIS.trend.min_horizon, ANALYSIS.trend.max_horizon)?;
    let mut reports = Vec::with_capacity(targets.len());
    for target in &targets {
        let labels = label_trend(
            &target.values,
            span,
            ANALYSIS.trend.t_value_threshold,
            ANALYSIS.trend.slope_threshold,
        )?;
        let summary = labels.summarize();
        log::info!(
            "{}: {} long / {} short / {} neutral",
            target.id,
            summary.long,
            summary.short,
            summary.neutral
        );
        reports.push(TrendReport {
            series: target.id.name().to_string(),
            summary,
        });
    }

    // G. Export for the presentation layer
    let export_dir = PathBuf::from(EXPORT_PATH);
    write_associations_csv(&export_dir.join(ASSOCIATIONS_CSV_FILENAME), &associations)?;
    write_trend_reports_json(&export_dir.join(TRENDS_JSON_FILENAME), &reports)?;
    log::info!("Exports written to {}/", EXPORT_PATH);

    // Let the cache write finish before tearing the runtime down
    if let Some(handle) = cache_write {
        let _ = rt.block_on(handle);
    }

    Ok(())
}
