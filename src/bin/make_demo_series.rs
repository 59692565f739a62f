// Regenerate the demo series cache on disk, so the main binary can start
// from a valid local cache without network or warehouse access.

use anyhow::Result;
use trend_lens::config::SERIES_CACHE_VERSION;
use trend_lens::data::cache_file::CacheFile;
use trend_lens::data::providers::{CreateSeriesData, DemoSeriesData};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let collection = DemoSeriesData.create_series_data().await?;
    log::info!(
        "Generated {} demo series: {:?}",
        collection.series.len(),
        collection.unique_series_names()
    );

    let cache = CacheFile::new(collection, SERIES_CACHE_VERSION);
    let path = CacheFile::default_cache_path();
    cache.save_to_path(&path)?;
    log::info!("Demo cache written to {:?}", path);

    Ok(())
}
