//! Flat-file exports for the presentation layer.
//!
//! The analysis core hands over plain records; this module is the only
//! place they get formatted. Associations go out as CSV (the shape the
//! dashboard's table endpoints ingest), trend summaries as JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::association::PairAssociation;
use crate::models::trend_labels::TrendSummary;

pub fn write_associations_csv(path: &Path, records: &[PairAssociation]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).context(format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "reference,target,correlation,variation_of_information")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            record.reference_id,
            record.target_id,
            record.correlation,
            record.variation_of_information
        )?;
    }
    writer.flush().context("Failed to flush associations CSV")
}

/// One labeled series condensed for the dashboard overview.
#[derive(Serialize, Debug, Clone)]
pub struct TrendReport {
    pub series: String,
    pub summary: TrendSummary,
}

pub fn write_trend_reports_json(path: &Path, reports: &[TrendReport]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).context(format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, reports)
        .context(format!("Failed to write trend reports to {}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
