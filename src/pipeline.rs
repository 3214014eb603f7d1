// src/pipeline.rs

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::{info, instrument};

use crate::{config::Config, export, fetch, process};

/// Fetch, process and write every export.
///
/// The download completes before the data directory is touched, so a failed
/// fetch leaves no output behind.
#[instrument(level = "info", skip_all, fields(endpoint = %cfg.endpoint))]
pub async fn run(cfg: &Config) -> Result<Vec<PathBuf>> {
    cfg.validate()?;
    let url = cfg.endpoint_url()?;

    let start = Instant::now();
    let client = fetch::client(cfg)?;
    let text = fetch::fetch_csv(&client, &url)
        .await
        .context("fetching exoplanet table")?;
    info!(elapsed = ?start.elapsed(), "download complete");

    let raw = process::parse_csv(&text)?;
    let processed = process::process_table(&raw, cfg.dedup);

    let written = export::write_all(&cfg.data_dir, &text, &raw, &processed)?;
    info!(files = written.len(), elapsed = ?start.elapsed(), "exports written");
    Ok(written)
}
