use anyhow::{Context, Result};
use clap::Parser;
use exoscraper::{config::Config, fetch, process, store::Store};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch the feed and replace the SQLite table without opening the explorer.
#[derive(Parser)]
#[command(name = "load_db")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database (default: ./data/exoplanets.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(db) = args.db {
        cfg.db_path = db;
    }

    info!("Downloading latest exoplanet data...");
    let client = fetch::blocking::client(cfg.timeout())?;
    let text = fetch::blocking::fetch_csv(&client, &cfg.endpoint_url()?)
        .context("fetching exoplanet table")?;
    let records = process::records_from_csv(&text, cfg.dedup)?;

    let mut store = Store::open(&cfg.db_path, cfg.busy_timeout())?;
    let n = store.replace_all(&records)?;
    store.close()?;
    info!(rows = n, db = %cfg.db_path.display(), "Data loaded successfully.");
    Ok(())
}
