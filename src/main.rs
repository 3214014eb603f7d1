use anyhow::Result;
use clap::Parser;
use exoscraper::{config::Config, pipeline};
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Download the NASA exoplanet table and write CSV, JSON and sorted text reports"
)]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (default: ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// CSV endpoint to fetch instead of the archive's TAP query
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");
    let start = Instant::now();

    // ─── 2) configure ────────────────────────────────────────────────
    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        cfg = cfg.with_data_dir(dir);
    }
    if let Some(endpoint) = args.endpoint {
        cfg.endpoint = endpoint;
    }

    // ─── 3) fetch, process, write; nothing is written if the fetch fails ──
    let written = pipeline::run(&cfg).await?;
    for path in &written {
        info!(path = %path.display(), "written");
    }

    info!(elapsed = ?start.elapsed(), "all done");
    Ok(())
}
