//! explorer.rs: browse the stored exoplanet table from the terminal.
//!
//! Type a sort key (`name`, `distance`, `size`, `mass`, `insolation`,
//! `orbital_period`, `discovery_year`, `publication_date`, `star_mass`),
//! optionally prefixed with `desc`; `update` re-downloads the feed and
//! replaces the table; `quit` exits.

use anyhow::Result;
use clap::Parser;
use exoscraper::{
    config::Config,
    sort::{Direction, SortKey},
    store::Store,
    view::{table::build_table, Explorer, HttpSource, Outcome, Request},
};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "explorer", about = "Exoplanet Explorer")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database (default: ./data/exoplanets.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

const HELP: &str = "commands: <key> | desc <key> | update | quit\n\
keys: name distance size mass insolation orbital_period discovery_year publication_date star_mass";

fn show(outcome: &Outcome) {
    match outcome {
        Outcome::Rows { key, dir, rows } => {
            build_table(rows).printstd();
            println!("{} planets by {} ({:?})", rows.len(), key, dir);
        }
        Outcome::Updated { count, rows } => {
            build_table(rows).printstd();
            println!("Update complete: exoplanet database updated successfully ({} planets).", count);
        }
        Outcome::Failed(msg) => println!("{}", msg),
        Outcome::Closed => {}
    }
}

fn main() -> Result<()> {
    // stdout carries the table, logs go to stderr
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(db) = args.db {
        cfg.db_path = db;
    }

    let store = Store::open(&cfg.db_path, cfg.busy_timeout())?;
    let source = HttpSource::new(&cfg)?;
    let mut explorer = Explorer::new(store, source);
    info!(db = %cfg.db_path.display(), "explorer ready");

    println!("Exoplanet Explorer\n{}", HELP);
    show(&explorer.handle(Request::Sort(SortKey::Name, Direction::Ascending)));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Request>() {
            Ok(req) => {
                let outcome = explorer.handle(req);
                show(&outcome);
                if outcome == Outcome::Closed {
                    return Ok(());
                }
            }
            Err(e) => println!("{}\n{}", e, HELP),
        }
    }

    // end of input without `quit`
    explorer.close()
}
