// src/view/mod.rs

use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing::{error, info, warn};
use url::Url;

use crate::{
    config::{Config, DedupPolicy},
    fetch, process,
    record::CanonicalRecord,
    sort::{Direction, SortKey},
    store::Store,
};

pub mod table;

/// Produces a complete, normalized record set for an update.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<CanonicalRecord>>;
}

/// Pulls the live feed with a blocking client.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: Url,
    policy: DedupPolicy,
}

impl HttpSource {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            client: fetch::blocking::client(cfg.timeout())?,
            url: cfg.endpoint_url()?,
            policy: cfg.dedup,
        })
    }
}

impl RecordSource for HttpSource {
    fn load(&self) -> Result<Vec<CanonicalRecord>> {
        let text = fetch::blocking::fetch_csv(&self.client, &self.url)?;
        process::records_from_csv(&text, self.policy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Sort(SortKey, Direction),
    Update,
    Quit,
}

/// `name`, `desc mass`, `update`, `quit`.
impl FromStr for Request {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["update" | "refresh"] => Ok(Request::Update),
            ["quit" | "exit" | "q"] => Ok(Request::Quit),
            [key] => Ok(Request::Sort(key.parse()?, Direction::Ascending)),
            ["asc", key] => Ok(Request::Sort(key.parse()?, Direction::Ascending)),
            ["desc", key] => Ok(Request::Sort(key.parse()?, Direction::Descending)),
            [] => Err(anyhow!("empty command")),
            _ => Err(anyhow!("unrecognized command {:?}", s.trim())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows {
        key: SortKey,
        dir: Direction,
        rows: Vec<CanonicalRecord>,
    },
    /// Table replaced; rows shown by name.
    Updated {
        count: usize,
        rows: Vec<CanonicalRecord>,
    },
    /// Request aborted; the stored table is unchanged.
    Failed(String),
    Closed,
}

/// Synchronous request/response front end over a [`Store`].
pub struct Explorer<S> {
    store: Option<Store>,
    source: S,
}

impl<S: RecordSource> Explorer<S> {
    pub fn new(store: Store, source: S) -> Self {
        Self {
            store: Some(store),
            source,
        }
    }

    /// Never returns an error: failures come back as `Outcome::Failed`.
    pub fn handle(&mut self, req: Request) -> Outcome {
        match req {
            Request::Sort(key, dir) => self.sort(key, dir),
            Request::Update => self.update(),
            Request::Quit => match self.store.take() {
                Some(store) => {
                    if let Err(e) = store.close() {
                        warn!(error = %e, "closing store");
                    }
                    Outcome::Closed
                }
                None => Outcome::Closed,
            },
        }
    }

    fn store(&mut self) -> Result<&mut Store> {
        self.store
            .as_mut()
            .ok_or_else(|| anyhow!("explorer is closed"))
    }

    fn sort(&mut self, key: SortKey, dir: Direction) -> Outcome {
        match self.store().and_then(|s| s.query(key, dir)) {
            Ok(rows) => Outcome::Rows { key, dir, rows },
            Err(e) => {
                error!(error = %e, %key, "query failed");
                Outcome::Failed(format!("Error loading records: {:#}", e))
            }
        }
    }

    /// Load the full set first so a failed fetch never touches the table.
    fn update(&mut self) -> Outcome {
        let records = match self.source.load() {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "update source failed");
                return Outcome::Failed(format!("Error updating the database: {:#}", e));
            }
        };
        let result = self.store().and_then(|s| {
            let count = s.replace_all(&records)?;
            let rows = s.query(SortKey::Name, Direction::Ascending)?;
            Ok((count, rows))
        });
        match result {
            Ok((count, rows)) => {
                info!(count, "database updated");
                Outcome::Updated { count, rows }
            }
            Err(e) => {
                error!(error = %e, "update write failed");
                Outcome::Failed(format!("Error updating the database: {:#}", e))
            }
        }
    }

    /// Release the store if `Quit` was never sent.
    pub fn close(mut self) -> Result<()> {
        match self.store.take() {
            Some(store) => store.close(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::time::Duration;
    use tempfile::tempdir;

    struct Fixed(Vec<CanonicalRecord>);

    impl RecordSource for Fixed {
        fn load(&self) -> Result<Vec<CanonicalRecord>> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    impl RecordSource for Offline {
        fn load(&self) -> Result<Vec<CanonicalRecord>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn planets(names: &[(&str, Option<f64>)]) -> Vec<CanonicalRecord> {
        names
            .iter()
            .map(|(n, d)| CanonicalRecord {
                name: n.to_string(),
                distance: *d,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("update".parse::<Request>().unwrap(), Request::Update);
        assert_eq!(" q ".parse::<Request>().unwrap(), Request::Quit);
        assert_eq!(
            "distance".parse::<Request>().unwrap(),
            Request::Sort(SortKey::Distance, Direction::Ascending)
        );
        assert_eq!(
            "desc star_mass".parse::<Request>().unwrap(),
            Request::Sort(SortKey::StellarMass, Direction::Descending)
        );
        assert!("".parse::<Request>().is_err());
        assert!("sideways mass".parse::<Request>().is_err());
        assert!("colour".parse::<Request>().is_err());
    }

    #[test]
    fn update_then_sort() {
        let source = Fixed(planets(&[("b", Some(5.0)), ("a", None), ("c", Some(1.0))]));
        let mut ex = Explorer::new(Store::open_in_memory().unwrap(), source);

        match ex.handle(Request::Sort(SortKey::Name, Direction::Ascending)) {
            Outcome::Rows { rows, .. } => assert!(rows.is_empty()),
            other => panic!("unexpected {:?}", other),
        }

        match ex.handle(Request::Update) {
            Outcome::Updated { count, rows } => {
                assert_eq!(count, 3);
                let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        match ex.handle(Request::Sort(SortKey::Distance, Direction::Descending)) {
            Outcome::Rows { rows, .. } => {
                let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["b", "c", "a"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(ex.handle(Request::Quit), Outcome::Closed);
        match ex.handle(Request::Sort(SortKey::Name, Direction::Ascending)) {
            Outcome::Failed(msg) => assert!(msg.starts_with("Error loading records")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failed_fetch_leaves_table_alone() -> Result<()> {
        let mut store = Store::open_in_memory()?;
        store.replace_all(&planets(&[("kept", Some(1.0))]))?;
        let mut ex = Explorer::new(store, Offline);

        match ex.handle(Request::Update) {
            Outcome::Failed(msg) => {
                assert!(msg.starts_with("Error updating the database"));
                assert!(msg.contains("connection refused"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match ex.handle(Request::Sort(SortKey::Name, Direction::Ascending)) {
            Outcome::Rows { rows, .. } => assert_eq!(rows[0].name, "kept"),
            other => panic!("unexpected {:?}", other),
        }
        ex.close()
    }

    #[test]
    fn locked_storage_surfaces_error_and_keeps_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("exo.db");
        let mut store = Store::open(&path, Duration::from_millis(50))?;
        store.replace_all(&planets(&[("old-1", Some(2.0)), ("old-2", None)]))?;

        let source = Fixed(planets(&[("new", Some(3.0))]));
        let mut ex = Explorer::new(store, source);

        let blocker = Connection::open(&path)?;
        blocker.execute_batch("BEGIN IMMEDIATE;")?;
        assert!(matches!(ex.handle(Request::Update), Outcome::Failed(_)));
        blocker.execute_batch("ROLLBACK;")?;

        match ex.handle(Request::Sort(SortKey::Name, Direction::Ascending)) {
            Outcome::Rows { rows, .. } => {
                let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["old-1", "old-2"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        // lock released: the same request now goes through
        assert!(matches!(
            ex.handle(Request::Update),
            Outcome::Updated { count: 1, .. }
        ));
        ex.close()
    }
}
