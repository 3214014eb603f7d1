//! SQLite persistence for the canonical record set.
//!
//! The table is rebuilt wholesale by [`Store::replace_all`]; there is no
//! partial update and no schema migration.

use anyhow::{Context, Result};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row, TransactionBehavior};
use std::{fs, path::Path, time::Duration};
use tracing::{debug, info, instrument};

use crate::{
    record::{CanonicalRecord, PublicationDate, FIELDS},
    sort::{Direction, SortKey},
};

pub const TABLE: &str = "planetary_systems";

/// Column order shared by the schema, inserts and selects.
const COLUMNS: [&str; 23] = FIELDS;

fn schema_sql() -> String {
    let cols = COLUMNS
        .iter()
        .map(|c| {
            let ty = match *c {
                "name" => "TEXT NOT NULL UNIQUE",
                "discovery_year" => "INTEGER",
                "publication_date" | "discovery_method" => "TEXT",
                _ => "REAL",
            };
            format!("    {} {}", c, ty)
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "DROP TABLE IF EXISTS {t};\n\
         CREATE TABLE {t} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n{cols}\n);",
        t = TABLE,
        cols = cols
    )
}

fn insert_sql() -> String {
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE,
        COLUMNS.join(", "),
        placeholders
    )
}

fn select_sql(key: SortKey, dir: Direction) -> String {
    let col = key.column();
    format!(
        "SELECT {cols} FROM {t} ORDER BY {col} IS NULL, {col} {dir}, id",
        cols = COLUMNS.join(", "),
        t = TABLE,
        col = col,
        dir = dir.sql()
    )
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<CanonicalRecord> {
    let publication = row
        .get::<_, Option<String>>(2)?
        .map(|s| {
            s.parse::<PublicationDate>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))
        })
        .transpose()?;
    Ok(CanonicalRecord {
        name: row.get(0)?,
        discovery_year: row.get(1)?,
        publication_date: publication,
        discovery_method: row.get(3)?,
        distance: row.get(4)?,
        distance_au: row.get(5)?,
        distance_ly: row.get(6)?,
        distance_km: row.get(7)?,
        radius: row.get(8)?,
        radius_km: row.get(9)?,
        orbital_period: row.get(10)?,
        orbital_period_years: row.get(11)?,
        semi_major_axis: row.get(12)?,
        mass: row.get(13)?,
        mass_kg: row.get(14)?,
        equilibrium_temperature: row.get(15)?,
        insolation: row.get(16)?,
        insolation_wm2: row.get(17)?,
        stellar_mass: row.get(18)?,
        stellar_mass_kg: row.get(19)?,
        stellar_mass_earth: row.get(20)?,
        stellar_temperature: row.get(21)?,
        stellar_radius: row.get(22)?,
    })
}

/// One open database file holding the `planetary_systems` table.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path`.
    ///
    /// `busy_timeout` bounds how long a write waits on another process's lock.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        conn.busy_timeout(busy_timeout)
            .context("setting busy timeout")?;
        debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory database")?;
        Ok(Self { conn })
    }

    /// Drop, recreate and fill the table in one transaction.
    ///
    /// On error nothing is committed and the previous rows remain.
    #[instrument(level = "info", skip_all, fields(records = records.len()))]
    pub fn replace_all(&mut self, records: &[CanonicalRecord]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("starting write transaction (database busy?)")?;
        tx.execute_batch(&schema_sql())
            .context("recreating table")?;
        {
            let mut stmt = tx.prepare(&insert_sql()).context("preparing insert")?;
            for r in records {
                let publication = r.publication_date.map(|d| d.to_string());
                stmt.execute(params![
                    r.name,
                    r.discovery_year,
                    publication,
                    r.discovery_method,
                    r.distance,
                    r.distance_au,
                    r.distance_ly,
                    r.distance_km,
                    r.radius,
                    r.radius_km,
                    r.orbital_period,
                    r.orbital_period_years,
                    r.semi_major_axis,
                    r.mass,
                    r.mass_kg,
                    r.equilibrium_temperature,
                    r.insolation,
                    r.insolation_wm2,
                    r.stellar_mass,
                    r.stellar_mass_kg,
                    r.stellar_mass_earth,
                    r.stellar_temperature,
                    r.stellar_radius,
                ])
                .with_context(|| format!("inserting {}", r.name))?;
            }
        }
        tx.commit().context("committing replacement")?;
        info!(rows = records.len(), "table replaced");
        Ok(records.len())
    }

    fn table_exists(&self) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [TABLE],
                |r| r.get(0),
            )
            .optional()
            .context("checking for table")?;
        Ok(found.is_some())
    }

    /// All rows ordered by `key`, absent values last, ties in insertion order.
    /// Empty before the first `replace_all`.
    pub fn query(&self, key: SortKey, dir: Direction) -> Result<Vec<CanonicalRecord>> {
        if !self.table_exists()? {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare(&select_sql(key, dir))
            .context("preparing select")?;
        let rows = stmt
            .query_map([], from_row)
            .context("querying records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("reading records")?;
        debug!(rows = rows.len(), %key, ?dir, "queried");
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize> {
        if !self.table_exists()? {
            return Ok(0);
        }
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE), [], |r| r.get(0))
            .context("counting records")?;
        Ok(n as usize)
    }

    /// Release the connection, reporting any error from SQLite.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("closing database")?;
        debug!("store closed");
        Ok(())
    }
}
