// src/process/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{config::DedupPolicy, record::CanonicalRecord};

pub mod dedup;
pub mod normalize;
pub mod units;
pub mod utils;

/// NASA `ps` column names read by the normalizer.
pub mod columns {
    pub const NAME: &str = "pl_name";
    pub const DISCOVERY_YEAR: &str = "disc_year";
    pub const PUBLICATION_DATE: &str = "disc_pubdate";
    pub const DISTANCE: &str = "sy_dist";
    pub const DISCOVERY_METHOD: &str = "discoverymethod";
    pub const ORBITAL_PERIOD: &str = "pl_orbper";
    pub const SEMI_MAJOR_AXIS: &str = "pl_orbsmax";
    pub const RADIUS: &str = "pl_rade";
    pub const MASS: &str = "pl_masse";
    pub const EQUILIBRIUM_TEMPERATURE: &str = "pl_eqt";
    pub const INSOLATION: &str = "pl_insol";
    pub const STELLAR_TEMPERATURE: &str = "st_teff";
    pub const STELLAR_MASS: &str = "st_mass";
    pub const STELLAR_RADIUS: &str = "st_rad";
}

/// Rows exactly as parsed from the feed, with the feed's column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// One entry per data row; a short row simply lacks its trailing fields.
    pub rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            rows,
            index,
        }
    }

    /// Same columns, different rows.
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
            index: self.index.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<RawRow<'_>> {
        self.rows.get(i).map(|values| RawRow {
            table: self,
            values,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(move |values| RawRow {
            table: self,
            values,
        })
    }
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    table: &'a RawTable,
    values: &'a [String],
}

impl<'a> RawRow<'a> {
    /// `None` when the column is unknown or the row is too short.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        let i = *self.table.index.get(field)?;
        self.values.get(i).map(String::as_str)
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// Trimmed planet name; `None` if missing or blank.
    pub fn name(&self) -> Option<&'a str> {
        self.get(columns::NAME)
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Parse CSV text (header row first) into a `RawTable`.
#[tracing::instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_csv(text: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(utils::clean_str)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
    Ok(RawTable::new(headers, rows))
}

/// Output of the dedup + normalize stages.
#[derive(Debug, Clone)]
pub struct Processed {
    /// Surviving raw rows, every source column kept.
    pub deduped: RawTable,
    /// Canonical records in the same order as `deduped`.
    pub records: Vec<CanonicalRecord>,
}

/// Deduplicate then normalize every surviving row.
pub fn process_table(table: &RawTable, policy: DedupPolicy) -> Processed {
    let deduped = dedup::dedup(table, policy);
    let records = normalize::normalize_all(&deduped);
    info!(
        raw = table.len(),
        unique = records.len(),
        ?policy,
        "normalized records"
    );
    Processed { deduped, records }
}

/// CSV text straight to canonical records.
pub fn records_from_csv(text: &str, policy: DedupPolicy) -> Result<Vec<CanonicalRecord>> {
    let table = parse_csv(text)?;
    Ok(process_table(&table, policy).records)
}
