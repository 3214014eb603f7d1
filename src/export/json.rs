use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::io::{Read, Write};

use crate::{process::RawTable, record::CanonicalRecord};

/// Serializes a raw table as an array of `{column: value}` objects in column order.
struct RawRows<'a>(&'a RawTable);

struct RawObject<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl Serialize for RawRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for values in &self.0.rows {
            seq.serialize_element(&RawObject {
                headers: &self.0.headers,
                values,
            })?;
        }
        seq.end()
    }
}

impl Serialize for RawObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (i, h) in self.headers.iter().enumerate() {
            map.serialize_entry(h, self.values.get(i).map(String::as_str).unwrap_or(""))?;
        }
        map.end()
    }
}

pub fn write_raw_json<W: Write>(out: W, table: &RawTable) -> Result<()> {
    serde_json::to_writer_pretty(out, &RawRows(table)).context("serializing raw rows")
}

pub fn write_records_json<W: Write>(out: W, records: &[CanonicalRecord]) -> Result<()> {
    serde_json::to_writer_pretty(out, records).context("serializing records")
}

pub fn read_records_json<R: Read>(input: R) -> Result<Vec<CanonicalRecord>> {
    serde_json::from_reader(input).context("parsing records JSON")
}
