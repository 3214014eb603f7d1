use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::io::Write;

use crate::{
    process::RawTable,
    record::{CanonicalRecord, FIELDS},
};

/// Raw rows with every source column, header first. Short rows are padded.
pub fn write_raw_csv<W: Write>(out: W, table: &RawTable) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(&table.headers)
        .context("writing CSV header")?;
    let width = table.headers.len();
    for (i, row) in table.rows.iter().enumerate() {
        let padded = row
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat("").take(width.saturating_sub(row.len())));
        wtr.write_record(padded)
            .with_context(|| format!("writing CSV row {}", i))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Canonical records, base and derived fields, in the order given.
/// The header is written even when there are no records.
pub fn write_records_csv<W: Write>(out: W, records: &[CanonicalRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    if records.is_empty() {
        wtr.write_record(FIELDS).context("writing CSV header")?;
    }
    for r in records {
        wtr.serialize(r)
            .with_context(|| format!("writing CSV record {}", r.name))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{parse_csv, records_from_csv};
    use crate::DedupPolicy;

    #[test]
    fn raw_csv_keeps_column_order_and_pads() -> Result<()> {
        let table = parse_csv("pl_name,sy_dist,pl_rade\nA,1.5,2\nB\n")?;
        let mut buf = Vec::new();
        write_raw_csv(&mut buf, &table)?;
        assert_eq!(String::from_utf8(buf)?, "pl_name,sy_dist,pl_rade\nA,1.5,2\nB,,\n");
        Ok(())
    }

    #[test]
    fn records_csv_has_full_field_set() -> Result<()> {
        let records = records_from_csv(
            "pl_name,pl_rade,disc_pubdate\nA,2.0,2011-03\nB,,\n",
            DedupPolicy::LastOccurrence,
        )?;
        let mut buf = Vec::new();
        write_records_csv(&mut buf, &records)?;
        let text = String::from_utf8(buf)?;
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(header, FIELDS);
        assert_eq!(header[0], "name");
        assert!(header.contains(&"radius_km"));
        assert!(header.contains(&"stellar_mass_earth"));

        let a: Vec<&str> = lines.next().unwrap().split(',').collect();
        let col = |h: &str| header.iter().position(|x| *x == h).unwrap();
        assert_eq!(a[col("radius")], "2.0");
        assert_eq!(a[col("radius_km")], "12742.0");
        assert_eq!(a[col("publication_date")], "2011-03");
        assert_eq!(a[col("distance")], "");

        let b: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(b[col("radius_km")], "");
        Ok(())
    }

    #[test]
    fn empty_records_csv_still_has_header() -> Result<()> {
        let mut buf = Vec::new();
        write_records_csv(&mut buf, &[])?;
        assert_eq!(String::from_utf8(buf)?, format!("{}\n", FIELDS.join(",")));
        Ok(())
    }
}
