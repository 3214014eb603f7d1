use std::collections::HashMap;
use tracing::debug;

use super::{columns, utils, RawRow, RawTable};
use crate::config::DedupPolicy;

/// Keep one row per trimmed planet name.
///
/// The winner replaces the earlier row wholesale and takes the slot where
/// the name first appeared. Rows without a name are dropped.
pub fn dedup(table: &RawTable, policy: DedupPolicy) -> RawTable {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut kept: Vec<RawRow<'_>> = Vec::new();
    let mut dropped = 0usize;

    for row in table.iter() {
        let Some(name) = row.name() else {
            dropped += 1;
            continue;
        };
        match slots.get(name).copied() {
            Some(slot) => {
                if replaces(&kept[slot], &row, policy) {
                    kept[slot] = row;
                }
            }
            None => {
                slots.insert(name, kept.len());
                kept.push(row);
            }
        }
    }

    debug!(
        input = table.len(),
        output = kept.len(),
        nameless = dropped,
        "deduplicated"
    );
    table.with_rows(kept.into_iter().map(|r| r.values().to_vec()).collect())
}

fn replaces(current: &RawRow<'_>, candidate: &RawRow<'_>, policy: DedupPolicy) -> bool {
    match policy {
        DedupPolicy::LastOccurrence => true,
        DedupPolicy::LatestPublication => {
            let date = |r: &RawRow<'_>| utils::parse_publication_date(r.get(columns::PUBLICATION_DATE));
            // None sorts below any date, equal dates fall through to the later row.
            date(candidate) >= date(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::normalize::normalize_all;

    fn table(rows: &[(&str, &str, &str)]) -> RawTable {
        RawTable::new(
            vec!["pl_name".into(), "pl_rade".into(), "disc_pubdate".into()],
            rows.iter()
                .map(|(n, r, d)| vec![n.to_string(), r.to_string(), d.to_string()])
                .collect(),
        )
    }

    fn names(t: &RawTable) -> Vec<String> {
        t.iter().filter_map(|r| r.name().map(String::from)).collect()
    }

    #[test]
    fn last_occurrence_wins() {
        let t = table(&[("A", "1.0", ""), ("A", "2.0", "")]);
        let records = normalize_all(&dedup(&t, DedupPolicy::LastOccurrence));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].radius, Some(2.0));
        assert_eq!(records[0].radius_km, Some(12742.0));
    }

    #[test]
    fn kepler_duplicate_keeps_last_row_whole() {
        let t = table(&[
            ("Kepler-10b", "1.47", "2011-01"),
            ("Other", "3.0", ""),
            ("Kepler-10b", "", "2014-05"),
        ]);
        let out = dedup(&t, DedupPolicy::LastOccurrence);
        assert_eq!(names(&out), vec!["Kepler-10b", "Other"]);
        // no field merging: the winner's empty radius stays empty
        let records = normalize_all(&out);
        assert_eq!(records[0].radius, None);
        assert_eq!(records[0].publication_date.unwrap().to_string(), "2014-05");
        let expected = normalize_all(&t.with_rows(vec![t.rows[2].clone()]));
        assert_eq!(records[0], expected[0]);
    }

    #[test]
    fn names_compare_trimmed() {
        let t = table(&[(" A", "1", ""), ("A ", "2", ""), ("", "3", "")]);
        let out = dedup(&t, DedupPolicy::LastOccurrence);
        assert_eq!(out.len(), 1);
        assert_eq!(out.row(0).unwrap().get("pl_rade"), Some("2"));
    }

    #[test]
    fn latest_publication_prefers_newer_date() {
        let t = table(&[
            ("A", "1", "2015-02"),
            ("A", "2", "2012-07"),
            ("A", "3", ""),
            ("B", "4", ""),
            ("B", "5", ""),
            ("C", "6", "2020-01"),
            ("C", "7", "2020-01"),
        ]);
        let out = dedup(&t, DedupPolicy::LatestPublication);
        let radii: Vec<_> = out.iter().map(|r| r.get("pl_rade").unwrap()).collect();
        assert_eq!(radii, vec!["1", "5", "7"]);
    }
}
