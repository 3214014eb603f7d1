// src/sort.rs

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

use crate::record::CanonicalRecord;

/// Fields a record set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Distance,
    Radius,
    Mass,
    StellarMass,
    Insolation,
    OrbitalPeriod,
    DiscoveryYear,
    PublicationDate,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Name,
        SortKey::Distance,
        SortKey::Radius,
        SortKey::Mass,
        SortKey::StellarMass,
        SortKey::Insolation,
        SortKey::OrbitalPeriod,
        SortKey::DiscoveryYear,
        SortKey::PublicationDate,
    ];

    /// Command word, as typed in the explorer.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Distance => "distance",
            SortKey::Radius => "size",
            SortKey::Mass => "mass",
            SortKey::StellarMass => "star_mass",
            SortKey::Insolation => "insolation",
            SortKey::OrbitalPeriod => "orbital_period",
            SortKey::DiscoveryYear => "discovery_year",
            SortKey::PublicationDate => "publication_date",
        }
    }

    /// Column in the `planetary_systems` table.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Distance => "distance",
            SortKey::Radius => "radius",
            SortKey::Mass => "mass",
            SortKey::StellarMass => "stellar_mass",
            SortKey::Insolation => "insolation",
            SortKey::OrbitalPeriod => "orbital_period",
            SortKey::DiscoveryYear => "discovery_year",
            SortKey::PublicationDate => "publication_date",
        }
    }

    fn float(self, r: &CanonicalRecord) -> Option<f64> {
        match self {
            SortKey::Distance => r.distance,
            SortKey::Radius => r.radius,
            SortKey::Mass => r.mass,
            SortKey::StellarMass => r.stellar_mass,
            SortKey::Insolation => r.insolation,
            SortKey::OrbitalPeriod => r.orbital_period,
            SortKey::Name | SortKey::DiscoveryYear | SortKey::PublicationDate => None,
        }
    }

    /// Whether `r` has a value for this key.
    pub fn is_present(self, r: &CanonicalRecord) -> bool {
        match self {
            SortKey::Name => true,
            SortKey::DiscoveryYear => r.discovery_year.is_some(),
            SortKey::PublicationDate => r.publication_date.is_some(),
            _ => self.float(r).is_some(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "distance" | "dist" => SortKey::Distance,
            "size" | "radius" => SortKey::Radius,
            "mass" => SortKey::Mass,
            "star_mass" | "stellar_mass" => SortKey::StellarMass,
            "insolation" | "insol" => SortKey::Insolation,
            "orbital_period" | "period" => SortKey::OrbitalPeriod,
            "discovery_year" | "year" => SortKey::DiscoveryYear,
            "publication_date" | "pubdate" => SortKey::PublicationDate,
            other => return Err(anyhow!("unknown sort key {:?}", other)),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// Present values first, ordered by `dir`; absent values last whatever the direction.
fn nulls_last<T>(
    a: Option<T>,
    b: Option<T>,
    dir: Direction,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => dir.apply(cmp(&x, &y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare(key: SortKey, dir: Direction, a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    match key {
        SortKey::Name => dir.apply(a.name.cmp(&b.name)),
        SortKey::DiscoveryYear => nulls_last(a.discovery_year, b.discovery_year, dir, Ord::cmp),
        SortKey::PublicationDate => {
            nulls_last(a.publication_date, b.publication_date, dir, Ord::cmp)
        }
        _ => nulls_last(key.float(a), key.float(b), dir, |x, y| {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }),
    }
}

/// Stable sort in place.
pub fn sort_records(records: &mut [CanonicalRecord], key: SortKey, dir: Direction) {
    records.sort_by(|a, b| compare(key, dir, a, b));
}

/// Stable sorted view, leaving `records` in canonical order.
pub fn sorted<'a>(
    records: &'a [CanonicalRecord],
    key: SortKey,
    dir: Direction,
) -> Vec<&'a CanonicalRecord> {
    let mut refs: Vec<&CanonicalRecord> = records.iter().collect();
    refs.sort_by(|a, b| compare(key, dir, a, b));
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, radius: Option<f64>, year: Option<i32>) -> CanonicalRecord {
        CanonicalRecord {
            name: name.into(),
            radius,
            discovery_year: year,
            ..Default::default()
        }
    }

    fn names(v: &[&CanonicalRecord]) -> Vec<String> {
        v.iter().map(|r| r.name.clone()).collect()
    }

    fn sample() -> Vec<CanonicalRecord> {
        vec![
            rec("B", Some(0.40), None),
            rec("N1", None, Some(2001)),
            rec("A", Some(0.39), Some(2001)),
            rec("C", Some(0.50), Some(1999)),
            rec("E", Some(0.40), Some(2001)),
            rec("N2", None, None),
        ]
    }

    #[test]
    fn ascending_with_nulls_last_and_ties_stable() {
        let data = sample();
        let out = sorted(&data, SortKey::Radius, Direction::Ascending);
        assert_eq!(names(&out), vec!["A", "B", "E", "C", "N1", "N2"]);
    }

    #[test]
    fn descending_keeps_nulls_last() {
        let data = sample();
        let out = sorted(&data, SortKey::Radius, Direction::Descending);
        assert_eq!(names(&out), vec!["C", "B", "E", "A", "N1", "N2"]);
    }

    #[test]
    fn nulls_after_values_for_every_key() {
        let data = sample();
        for key in SortKey::ALL {
            for dir in [Direction::Ascending, Direction::Descending] {
                let out = sorted(&data, key, dir);
                let first_absent = out.iter().position(|r| !key.is_present(r));
                if let Some(i) = first_absent {
                    assert!(
                        out[i..].iter().all(|r| !key.is_present(r)),
                        "{} {:?}",
                        key,
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn integer_keys_and_names() {
        let mut data = sample();
        sort_records(&mut data, SortKey::DiscoveryYear, Direction::Ascending);
        let got: Vec<_> = data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["C", "N1", "A", "E", "B", "N2"]);

        sort_records(&mut data, SortKey::Name, Direction::Descending);
        let got: Vec<_> = data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["N2", "N1", "E", "C", "B", "A"]);
    }

    #[test]
    fn keys_parse_from_commands() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("Radius".parse::<SortKey>().unwrap(), SortKey::Radius);
        assert!("colour".parse::<SortKey>().is_err());
    }
}
