// src/record.rs

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Discovery publication month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicationDate {
    pub year: i32,
    pub month: u32,
}

impl PublicationDate {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|d| Self {
            year: d.year(),
            month: d.month(),
        })
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Accepts `YYYY-MM` and `YYYY-MM-DD`; the day is dropped.
impl FromStr for PublicationDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let full = match s.len() {
            7 => format!("{}-01", s),
            10 => s.to_string(),
            _ => return Err(anyhow!("expected YYYY-MM or YYYY-MM-DD, got {:?}", s)),
        };
        let date = NaiveDate::parse_from_str(&full, "%Y-%m-%d")
            .map_err(|e| anyhow!("bad publication date {:?}: {}", s, e))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl Serialize for PublicationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Serialized field names of [`CanonicalRecord`], in declaration order.
pub const FIELDS: [&str; 23] = [
    "name",
    "discovery_year",
    "publication_date",
    "discovery_method",
    "distance",
    "distance_au",
    "distance_ly",
    "distance_km",
    "radius",
    "radius_km",
    "orbital_period",
    "orbital_period_years",
    "semi_major_axis",
    "mass",
    "mass_kg",
    "equilibrium_temperature",
    "insolation",
    "insolation_wm2",
    "stellar_mass",
    "stellar_mass_kg",
    "stellar_mass_earth",
    "stellar_temperature",
    "stellar_radius",
];

/// One normalized exoplanet, base values in archive units plus their conversions.
///
/// A derived field is `Some` exactly when its base field is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub name: String,
    pub discovery_year: Option<i32>,
    pub publication_date: Option<PublicationDate>,
    pub discovery_method: Option<String>,

    /// Parsecs.
    pub distance: Option<f64>,
    pub distance_au: Option<f64>,
    pub distance_ly: Option<f64>,
    pub distance_km: Option<f64>,

    /// Earth radii.
    pub radius: Option<f64>,
    pub radius_km: Option<f64>,

    /// Days.
    pub orbital_period: Option<f64>,
    pub orbital_period_years: Option<f64>,
    /// AU.
    pub semi_major_axis: Option<f64>,

    /// Earth masses.
    pub mass: Option<f64>,
    pub mass_kg: Option<f64>,

    /// Kelvin.
    pub equilibrium_temperature: Option<f64>,

    /// Earth flux units.
    pub insolation: Option<f64>,
    pub insolation_wm2: Option<f64>,

    /// Solar masses.
    pub stellar_mass: Option<f64>,
    pub stellar_mass_kg: Option<f64>,
    pub stellar_mass_earth: Option<f64>,

    /// Kelvin.
    pub stellar_temperature: Option<f64>,
    /// Solar radii.
    pub stellar_radius: Option<f64>,
}
