// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// NASA Exoplanet Archive TAP query for the full planetary systems table.
pub const DEFAULT_ENDPOINT: &str =
    "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=select+*+from+ps&format=csv";

/// Which of two rows sharing a planet name survives deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// The later row in feed order wins.
    #[default]
    LastOccurrence,
    /// The row with the newest publication date wins; ties go to the later row.
    LatestPublication,
}

/// Run configuration, built once at startup and handed to each component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub timeout_secs: u64,
    /// How long a store write waits on a locked database before giving up.
    pub busy_timeout_ms: u64,
    pub dedup: DedupPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            db_path: data_dir.join("exoplanets.db"),
            data_dir,
            timeout_secs: 30,
            busy_timeout_ms: 2_000,
            dedup: DedupPolicy::default(),
        }
    }
}

impl Config {
    /// Load from a YAML file; keys left out keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Optional file first, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Point both the exports and the database at `dir`.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.db_path = dir.join("exoplanets.db");
        self.data_dir = dir;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        Ok(())
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).with_context(|| format!("parsing endpoint {}", self.endpoint))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_point_at_archive() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.db_path, PathBuf::from("data").join("exoplanets.db"));
        assert_eq!(cfg.dedup, DedupPolicy::LastOccurrence);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "data_dir: /tmp/exo\ndedup: latest_publication\ntimeout_secs: 5")?;
        let cfg = Config::from_yaml_file(f.path())?;
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/exo"));
        assert_eq!(cfg.dedup, DedupPolicy::LatestPublication);
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        Ok(())
    }

    #[test]
    fn bad_endpoint_is_rejected() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "endpoint: not a url")?;
        assert!(Config::from_yaml_file(f.path()).is_err());
        Ok(())
    }

    #[test]
    fn data_dir_moves_db() {
        let cfg = Config::default().with_data_dir("out");
        assert_eq!(cfg.data_dir, PathBuf::from("out"));
        assert_eq!(cfg.db_path, PathBuf::from("out").join("exoplanets.db"));
    }
}
