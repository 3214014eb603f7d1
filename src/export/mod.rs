// src/export/mod.rs

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    process::{Processed, RawTable},
    sort::Direction,
};

pub mod format;
pub mod json;
pub mod report;
pub mod tabular;

pub use report::{render_report, report_lines, ReportKind};

pub const RAW_CSV: &str = "nasa_exoplanets.csv";
pub const RAW_JSON: &str = "nasa_exoplanets.json";
pub const FULL_CSV: &str = "exoplanets.csv";
pub const FULL_JSON: &str = "exoplanets.json";
pub const KEY_CSV: &str = "key_exoplanets.csv";
pub const KEY_JSON: &str = "key_exoplanets.json";

/// Write via a hidden temp file in the same directory, then rename over `path`.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("no file name in {}", path.display()))?;
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let file =
        File::create(&tmp_path).with_context(|| format!("creating {}", tmp_path.display()))?;
    let mut w = BufWriter::new(file);
    write(&mut w).with_context(|| format!("writing {}", path.display()))?;
    w.flush()
        .with_context(|| format!("flushing {}", tmp_path.display()))?;
    drop(w);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    debug!(path = %path.display(), "wrote");
    Ok(())
}

/// Write every export and report for one run into `dir`. Returns the paths written.
#[tracing::instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn write_all(
    dir: &Path,
    raw_text: &str,
    raw: &RawTable,
    processed: &Processed,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::new();
    let mut emit = |name: &str, f: &dyn Fn(&mut BufWriter<File>) -> Result<()>| -> Result<()> {
        let path = dir.join(name);
        write_atomic(&path, |w| f(w))?;
        written.push(path);
        Ok(())
    };

    emit(RAW_CSV, &|w| Ok(w.write_all(raw_text.as_bytes())?))?;
    emit(RAW_JSON, &|w| json::write_raw_json(w, raw))?;
    emit(FULL_CSV, &|w| tabular::write_raw_csv(w, &processed.deduped))?;
    emit(FULL_JSON, &|w| json::write_raw_json(w, &processed.deduped))?;
    emit(KEY_CSV, &|w| tabular::write_records_csv(w, &processed.records))?;
    emit(KEY_JSON, &|w| json::write_records_json(w, &processed.records))?;

    for kind in ReportKind::ALL {
        emit(kind.file_name(), &|w| {
            let text = render_report(kind, &processed.records, Direction::Ascending);
            Ok(w.write_all(text.as_bytes())?)
        })?;
    }

    info!(files = written.len(), records = processed.records.len(), "exports written");
    Ok(written)
}
