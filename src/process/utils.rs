use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::PublicationDate;

/// Plain decimal or scientific notation. Rejects `nan`, `inf` and friends,
/// which `f64::from_str` would otherwise accept.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("number pattern should compile")
});

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Non-empty text that looks like a number, else `None`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() || !NUMBER.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer year; an integral float like `2014.0` also counts.
pub fn parse_year(raw: Option<&str>) -> Option<i32> {
    let s = raw?.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let v = parse_number(Some(s))?;
    if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

pub fn parse_publication_date(raw: Option<&str>) -> Option<PublicationDate> {
    raw?.trim().parse().ok()
}

/// Trimmed text, `None` when blank.
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
