//! Model code extraction
//!
//! Pulls a single model token out of free text such as
//! "Casio G-Shock Model: GA-2100-1A1 (black)" and derives its series.

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{compact_key, Error, ModelCode, Result, GENERIC_SERIES};

/// Known series prefixes, tested in order against the compact model.
/// Longer codes precede their prefixes (GMA before GA before GM).
pub const SERIES_PRIORITY: &[&str] = &[
    "EFB", "ECB", "EFV", "GMA", "GA", "GM", "DW", "NY", "BN", "SSA", "SPB", "SBDC", "FAC", "RA",
    "AC",
];

static NOISE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(watch|product|name|model|ref(?:erence)?|sku)\b[:\-\s]*").unwrap()
});
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()\[\]{}]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z0-9]+(?:[\-.][A-Z0-9]+)*").unwrap());
static LETTERS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,5}$").unwrap());
static LEADING_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]{1,5})\d").unwrap());

/// Extract the model token and series from free text
pub fn parse_model_code(raw: &str) -> Result<ModelCode> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::ModelInputEmpty);
    }

    let scrubbed = NOISE_WORDS.replace_all(trimmed, " ");
    let scrubbed = BRACKETS.replace_all(&scrubbed, " ");
    let scrubbed = WHITESPACE.replace_all(&scrubbed, " ");
    let upper = scrubbed.trim().to_uppercase();

    let tokens: Vec<&str> = TOKEN.find_iter(&upper).map(|m| m.as_str()).collect();

    let best = tokens
        .iter()
        .copied()
        .find(|t| {
            t.chars().any(|c| c.is_ascii_alphabetic()) && t.chars().any(|c| c.is_ascii_digit())
        })
        .or_else(|| match tokens.as_slice() {
            [only] if LETTERS_ONLY.is_match(only) => Some(*only),
            _ => None,
        })
        .ok_or(Error::ModelCodeNotIdentified)?;

    let series = detect_series(&compact_key(best));
    tracing::trace!(raw = %trimmed, model = %best, series = %series, "Parsed model code");

    Ok(ModelCode::new(raw, best, series))
}

/// Series of a compact model code; [`GENERIC_SERIES`] when nothing matches
pub fn detect_series(compact: &str) -> String {
    if let Some(code) = SERIES_PRIORITY.iter().find(|code| compact.starts_with(**code)) {
        return (*code).to_string();
    }

    LEADING_LETTERS
        .captures(compact)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| GENERIC_SERIES.to_string())
}

/// Series of a model, or `None` when the model cannot be parsed
pub fn series_of(model: &str) -> Option<String> {
    parse_model_code(model).ok().map(|code| code.series)
}
