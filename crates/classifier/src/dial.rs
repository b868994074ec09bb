//! Dial color inference from model codes
//!
//! Checks run in priority order and the first hit wins:
//! 1. pinned references with a known dial
//! 2. trailing letter/word variant suffixes
//! 3. numeric variant suffixes (`-1…` black, `-2…` navy, …)
//! 4. color words anywhere in the code

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{compact_key, DialColor};

/// References whose dial is known exactly, matched against the compact code
pub const PINNED_DIALS: &[(&str, DialColor)] = &[
    ("SPB121", DialColor::Green),
    ("T1204071104103", DialColor::Blue),
    ("NJ018080M", DialColor::Blue),
];

static SUFFIX_PATTERNS: Lazy<Vec<(Regex, DialColor)>> = Lazy::new(|| vec![
    (Regex::new(r"(^|[-.])(M|L|BL|BLUE)[A-Z0-9]*$").unwrap(), DialColor::Blue),
    (Regex::new(r"(^|[-.])(G|GR|GREEN)[A-Z0-9]*$").unwrap(), DialColor::Green),
    (Regex::new(r"(^|[-.])(W|WH|WHITE)[A-Z0-9]*$").unwrap(), DialColor::White),
    (Regex::new(r"(^|[-.])(B|BK|BLACK)[A-Z0-9]*$").unwrap(), DialColor::Black),
]);

static NUMERIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d)[A-Z0-9]*$").unwrap());

static KEYWORD_PATTERNS: Lazy<Vec<(Regex, DialColor)>> = Lazy::new(|| vec![
    (Regex::new(r"BL|BLUE|NAVY").unwrap(), DialColor::Navy),
    (Regex::new(r"BK|BLACK").unwrap(), DialColor::Black),
    (Regex::new(r"GR|GREEN").unwrap(), DialColor::Green),
    (Regex::new(r"WH|WHITE").unwrap(), DialColor::White),
]);

/// Dial of a pinned reference, if `compact` contains one
pub fn pinned_dial(compact: &str) -> Option<DialColor> {
    PINNED_DIALS
        .iter()
        .find(|(code, _)| compact.contains(code))
        .map(|(_, color)| *color)
}

fn numeric_suffix_color(digit: &str) -> Option<DialColor> {
    match digit {
        "1" => Some(DialColor::Black),
        "2" => Some(DialColor::Navy),
        "3" => Some(DialColor::Green),
        "4" => Some(DialColor::Red),
        "7" => Some(DialColor::White),
        "8" => Some(DialColor::Grey),
        _ => None,
    }
}

/// Infer the dial color of a model code; `None` means no signal
pub fn detect_dial_color(model: &str) -> Option<DialColor> {
    let m = model.trim().to_uppercase();

    if let Some(color) = pinned_dial(&compact_key(&m)) {
        return Some(color);
    }

    if let Some((_, color)) = SUFFIX_PATTERNS.iter().find(|(re, _)| re.is_match(&m)) {
        return Some(*color);
    }

    if let Some(color) = NUMERIC_SUFFIX
        .captures(&m)
        .and_then(|c| c.get(1))
        .and_then(|d| numeric_suffix_color(d.as_str()))
    {
        return Some(color);
    }

    KEYWORD_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(&m))
        .map(|(_, color)| *color)
}
