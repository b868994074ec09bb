//! Per-model facts shared by the override rules and the validation gate

use watch_catalog_core::{compact_key, Brand, DialColor};

use crate::brand::resolve_brand;
use crate::dial::detect_dial_color;
use crate::parser::series_of;

/// Facts derived once from a model code and brand hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    /// Uppercase, trimmed model
    pub model: String,
    /// `model` without whitespace
    pub squeezed: String,
    /// `model` without separators
    pub compact: String,
    /// Series, or `None` when the model does not parse
    pub series: Option<String>,
    pub brand: Option<Brand>,
    /// Dial color read from the model code itself
    pub dial_hint: Option<DialColor>,
}

impl RuleContext {
    pub fn new(model: &str, brand_hint: &str) -> Self {
        let m = model.trim().to_uppercase();
        Self {
            squeezed: m.split_whitespace().collect(),
            compact: compact_key(&m),
            series: series_of(&m),
            brand: resolve_brand(brand_hint, &m),
            dial_hint: detect_dial_color(&m),
            model: m,
        }
    }

    /// True when the series is one of `codes`
    pub fn series_in(&self, codes: &[&str]) -> bool {
        self.series
            .as_deref()
            .map_or(false, |s| codes.contains(&s))
    }

    pub fn is_brand(&self, brand: Brand) -> bool {
        self.brand == Some(brand)
    }
}
