//! Watch model classification
//!
//! Turns free-form model text into a validated attribute bundle and a
//! storefront record:
//!
//! - [`parser`]: model token and series extraction
//! - [`brand`], [`dial`], [`size`]: pattern-based inference
//! - [`heuristic`]: deterministic first guess
//! - [`overrides`] and [`validation`]: series rules and the validation gate
//! - [`ai`]: optional language-model classification through the same gate
//! - [`catalog`] and [`merge`]: catalog lookup and record merge
//! - [`pipeline`]: everything wired together

pub mod ai;
pub mod brand;
pub mod catalog;
pub mod context;
pub mod dial;
pub mod heuristic;
pub mod merge;
pub mod overrides;
pub mod parser;
pub mod pipeline;
pub mod size;
pub mod validation;

pub use ai::{AiClassifier, Classification, ClassificationSource};
pub use brand::{infer_brand, resolve_brand};
pub use catalog::{CatalogError, InMemoryCatalogStore, JsonCatalogStore};
pub use context::RuleContext;
pub use dial::{detect_dial_color, pinned_dial};
pub use heuristic::classify_heuristic;
pub use merge::merge_record;
pub use overrides::{apply_overrides, diver_dial_nudge, OverrideRule, OVERRIDE_RULES};
pub use parser::{detect_series, parse_model_code, series_of};
pub use pipeline::{ClassifiedModel, WatchPipeline};
pub use size::{estimate_size_label, normalize_size_label};
pub use validation::{
    clamp_and_fix, fill_missing, final_override_pass, finalize, validate, validate_raw,
};
