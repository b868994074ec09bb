//! Validation gate
//!
//! Whatever produced a bundle (heuristics, catalog text, a language model),
//! the gate turns it into [`Attributes`] that respect the closed domains and
//! the series invariants. The gate runs in two stages:
//!
//! 1. [`clamp_and_fix`]: fill empty fields, then enforce cross-field and
//!    immutable-movement rules
//! 2. [`final_override_pass`]: run the override table, then re-assert the
//!    same invariants
//!
//! Applying [`validate`] to its own output returns that output unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{
    AttributeBundle, Attributes, BraceletColor, BraceletType, Movement, RawAttributes,
};

use crate::context::RuleContext;
use crate::overrides::{apply_overrides, has_bn_infix, is_mechanical_caliber, is_seastar_reference};

static QUARTZ_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(MTP|GA-B)").unwrap());

const QUARTZ_SERIES: &[&str] = &["GA", "GMA", "GM", "DW", "EFB", "ECB", "EFV", "BN"];
const MECHANICAL_SERIES: &[&str] = &["NY", "SSA", "SPB", "SBDC", "RA", "FAC", "AC"];

/// Fill empty fields from the safe bundle.
///
/// An empty bracelet color follows the bracelet: grey for steel, brown
/// otherwise.
pub fn fill_missing(bundle: &AttributeBundle) -> Attributes {
    let safe = Attributes::SAFE_DEFAULTS;
    let bracelet_type = bundle.bracelet_type.unwrap_or(safe.bracelet_type);
    let bracelet_color = bundle.bracelet_color.unwrap_or(match bracelet_type {
        BraceletType::Steel => BraceletColor::Grey,
        _ => safe.bracelet_color,
    });

    Attributes {
        dial_color: bundle.dial_color.unwrap_or(safe.dial_color),
        bracelet_type,
        gender: bundle.gender.unwrap_or(safe.gender),
        movement: bundle.movement.unwrap_or(safe.movement),
        bracelet_color,
        case_material: bundle.case_material.unwrap_or(safe.case_material),
    }
}

fn enforce_invariants(attrs: &mut Attributes, ctx: &RuleContext) {
    let bn = ctx.series_in(&["BN"]) || has_bn_infix(ctx);

    if ctx.series_in(QUARTZ_SERIES) || bn || QUARTZ_PREFIX.is_match(&ctx.model) {
        attrs.movement = Movement::Quartz;
    }
    if ctx.series_in(MECHANICAL_SERIES) || is_mechanical_caliber(ctx) || is_seastar_reference(ctx) {
        attrs.movement = Movement::Mechanical;
    }

    // BN models are never on leather
    if bn {
        if attrs.bracelet_type == BraceletType::Leather {
            attrs.bracelet_type = BraceletType::Rubber;
        }
        attrs.movement = Movement::Quartz;
    }

    if attrs.bracelet_type == BraceletType::Rubber && attrs.bracelet_color == BraceletColor::Brown {
        attrs.bracelet_color = BraceletColor::Black;
    }
}

/// First gate stage
pub fn clamp_and_fix(bundle: &AttributeBundle, ctx: &RuleContext) -> Attributes {
    let mut attrs = fill_missing(bundle);
    enforce_invariants(&mut attrs, ctx);
    attrs
}

/// Second gate stage
pub fn final_override_pass(attrs: Attributes, ctx: &RuleContext) -> Attributes {
    let mut bundle = AttributeBundle::from(attrs);
    apply_overrides(&mut bundle, ctx);
    let mut out = fill_missing(&bundle);
    enforce_invariants(&mut out, ctx);
    out
}

/// Run both gate stages
pub fn validate(bundle: &AttributeBundle, ctx: &RuleContext) -> Attributes {
    final_override_pass(clamp_and_fix(bundle, ctx), ctx)
}

/// Clamp untrusted text into the closed domains, then validate
pub fn validate_raw(raw: &RawAttributes, ctx: &RuleContext) -> Attributes {
    validate(&raw.to_bundle(), ctx)
}

/// Overrides, fill, then the full gate
pub fn finalize(bundle: &AttributeBundle, ctx: &RuleContext) -> Attributes {
    let mut working = *bundle;
    apply_overrides(&mut working, ctx);
    let filled = fill_missing(&working);
    validate(&AttributeBundle::from(filled), ctx)
}
