//! Series override rules
//!
//! An ordered table of brand/series corrections applied on top of any
//! attribute bundle. Rules are cumulative: a later rule sees the output of
//! the earlier ones. Running the table twice gives the same bundle as
//! running it once.

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{
    AttributeBundle, BraceletColor, BraceletType, Brand, CaseMaterial, DialColor, Gender, Movement,
};

use crate::context::RuleContext;
use crate::dial::pinned_dial;

/// A single override: a predicate on the model and an in-place correction
pub struct OverrideRule {
    pub name: &'static str,
    pub applies: fn(&RuleContext) -> bool,
    pub apply: fn(&RuleContext, &mut AttributeBundle),
}

static SPORT_RESIN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(GA-|GMA-|GBD-|DW-|G-\d)").unwrap());
static SPORT_RESIN_CASIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(GA|GMA|GBD|DW|G)").unwrap());
static NY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^NY\d").unwrap());
static BN_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^BN\d").unwrap());
static SSA_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SSA\d").unwrap());
static DIVE_FAMILY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(SPB|SBDC)\d").unwrap());
static SRPD_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SRPD\d").unwrap());
static PRX_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^T137[.-]?407").unwrap());
static SEASTAR_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^T120[.-]?407").unwrap());
static CLASSIC_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(FAC|FAC0|RA-AC|FER|BAMBINO)").unwrap());
static CLASSIC_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(BAMBINO|CLASSIC)").unwrap());
static WOMENS_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(GMA-|LTP|SHEEN|LA670|BA-|BGD)").unwrap());
static MECHANICAL_CALIBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(NJ\d|NH\d)").unwrap());
static DIVER_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(DIVER|PROSPEX|AQUALAND|SEASTAR|MARIN(E|ER)|NY\d|BN\d|SPB\d|SBDC\d|SKX)").unwrap()
});

const DIVER_DIALS: &[DialColor] = &[DialColor::Blue, DialColor::Black, DialColor::Yellow];
const DRESS_STEEL_DIALS: &[DialColor] = &[DialColor::Blue, DialColor::Black];
const CLASSIC_DIALS: &[DialColor] = &[DialColor::Cream, DialColor::Grey, DialColor::White];

fn dial_in(dial: Option<DialColor>, allowed: &[DialColor]) -> bool {
    dial.map_or(false, |d| allowed.contains(&d))
}

/// Tissot PRX automatic reference
pub(crate) fn is_prx_reference(ctx: &RuleContext) -> bool {
    PRX_REFERENCE.is_match(&ctx.squeezed)
}

/// Tissot Seastar automatic reference
pub(crate) fn is_seastar_reference(ctx: &RuleContext) -> bool {
    SEASTAR_REFERENCE.is_match(&ctx.squeezed)
}

pub(crate) fn has_bn_infix(ctx: &RuleContext) -> bool {
    ctx.model.contains("BN")
}

pub(crate) fn is_mechanical_caliber(ctx: &RuleContext) -> bool {
    MECHANICAL_CALIBER_PREFIX.is_match(&ctx.model)
}

/// Ordered override table
pub static OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule {
        name: "sport_resin",
        applies: |ctx| {
            SPORT_RESIN_PREFIX.is_match(&ctx.model)
                || ctx.series_in(&["GA", "GMA", "GM", "DW"])
                || (ctx.is_brand(Brand::Casio) && SPORT_RESIN_CASIO.is_match(&ctx.model))
        },
        apply: |ctx, b| {
            b.movement = Some(Movement::Quartz);
            b.case_material = Some(CaseMaterial::Plastic);
            b.bracelet_type = Some(BraceletType::Rubber);
            b.bracelet_color = b.bracelet_color.or(Some(BraceletColor::Black));
            b.dial_color = ctx.dial_hint.or(b.dial_color).or(Some(DialColor::Grey));
        },
    },
    OverrideRule {
        name: "dress_steel",
        applies: |ctx| ctx.series_in(&["EFB", "ECB", "EFV"]),
        apply: |ctx, b| {
            b.movement = Some(Movement::Quartz);
            b.case_material = Some(CaseMaterial::Steel);
            b.bracelet_type = Some(BraceletType::Steel);
            b.bracelet_color = Some(BraceletColor::Grey);
            if !dial_in(b.dial_color, DRESS_STEEL_DIALS) {
                b.dial_color = ctx
                    .dial_hint
                    .filter(|d| DRESS_STEEL_DIALS.contains(d))
                    .or(Some(DialColor::Blue));
            }
        },
    },
    OverrideRule {
        name: "diver_mechanical",
        applies: |ctx| {
            NY_PREFIX.is_match(&ctx.model)
                || ctx.series_in(&["NY"])
                || (ctx.is_brand(Brand::Citizen) && ctx.model.starts_with("NY"))
        },
        apply: |_, b| {
            b.movement = Some(Movement::Mechanical);
            b.case_material = Some(CaseMaterial::Steel);
            b.bracelet_type = Some(BraceletType::Rubber);
            b.bracelet_color = Some(BraceletColor::Black);
            if !dial_in(b.dial_color, DIVER_DIALS) {
                b.dial_color = Some(DialColor::Yellow);
            }
        },
    },
    OverrideRule {
        name: "diver_quartz",
        applies: |ctx| {
            BN_PREFIX.is_match(&ctx.model)
                || ctx.series_in(&["BN"])
                || (ctx.is_brand(Brand::Citizen) && has_bn_infix(ctx))
        },
        apply: |ctx, b| {
            b.movement = Some(Movement::Quartz);
            b.bracelet_type = Some(BraceletType::Rubber);
            b.case_material = Some(CaseMaterial::Steel);
            if b.bracelet_color != Some(BraceletColor::Yellow) {
                b.bracelet_color = Some(BraceletColor::Black);
            }
            if matches!(b.dial_color, None | Some(DialColor::Grey) | Some(DialColor::Cream)) {
                b.dial_color = ctx.dial_hint.or(Some(DialColor::Blue));
            }
        },
    },
    OverrideRule {
        name: "open_heart",
        applies: |ctx| SSA_PREFIX.is_match(&ctx.model) || ctx.series_in(&["SSA"]),
        apply: |ctx, b| {
            b.movement = Some(Movement::Mechanical);
            b.bracelet_type = Some(BraceletType::Leather);
            b.bracelet_color = Some(BraceletColor::Brown);
            b.case_material = Some(CaseMaterial::Steel);
            b.dial_color = ctx.dial_hint.or(Some(DialColor::Cream));
        },
    },
    OverrideRule {
        name: "dive_family",
        applies: |ctx| DIVE_FAMILY_PREFIX.is_match(&ctx.model) || ctx.series_in(&["SPB", "SBDC"]),
        apply: |_, b| {
            b.movement = Some(Movement::Mechanical);
            b.bracelet_type = Some(BraceletType::Steel);
            b.bracelet_color = Some(BraceletColor::Grey);
            b.case_material = Some(CaseMaterial::Steel);
            if matches!(b.dial_color, None | Some(DialColor::Black)) {
                b.dial_color = Some(DialColor::Grey);
            }
        },
    },
    OverrideRule {
        name: "srpd",
        applies: |ctx| SRPD_PREFIX.is_match(&ctx.model),
        apply: |_, b| force_steel_automatic(b),
    },
    OverrideRule {
        name: "prx_reference",
        applies: is_prx_reference,
        apply: |_, b| force_steel_automatic(b),
    },
    OverrideRule {
        name: "seastar_reference",
        applies: is_seastar_reference,
        apply: |_, b| {
            b.movement = Some(Movement::Mechanical);
            b.case_material = Some(CaseMaterial::Steel);
            if !dial_in(b.dial_color, DIVER_DIALS) {
                b.dial_color = Some(DialColor::Blue);
            }
        },
    },
    OverrideRule {
        name: "pinned_dial",
        applies: |ctx| pinned_dial(&ctx.compact).is_some(),
        apply: |ctx, b| {
            if let Some(dial) = pinned_dial(&ctx.compact) {
                b.dial_color = Some(dial);
            }
        },
    },
    OverrideRule {
        name: "classic",
        applies: |ctx| {
            CLASSIC_PREFIX.is_match(&ctx.model)
                || ctx.series_in(&["RA", "FAC", "AC"])
                || (ctx.is_brand(Brand::Orient) && CLASSIC_NAME.is_match(&ctx.model))
        },
        apply: |ctx, b| {
            b.movement = Some(Movement::Mechanical);
            b.bracelet_type = Some(BraceletType::Leather);
            b.bracelet_color = Some(BraceletColor::Brown);
            b.case_material = Some(CaseMaterial::Steel);
            if !dial_in(b.dial_color, CLASSIC_DIALS) {
                b.dial_color = ctx
                    .dial_hint
                    .filter(|d| CLASSIC_DIALS.contains(d))
                    .or(Some(DialColor::Cream));
            }
        },
    },
    OverrideRule {
        name: "womens_line",
        applies: |ctx| WOMENS_PREFIX.is_match(&ctx.model),
        apply: |_, b| b.gender = Some(Gender::Female),
    },
    OverrideRule {
        name: "bn_quartz",
        applies: has_bn_infix,
        apply: |_, b| b.movement = Some(Movement::Quartz),
    },
    OverrideRule {
        name: "mechanical_caliber",
        applies: is_mechanical_caliber,
        apply: |_, b| b.movement = Some(Movement::Mechanical),
    },
    OverrideRule {
        name: "rubber_color",
        applies: |_| true,
        apply: |_, b| {
            if b.bracelet_type == Some(BraceletType::Rubber)
                && b.bracelet_color == Some(BraceletColor::Brown)
            {
                b.bracelet_color = Some(BraceletColor::Black);
            }
        },
    },
    OverrideRule {
        name: "diver_dial",
        applies: |ctx| DIVER_STYLE.is_match(&ctx.model),
        apply: |ctx, b| b.dial_color = diver_dial_nudge(b.dial_color, ctx),
    },
];

fn force_steel_automatic(b: &mut AttributeBundle) {
    b.bracelet_type = Some(BraceletType::Steel);
    b.bracelet_color = Some(BraceletColor::Grey);
    b.case_material = Some(CaseMaterial::Steel);
    b.movement = Some(Movement::Mechanical);
}

/// Pull a diver's dial toward blue, black or yellow.
///
/// Models carrying a pinned green dial are left alone.
pub fn diver_dial_nudge(current: Option<DialColor>, ctx: &RuleContext) -> Option<DialColor> {
    if !DIVER_STYLE.is_match(&ctx.model) || ctx.compact.contains("SPB121") {
        return current;
    }
    if dial_in(current, DIVER_DIALS) {
        return current;
    }
    let nudged = if NY_PREFIX.is_match(&ctx.model) {
        DialColor::Yellow
    } else {
        ctx.dial_hint.unwrap_or(DialColor::Blue)
    };
    if DIVER_DIALS.contains(&nudged) {
        Some(nudged)
    } else {
        Some(DialColor::Blue)
    }
}

/// Run every override rule in order
pub fn apply_overrides(bundle: &mut AttributeBundle, ctx: &RuleContext) {
    for rule in OVERRIDE_RULES {
        if (rule.applies)(ctx) {
            (rule.apply)(ctx, bundle);
            tracing::trace!(rule = rule.name, model = %ctx.model, "Override applied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: &str, hint: &str, bundle: AttributeBundle) -> AttributeBundle {
        let ctx = RuleContext::new(model, hint);
        let mut out = bundle;
        apply_overrides(&mut out, &ctx);
        out
    }

    #[test]
    fn test_sport_resin() {
        let out = run("GA-2100-1A1", "", AttributeBundle::default());
        assert_eq!(out.movement, Some(Movement::Quartz));
        assert_eq!(out.case_material, Some(CaseMaterial::Plastic));
        assert_eq!(out.bracelet_type, Some(BraceletType::Rubber));
        assert_eq!(out.bracelet_color, Some(BraceletColor::Black));
        assert_eq!(out.dial_color, Some(DialColor::Black));
    }

    #[test]
    fn test_dress_steel_constrains_dial() {
        let out = run(
            "EFV-540D-7A",
            "",
            AttributeBundle { dial_color: Some(DialColor::Cream), ..Default::default() },
        );
        assert_eq!(out.bracelet_type, Some(BraceletType::Steel));
        assert_eq!(out.bracelet_color, Some(BraceletColor::Grey));
        assert_eq!(out.dial_color, Some(DialColor::Blue));
    }

    #[test]
    fn test_diver_mechanical_defaults_to_yellow() {
        let out = run(
            "NY0040",
            "",
            AttributeBundle { dial_color: Some(DialColor::Grey), ..Default::default() },
        );
        assert_eq!(out.movement, Some(Movement::Mechanical));
        assert_eq!(out.bracelet_type, Some(BraceletType::Rubber));
        assert_eq!(out.dial_color, Some(DialColor::Yellow));
    }

    #[test]
    fn test_diver_quartz_keeps_yellow_strap() {
        let out = run(
            "BN0193-17E",
            "",
            AttributeBundle {
                bracelet_color: Some(BraceletColor::Yellow),
                bracelet_type: Some(BraceletType::Leather),
                ..Default::default()
            },
        );
        assert_eq!(out.movement, Some(Movement::Quartz));
        assert_eq!(out.bracelet_type, Some(BraceletType::Rubber));
        assert_eq!(out.bracelet_color, Some(BraceletColor::Yellow));
        assert!(dial_in(out.dial_color, DIVER_DIALS));
    }

    #[test]
    fn test_pinned_dial_wins() {
        let out = run(
            "SPB121J1",
            "",
            AttributeBundle { dial_color: Some(DialColor::Black), ..Default::default() },
        );
        assert_eq!(out.dial_color, Some(DialColor::Green));
        assert_eq!(out.bracelet_type, Some(BraceletType::Steel));
    }

    #[test]
    fn test_prx_and_seastar_references() {
        let prx = run(
            "T137.407.11.041.00",
            "",
            AttributeBundle { bracelet_type: Some(BraceletType::Leather), ..Default::default() },
        );
        assert_eq!(prx.bracelet_type, Some(BraceletType::Steel));
        assert_eq!(prx.movement, Some(Movement::Mechanical));

        let seastar = run("T120.407.11.041.03", "", AttributeBundle::default());
        assert_eq!(seastar.dial_color, Some(DialColor::Blue));
        assert_eq!(seastar.movement, Some(Movement::Mechanical));
    }

    #[test]
    fn test_classic_dial_constrained() {
        let out = run(
            "RA-AC0F02B",
            "",
            AttributeBundle { dial_color: Some(DialColor::Black), ..Default::default() },
        );
        assert_eq!(out.bracelet_type, Some(BraceletType::Leather));
        assert_eq!(out.dial_color, Some(DialColor::Cream));
    }

    #[test]
    fn test_womens_line() {
        let out = run("LTP-1302D-7A1", "", AttributeBundle::default());
        assert_eq!(out.gender, Some(Gender::Female));
    }

    #[test]
    fn test_rubber_never_brown() {
        let out = run(
            "XYZ123",
            "",
            AttributeBundle {
                bracelet_type: Some(BraceletType::Rubber),
                bracelet_color: Some(BraceletColor::Brown),
                ..Default::default()
            },
        );
        assert_eq!(out.bracelet_color, Some(BraceletColor::Black));
    }

    #[test]
    fn test_diver_nudge_exempts_pinned_green() {
        let ctx = RuleContext::new("SPB121J1", "");
        assert_eq!(diver_dial_nudge(Some(DialColor::Green), &ctx), Some(DialColor::Green));

        let ctx = RuleContext::new("SKX007", "");
        assert_eq!(diver_dial_nudge(Some(DialColor::Grey), &ctx), Some(DialColor::Blue));

        let ctx = RuleContext::new("GA-2100", "");
        assert_eq!(diver_dial_nudge(Some(DialColor::Grey), &ctx), Some(DialColor::Grey));
    }

    #[test]
    fn test_apply_twice_equals_once() {
        let models = [
            "GA-2100-1A1",
            "NY0040",
            "BN0193",
            "SPB143",
            "RA-AC0F02B",
            "EFV-540D",
            "SSA405J1",
        ];
        for model in models {
            let once = run(model, "", AttributeBundle::default());
            let twice = run(model, "", once);
            assert_eq!(once, twice, "{}", model);
        }
    }
}
