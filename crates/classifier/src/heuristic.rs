//! Deterministic best-guess classification from the model code alone

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{
    AttributeBundle, Attributes, BraceletColor, BraceletType, Brand, CaseMaterial, DialColor,
    Gender, Movement,
};

use crate::context::RuleContext;
use crate::validation::finalize;

static CITIZEN_MECHANICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(NY\d|NJ\d|NB\d)").unwrap());
static CASIO_FAMILY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(GA-|GMA-|GAB|GA-B|G-|DW-|AE-|F-|A\d{3}|LTP|SHEEN|BABY-G|BGD)").unwrap()
});
static LEATHER_DRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(RA-AC0|FAC|BAMBINO|SARB|PRESAGE|T137|PRX)").unwrap());
static WOMENS_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(30|31|32|33|34)\b").unwrap());
static WOMENS_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(LTP|SHEEN|LA670|BA-)").unwrap());

/// Classify a model with no outside help. Always returns a gated bundle.
pub fn classify_heuristic(model: &str, brand_hint: &str) -> Attributes {
    let ctx = RuleContext::new(model, brand_hint);
    finalize(&base_bundle(&ctx), &ctx)
}

fn base_bundle(ctx: &RuleContext) -> AttributeBundle {
    let m = ctx.model.as_str();
    let mut b = AttributeBundle {
        dial_color: Some(ctx.dial_hint.unwrap_or(DialColor::Grey)),
        ..AttributeBundle::from(Attributes::SAFE_DEFAULTS)
    };

    if ctx.is_brand(Brand::Citizen) {
        b.movement = Some(if CITIZEN_MECHANICAL.is_match(m) {
            Movement::Mechanical
        } else {
            Movement::Quartz
        });
    }

    if CASIO_FAMILY.is_match(m) || ctx.is_brand(Brand::Casio) {
        b.bracelet_type = Some(BraceletType::Rubber);
        b.bracelet_color = Some(BraceletColor::Black);
        b.case_material = Some(CaseMaterial::Plastic);
        b.movement = Some(Movement::Quartz);
    }

    if LEATHER_DRESS.is_match(m) {
        b.bracelet_type = Some(BraceletType::Leather);
        b.bracelet_color = Some(if b.dial_color == Some(DialColor::Black) {
            BraceletColor::Black
        } else {
            BraceletColor::Brown
        });
    }

    if WOMENS_SIZE.is_match(m) || WOMENS_PREFIX.is_match(m) {
        b.gender = Some(Gender::Female);
    }

    if b.bracelet_type == Some(BraceletType::Steel) {
        b.bracelet_color = Some(BraceletColor::Grey);
    }
    if b.bracelet_type == Some(BraceletType::Rubber)
        && matches!(b.bracelet_color, Some(BraceletColor::Grey) | Some(BraceletColor::Brown))
    {
        b.bracelet_color = Some(BraceletColor::Black);
    }

    b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_resin_model() {
        let out = classify_heuristic("GA-2100-1A1", "");
        assert_eq!(out.movement, Movement::Quartz);
        assert_eq!(out.case_material, CaseMaterial::Plastic);
        assert_eq!(out.bracelet_type, BraceletType::Rubber);
        assert_eq!(out.dial_color, DialColor::Black);
    }

    #[test]
    fn test_citizen_quartz_by_default() {
        let out = classify_heuristic("CA0695-84E", "Citizen");
        assert_eq!(out.movement, Movement::Quartz);
        let out = classify_heuristic("NB1050-59E", "Citizen");
        assert_eq!(out.movement, Movement::Mechanical);
    }

    #[test]
    fn test_leather_dress_line() {
        let out = classify_heuristic("SARB033", "Seiko");
        assert_eq!(out.bracelet_type, BraceletType::Leather);
        assert_eq!(out.movement, Movement::Mechanical);
    }

    #[test]
    fn test_womens_size_token() {
        let out = classify_heuristic("SUR 32 X", "");
        assert_eq!(out.gender, Gender::Female);
        let out = classify_heuristic("SHEEN-4525", "");
        assert_eq!(out.gender, Gender::Female);
    }

    #[test]
    fn test_unknown_model_gets_safe_bundle() {
        let out = classify_heuristic("XYZ123", "");
        assert_eq!(out, Attributes::SAFE_DEFAULTS);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(classify_heuristic("NY0040", ""), classify_heuristic("NY0040", ""));
    }
}
