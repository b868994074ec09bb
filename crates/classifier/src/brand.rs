//! Brand inference from model codes

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::Brand;

// Model-prefix conventions, first match wins
static BRAND_PATTERNS: Lazy<Vec<(Regex, Brand)>> = Lazy::new(|| vec![
    (Regex::new(r"^(SKX|SNZH|SRP|SRPE|SNK|SSA|SSK|SNXS|SPB)").unwrap(), Brand::Seiko),
    (Regex::new(r"^(RA-|RA\d|F[A-Z]{2}\d|AC\d)").unwrap(), Brand::Orient),
    (Regex::new(r"^(BN\d|NJ\d|NY\d)").unwrap(), Brand::Citizen),
    (Regex::new(r"^(EFB|ECB|EFV)").unwrap(), Brand::Casio),
    (
        Regex::new(r"^(F-\d|AE-\d|GA-\d|GMA-|GA-B\d|GAB\d|GBD-|G-\d|DW-\d|A\d{3})").unwrap(),
        Brand::Casio,
    ),
    (Regex::new(r"^(T\d|PRX|LE\s?LOCLE|SEASTAR)").unwrap(), Brand::Tissot),
    (Regex::new(r"^(L3\.|L2\.|L4\.|LONGINES)").unwrap(), Brand::Longines),
    (Regex::new(r"^(M0|M8|H32|H40|H7)").unwrap(), Brand::Hamilton),
    (Regex::new(r"^(210\.|220\.|OMEGA)").unwrap(), Brand::Omega),
    (Regex::new(r"^(M12|M34|M95)").unwrap(), Brand::Ingersoll),
]);

/// Infer the brand from model-prefix conventions
pub fn infer_brand(model: &str) -> Option<Brand> {
    let m = model.trim().to_uppercase();
    BRAND_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(&m))
        .map(|(_, brand)| *brand)
}

/// Resolve a brand from an explicit hint, then the model prefix, then a
/// brand name embedded in the model text itself.
pub fn resolve_brand(hint: &str, model: &str) -> Option<Brand> {
    Brand::from_hint(hint)
        .or_else(|| infer_brand(model))
        .or_else(|| Brand::from_hint(model))
}
