//! Case size labels
//!
//! Display format is `Ölçü - {A} x {B} mm`. Existing catalog text is
//! normalized when it carries a millimetre measurement; otherwise the size is
//! estimated from model-family tables and per-brand defaults.

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::Brand;

use crate::brand::resolve_brand;

/// Size used when neither the model family nor the brand is known
pub const DEFAULT_SIZE_MM: &str = "41";

static SIZE_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{2}(?:[.,]\d{1,2})?)\s*[x×]\s*(\d{2}(?:[.,]\d{1,2})?)\s*mm").unwrap()
});
static SIZE_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{2}(?:[.,]\d{1,2})?)\s*mm").unwrap());

static MODEL_SIZES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| vec![
    (Regex::new(r"^(GA-B\d|GAB\d|GA-\d|G-\d|DW-\d)").unwrap(), "45"),
    (Regex::new(r"^(F-91W|AE-1200)").unwrap(), "36"),
    (Regex::new(r"^SPB").unwrap(), "40.5"),
    (Regex::new(r"^(SRPD|SRPE|SRPG|SNZH|SKX)").unwrap(), "42"),
    (Regex::new(r"^SNXS").unwrap(), "37"),
    (Regex::new(r"^(NY\d|BN\d)").unwrap(), "42"),
    (Regex::new(r"^(RA-AA|RA-AC|RAAA|RAAC)").unwrap(), "42"),
    (Regex::new(r"^T137").unwrap(), "40"),
    (Regex::new(r"^T127").unwrap(), "40"),
    (Regex::new(r"^(L3\.|L2\.|L4\.)").unwrap(), "39"),
    (Regex::new(r"^(M0|M8|H3|H4)").unwrap(), "40"),
]);

fn brand_default_size(brand: Brand) -> Option<&'static str> {
    match brand {
        Brand::Casio => Some("42"),
        Brand::Seiko => Some("41"),
        Brand::Citizen => Some("42"),
        Brand::Orient => Some("42"),
        Brand::Tissot => Some("40"),
        Brand::Rolex => Some("41"),
        Brand::Omega => Some("42"),
        Brand::Longines => Some("39"),
        Brand::Tudor => Some("41"),
        Brand::Hamilton => Some("40"),
        Brand::Timex => Some("40"),
        _ => None,
    }
}

fn size_label(a: &str, b: &str) -> String {
    format!("Ölçü - {} x {} mm", a, b)
}

/// Render a measurement without a trailing `.0` ("40,50" -> "40.5", "42.0" -> "42")
fn format_mm(raw: &str) -> String {
    let dotted = raw.replace(',', ".");
    match dotted.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Ok(v) => format!("{}", v),
        Err(_) => dotted,
    }
}

/// Estimate a size label from the model family, then the brand
pub fn estimate_size_label(model: &str, brand_hint: &str) -> String {
    let m = model.trim().to_uppercase();

    if let Some((_, size)) = MODEL_SIZES.iter().find(|(re, _)| re.is_match(&m)) {
        return size_label(size, size);
    }

    let size = resolve_brand(brand_hint, &m)
        .and_then(brand_default_size)
        .unwrap_or(DEFAULT_SIZE_MM);
    size_label(size, size)
}

/// Normalize existing size text, falling back to an estimate
pub fn normalize_size_label(value: &str, model: &str, brand_hint: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        return estimate_size_label(model, brand_hint);
    }

    if let Some(caps) = SIZE_PAIR.captures(v) {
        let a = format_mm(&caps[1]);
        let b = format_mm(&caps[2]);
        return size_label(&a, &b);
    }

    if let Some(caps) = SIZE_SINGLE.captures(v) {
        let a = format_mm(&caps[1]);
        return size_label(&a, &a);
    }

    estimate_size_label(model, brand_hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pair() {
        assert_eq!(normalize_size_label("40 x 47 mm", "X", ""), "Ölçü - 40 x 47 mm");
        assert_eq!(
            normalize_size_label("Ölçü - 40,50×46MM", "X", ""),
            "Ölçü - 40.5 x 46 mm"
        );
        assert_eq!(normalize_size_label("42.0 X 42.00 mm", "X", ""), "Ölçü - 42 x 42 mm");
    }

    #[test]
    fn test_normalize_single() {
        assert_eq!(normalize_size_label("38mm", "X", ""), "Ölçü - 38 x 38 mm");
        assert_eq!(normalize_size_label("case 40.25 mm", "X", ""), "Ölçü - 40.25 x 40.25 mm");
    }

    #[test]
    fn test_unparseable_falls_back_to_estimate() {
        assert_eq!(normalize_size_label("Uyğun deyil", "GA-2100-1A1", ""), "Ölçü - 45 x 45 mm");
        assert_eq!(normalize_size_label("", "SPB143J1", ""), "Ölçü - 40.5 x 40.5 mm");
    }

    #[test]
    fn test_model_family_sizes() {
        assert_eq!(estimate_size_label("F-91W-1", ""), "Ölçü - 36 x 36 mm");
        assert_eq!(estimate_size_label("SNXS79K1", ""), "Ölçü - 37 x 37 mm");
        assert_eq!(estimate_size_label("ny0040-09w", ""), "Ölçü - 42 x 42 mm");
        assert_eq!(estimate_size_label("L3.781.4.96.6", ""), "Ölçü - 39 x 39 mm");
        assert_eq!(estimate_size_label("T137.407.11.041.00", ""), "Ölçü - 40 x 40 mm");
    }

    #[test]
    fn test_brand_defaults() {
        assert_eq!(estimate_size_label("EFV-540D", ""), "Ölçü - 42 x 42 mm");
        assert_eq!(estimate_size_label("XYZ1", "Rolex"), "Ölçü - 41 x 41 mm");
        assert_eq!(estimate_size_label("XYZ1", "Bulova"), "Ölçü - 41 x 41 mm");
        assert_eq!(estimate_size_label("XYZ1", ""), "Ölçü - 41 x 41 mm");
        assert_eq!(estimate_size_label("126610LN", "TUDOR"), "Ölçü - 41 x 41 mm");
    }
}
