//! Catalog product records
//!
//! A [`CatalogRecord`] is what the storefront import consumes. Display fields
//! carry short Azerbaijani labels ("SR - Qara", "KR - Boz"); the on-disk and
//! wire keys keep the storefront's transliterated names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::attributes::{Attributes, RawAttributes};
use crate::brand::Brand;

/// Catch-all collection every product belongs to
pub const ALL_PRODUCTS: &str = "Bütün Məhsullar";

/// Image used when the catalog has no product photo
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://dummyimage.com/1200x1200/e9ecef/212529.jpg?text=No+Image";

static DIAL_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*SR\s*-\s*").unwrap());
static BRACELET_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*Bilərzik\s*-\s*").unwrap());
static GENDER_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*Cinsi\s*-\s*").unwrap());
static BRACELET_COLOR_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*KR\s*-\s*").unwrap());

static HANDLE_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static HANDLE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HANDLE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Storefront product record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: String,
    /// "SR - {dial color}"
    #[serde(rename = "siferblat_rengi", default, deserialize_with = "lenient_string")]
    pub dial: String,
    /// "Bilərzik - {bracelet type}"
    #[serde(rename = "bilerzik", default, deserialize_with = "lenient_string")]
    pub bracelet: String,
    /// "Cinsi - {gender}"
    #[serde(rename = "cinsi", default, deserialize_with = "lenient_string")]
    pub gender: String,
    /// "Ölçü - {A} x {B} mm"
    #[serde(rename = "olcu", default, deserialize_with = "lenient_string")]
    pub size: String,
    #[serde(rename = "mexanizm", default, deserialize_with = "lenient_string")]
    pub movement: String,
    /// "KR - {bracelet color}"
    #[serde(rename = "kemer_rengi", default, deserialize_with = "lenient_string")]
    pub bracelet_color: String,
    #[serde(rename = "korpus", default, deserialize_with = "lenient_string")]
    pub case_material: String,
    /// Normalized model code; filled by the pipeline
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
    /// Storefront URL slug; filled by the pipeline
    #[serde(rename = "handleId", default, skip_serializing_if = "String::is_empty")]
    pub handle_id: String,
}

impl CatalogRecord {
    /// Minimal record for a model missing from the catalog
    pub fn synthesized(model: &str, brand: Option<Brand>) -> Self {
        let prefix = brand.map(|b| b.collection_label()).unwrap_or("Watch");
        Self {
            name: format!("{} {}", prefix, model).trim().to_string(),
            brand: brand
                .map(|b| b.name().to_string())
                .unwrap_or_else(|| ALL_PRODUCTS.to_string()),
            description: format!("Watch Model: {}", model),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            ..Default::default()
        }
    }

    /// Display values with their labels stripped
    pub fn display_attributes(&self) -> RawAttributes {
        let strip = |re: &Regex, v: &str| re.replace(v, "").trim().to_string();
        RawAttributes {
            dial_color: Some(strip(&DIAL_LABEL, &self.dial)),
            bracelet_type: Some(strip(&BRACELET_LABEL, &self.bracelet)),
            gender: Some(strip(&GENDER_LABEL, &self.gender)),
            movement: Some(self.movement.trim().to_string()),
            bracelet_color: Some(strip(&BRACELET_COLOR_LABEL, &self.bracelet_color)),
            case_material: Some(self.case_material.trim().to_string()),
        }
    }

    /// Overwrite every attribute display field from validated attributes
    pub fn set_display_attributes(&mut self, attrs: &Attributes) {
        self.dial = dial_label(attrs.dial_color);
        self.bracelet = format!("Bilərzik - {}", attrs.bracelet_type);
        self.gender = format!("Cinsi - {}", attrs.gender);
        self.movement = attrs.movement.to_string();
        self.bracelet_color = format!("KR - {}", attrs.bracelet_color);
        self.case_material = attrs.case_material.to_string();
    }

    /// Ordered, de-duplicated storefront collections
    pub fn collections(&self) -> Vec<String> {
        let mut out = vec![ALL_PRODUCTS.to_string()];
        if let Some(brand) = Brand::from_name(&self.brand) {
            out.push(brand.collection_label().to_string());
        }
        for field in [
            &self.dial,
            &self.bracelet,
            &self.gender,
            &self.size,
            &self.movement,
            &self.bracelet_color,
            &self.case_material,
        ] {
            let v = field.trim();
            if !v.is_empty() {
                out.push(v.to_string());
            }
        }

        let mut seen = std::collections::HashSet::new();
        out.retain(|c| seen.insert(c.clone()));
        out
    }
}

/// Storefront handle for a model code.
///
/// Lowercased, stripped to ASCII letters, digits and dashes, with whitespace
/// runs turned into single dashes. Never empty.
pub fn handle_id(model: &str) -> String {
    let lowered = model.to_lowercase();
    let kept = HANDLE_DISALLOWED.replace_all(&lowered, "");
    let dashed = HANDLE_SPACES.replace_all(kept.trim(), "-");
    let handle = HANDLE_DASHES.replace_all(&dashed, "-");
    if handle.is_empty() {
        "product".to_string()
    } else {
        handle.into_owned()
    }
}

/// Dial display label
pub fn dial_label(color: crate::attributes::DialColor) -> String {
    format!("SR - {}", color)
}

/// True for empty display values and the storefront's "not applicable" marker.
///
/// Matching ignores case and diacritics, so "Uyğun deyil" and "UYGUN DEYIL"
/// are both placeholders.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    deunicode::deunicode(trimmed)
        .to_lowercase()
        .contains("uygun deyil")
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{BraceletColor, BraceletType, DialColor, Movement};

    #[test]
    fn test_handle_id() {
        assert_eq!(handle_id("GA-2100-1A1"), "ga-2100-1a1");
        assert_eq!(handle_id("T137.407.11.041.00"), "t13740711104100");
        assert_eq!(handle_id("  NY0040  09W "), "ny0040-09w");
        assert_eq!(handle_id("SRPD55K1 -- Seiko"), "srpd55k1-seiko");
        assert_eq!(handle_id("???"), "product");
        assert_eq!(handle_id(""), "product");
    }

    #[test]
    fn test_handle_id_serialized_as_handle_id_key() {
        let record = CatalogRecord {
            handle_id: "ga-2100-1a1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["handleId"], "ga-2100-1a1");
        assert!(serde_json::to_value(CatalogRecord::default()).unwrap().get("handleId").is_none());
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("SR - Uyğun deyil"));
        assert!(is_placeholder("UYGUN DEYIL"));
        assert!(is_placeholder("uyğun deyil"));
        assert!(!is_placeholder("SR - Qara"));
    }

    #[test]
    fn test_display_round_trip() {
        let mut record = CatalogRecord::default();
        let attrs = Attributes {
            dial_color: DialColor::Blue,
            bracelet_type: BraceletType::Steel,
            movement: Movement::Quartz,
            bracelet_color: BraceletColor::Grey,
            ..Attributes::SAFE_DEFAULTS
        };
        record.set_display_attributes(&attrs);
        assert_eq!(record.dial, "SR - Göy");
        assert_eq!(record.bracelet, "Bilərzik - Polad");
        assert_eq!(record.movement, "Kvarts");
        assert_eq!(record.bracelet_color, "KR - Boz");

        let raw = record.display_attributes();
        assert_eq!(raw.clamp_with(&Attributes::SAFE_DEFAULTS), attrs);
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        let record = CatalogRecord {
            dial: "sr-Qara".to_string(),
            bracelet: "BILƏRZIK -  Dəri".to_string(),
            ..Default::default()
        };
        let raw = record.display_attributes();
        assert_eq!(raw.dial_color.as_deref(), Some("Qara"));
        assert_eq!(raw.bracelet_type.as_deref(), Some("Dəri"));
    }

    #[test]
    fn test_synthesized_record() {
        let record = CatalogRecord::synthesized("SRPD55K1", Some(Brand::Seiko));
        assert_eq!(record.name, "SEİKO SRPD55K1");
        assert_eq!(record.brand, "SEIKO");
        assert_eq!(record.description, "Watch Model: SRPD55K1");
        assert_eq!(record.image_url, PLACEHOLDER_IMAGE_URL);
        assert!(record.price.is_empty());

        let unknown = CatalogRecord::synthesized("XYZ123", None);
        assert_eq!(unknown.name, "Watch XYZ123");
        assert_eq!(unknown.brand, ALL_PRODUCTS);
    }

    #[test]
    fn test_collections_dedup_and_order() {
        let record = CatalogRecord {
            brand: "SEIKO".to_string(),
            dial: "SR - Qara".to_string(),
            movement: "Mexanika".to_string(),
            case_material: "Mexanika".to_string(),
            ..Default::default()
        };
        assert_eq!(
            record.collections(),
            vec!["Bütün Məhsullar", "SEİKO", "SR - Qara", "Mexanika"]
        );
    }

    #[test]
    fn test_lenient_deserialize() {
        let record: CatalogRecord = serde_json::from_value(serde_json::json!({
            "name": "Casio GA-2100",
            "price": 149.9,
            "siferblat_rengi": null
        }))
        .unwrap();
        assert_eq!(record.price, "149.9");
        assert!(record.dial.is_empty());
        assert!(record.case_material.is_empty());
    }
}
