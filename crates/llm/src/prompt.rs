//! Classification prompt and response extraction

use once_cell::sync::Lazy;
use regex::Regex;

use watch_catalog_core::{
    AttributeValue, BraceletColor, BraceletType, CaseMaterial, DialColor, Gender, Movement,
};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*```[A-Za-z]*\s*$").unwrap());
static OBJECT_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

fn allowed_line<T: AttributeValue>() -> String {
    let labels = T::labels()
        .iter()
        .map(|l| format!("\"{}\"", l))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}: [{}]\n", T::FIELD, labels)
}

/// Build the classification prompt.
///
/// The text depends only on its inputs so identical requests produce
/// identical prompts.
pub fn build_classifier_prompt(model: &str, brand_hint: &str) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("You are a watch data extraction engine, not a chatbot.\n");
    prompt.push_str("Given a watch model number, return the most accurate product attributes.\n");
    prompt.push_str(
        "Do not guess randomly; use the full model number, its suffix and the series reputation.\n",
    );
    prompt.push_str("Return strict JSON only, without explanation.\n\n");

    prompt.push_str(&format!("MODEL_NUMBER: {}\n", model));
    prompt.push_str(&format!("BRAND_HINT: {}\n\n", brand_hint));

    prompt.push_str("ALLOWED VALUES ONLY:\n");
    prompt.push_str(&allowed_line::<DialColor>());
    prompt.push_str(&allowed_line::<BraceletType>());
    prompt.push_str(&allowed_line::<Gender>());
    prompt.push_str(&allowed_line::<Movement>());
    prompt.push_str(&allowed_line::<BraceletColor>());
    prompt.push_str(&allowed_line::<CaseMaterial>());
    prompt.push('\n');

    prompt.push_str("RULES:\n");
    prompt.push_str("- Classify this model on its own.\n");
    prompt.push_str("- Read the whole model number including the variant suffix.\n");
    prompt.push_str("- Do not default every field to black.\n");
    prompt.push_str("- Dial color follows the variant:\n");
    prompt.push_str("  * SPB121 -> Yaşıl, T120.407.11.041.03 -> Göy, NJ0180-80M -> Göy\n");
    prompt.push_str("- Series rules come first:\n");
    prompt.push_str("  * GA/GMA/GM/DW/GA-B/MTP => Kvarts\n");
    prompt.push_str("  * EFB/ECB/EFV => Kvarts with Polad bracelet, dial Göy or Qara\n");
    prompt.push_str("  * NY/NJ/NH/SPB/SBDC/T120.407 => Mexanika\n");
    prompt.push_str("  * BN => Kvarts with Kauçuk, never Dəri\n");
    prompt.push_str("  * T137.407 (PRX) => Polad bracelet only\n");
    prompt.push_str("  * RA/FAC/AC/SSA => Mexanika with Dəri, light classic dial\n");
    prompt.push_str("- Bracelet color:\n");
    prompt.push_str("  * Dəri => Gəhvəyi or Qara, Polad => Boz\n");
    prompt.push_str("  * Kauçuk => Qara unless clearly colored\n");
    prompt.push_str(
        "- Case material: Polad for most models, Plastik or Rezin for resin sport models.\n",
    );
    prompt.push_str("- Gender is Kişi unless the line is clearly a women's line.\n");
    prompt.push_str("- When unsure pick the most common official retail configuration.\n");
    prompt.push_str("- Never leave a field empty.\n\n");

    prompt.push_str("Output JSON keys exactly: ");
    prompt.push_str(
        &[
            DialColor::FIELD,
            BraceletType::FIELD,
            Gender::FIELD,
            Movement::FIELD,
            BraceletColor::FIELD,
            CaseMaterial::FIELD,
        ]
        .join(", "),
    );

    prompt
}

/// Pull a JSON object out of free-form model output.
///
/// Markdown code fences are dropped, then the whole text is parsed; failing
/// that, the outermost `{...}` span is tried. Anything that is not a JSON
/// object yields `None`.
pub fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    let cleaned = CODE_FENCE.replace_all(text, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        return value.is_object().then_some(value);
    }

    let span = OBJECT_SPAN.find(cleaned)?;
    serde_json::from_str::<serde_json::Value>(span.as_str())
        .ok()
        .filter(|v| v.is_object())
}
