//! Merge validated attributes into a catalog record

use watch_catalog_core::{
    dial_label, handle_id, is_placeholder, Attributes, CatalogRecord, ALL_PRODUCTS,
};

use crate::brand::infer_brand;
use crate::context::RuleContext;
use crate::size::normalize_size_label;
use crate::validation::validate_raw;

fn fill_placeholder(field: &mut String, value: String) {
    if is_placeholder(field) {
        *field = value;
    }
}

/// Combine a base record with classified attributes.
///
/// Catalog display values win unless they are empty or marked not
/// applicable. The merged values are then gated again, so a catalog entry
/// cannot reintroduce an illegal combination; the gate's final override
/// pass also re-applies pinned dials and the diver dial rule.
pub fn merge_record(base: CatalogRecord, classified: &Attributes, model: &str) -> CatalogRecord {
    let mut out = base;

    if out.brand.trim().is_empty() {
        out.brand = infer_brand(model)
            .map(|b| b.name().to_string())
            .unwrap_or_else(|| ALL_PRODUCTS.to_string());
    }

    out.size = normalize_size_label(&out.size, model, &out.brand);

    fill_placeholder(&mut out.dial, dial_label(classified.dial_color));
    fill_placeholder(&mut out.bracelet, format!("Bilərzik - {}", classified.bracelet_type));
    fill_placeholder(&mut out.gender, format!("Cinsi - {}", classified.gender));
    fill_placeholder(&mut out.movement, classified.movement.to_string());
    fill_placeholder(&mut out.bracelet_color, format!("KR - {}", classified.bracelet_color));
    fill_placeholder(&mut out.case_material, classified.case_material.to_string());

    let ctx = RuleContext::new(model, &out.brand);
    let validated = validate_raw(&out.display_attributes(), &ctx);
    out.set_display_attributes(&validated);

    out.handle_id = handle_id(&ctx.model);
    out.sku = ctx.model.clone();
    out
}
