//! Core types for the watch catalog classifier
//!
//! This crate provides the foundational types shared by every other crate:
//! - Closed attribute vocabularies and attribute bundles
//! - Known brands and their storefront collections
//! - Parsed model codes
//! - Catalog records and the catalog store trait
//! - Error types

pub mod attributes;
pub mod brand;
pub mod catalog;
pub mod error;
pub mod model_code;
pub mod record;

pub use attributes::{
    AttributeBundle, AttributeValue, Attributes, BraceletColor, BraceletType, CaseMaterial,
    DialColor, Gender, Movement, RawAttributes,
};
pub use brand::Brand;
pub use catalog::CatalogStore;
pub use error::{Error, Result};
pub use model_code::{compact_key, ModelCode, GENERIC_SERIES};
pub use record::{
    dial_label, handle_id, is_placeholder, CatalogRecord, ALL_PRODUCTS, PLACEHOLDER_IMAGE_URL,
};
