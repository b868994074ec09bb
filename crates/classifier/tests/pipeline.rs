//! End-to-end scenarios for the classification pipeline
//!
//! The language model is replaced by a scripted backend so every path
//! (no key, good answer, garbage, transport error) is exercised offline.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use watch_catalog_classifier::{
    classify_heuristic, AiClassifier, ClassificationSource, InMemoryCatalogStore, JsonCatalogStore,
    WatchPipeline,
};
use watch_catalog_core::{
    AttributeValue, BraceletType, CaseMaterial, CatalogRecord, DialColor, Error, Movement,
    ALL_PRODUCTS,
};
use watch_catalog_llm::{LlmBackend, LlmError};

/// Backend that replays a fixed reply and records the prompts it saw
struct ScriptedBackend {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| LlmError::Api("HTTP 503 Service Unavailable: overloaded".to_string()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn heuristic_pipeline() -> WatchPipeline {
    WatchPipeline::new(Arc::new(InMemoryCatalogStore::new()), AiClassifier::heuristic_only())
}

fn ai_pipeline(backend: Arc<ScriptedBackend>) -> WatchPipeline {
    WatchPipeline::new(
        Arc::new(InMemoryCatalogStore::new()),
        AiClassifier::new(Some(backend as Arc<dyn LlmBackend>)),
    )
}

const DRESS_LEATHER_REPLY: &str = concat!(
    "```json\n",
    r#"{"sr_dial_color":"Qara","bracelet_type":"Dəri","gender":"Kişi","#,
    r#""movement":"Mexanika","bracelet_color":"Gəhvəyi","case_material":"Polad"}"#,
    "\n```"
);

#[tokio::test]
async fn test_sport_resin_record() {
    let record = heuristic_pipeline().build_record("Casio G-Shock GA-2100-1A1").await.unwrap();

    assert_eq!(record.sku, "GA-2100-1A1");
    assert_eq!(record.brand, "CASIO");
    assert_eq!(record.movement, "Kvarts");
    assert_eq!(record.case_material, "Plastik");
    assert_eq!(record.bracelet, "Bilərzik - Kauçuk");
    assert_eq!(record.size, "Ölçü - 45 x 45 mm");

    let collections = record.collections();
    assert_eq!(collections[0], ALL_PRODUCTS);
    assert_eq!(collections[1], "CASIO");
    assert!(collections.contains(&"Kvarts".to_string()));
}

#[tokio::test]
async fn test_mechanical_diver() {
    let out = heuristic_pipeline().classify("NY0040", "").await.unwrap();
    assert_eq!(out.model_code.series, "NY");

    let attrs = out.classification.attributes;
    assert_eq!(attrs.movement, Movement::Mechanical);
    assert_eq!(attrs.bracelet_type, BraceletType::Rubber);
    assert!(matches!(
        attrs.dial_color,
        DialColor::Blue | DialColor::Black | DialColor::Yellow
    ));
}

#[tokio::test]
async fn test_bn_stays_quartz_on_rubber_even_when_ai_disagrees() {
    let backend = ScriptedBackend::replying(DRESS_LEATHER_REPLY);
    let out = ai_pipeline(backend).classify("BN0193", "").await.unwrap();

    assert_eq!(out.classification.source, ClassificationSource::Ai);
    assert_eq!(out.classification.attributes.movement, Movement::Quartz);
    assert_ne!(out.classification.attributes.bracelet_type, BraceletType::Leather);
}

#[tokio::test]
async fn test_empty_input() {
    let err = heuristic_pipeline().build_record("   ").await.unwrap_err();
    assert_eq!(err, Error::ModelInputEmpty);
    assert_eq!(err.code(), "MODEL_INPUT_EMPTY");
}

#[tokio::test]
async fn test_prx_keeps_steel_bracelet_when_ai_says_leather() {
    let backend = ScriptedBackend::replying(DRESS_LEATHER_REPLY);
    let pipeline = ai_pipeline(backend.clone());

    let record = pipeline.build_record("T137.407.11.041.00").await.unwrap();
    assert_eq!(record.bracelet, "Bilərzik - Polad");
    assert_eq!(record.bracelet_color, "KR - Boz");
    assert_eq!(record.movement, "Mexanika");
    assert_eq!(record.brand, "TISSOT");

    let prompts = backend.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("MODEL_NUMBER: T137.407.11.041.00"));
    assert!(prompts[0].contains("BRAND_HINT: TISSOT"));
}

#[tokio::test]
async fn test_ai_failures_fall_back_to_heuristic() {
    let model = "SRPD55K1";
    let expected = classify_heuristic(model, "SEIKO");

    for reply in ["definitely a nice watch", "[1, 2, 3]", "\"Qara\"", ""] {
        let out = ai_pipeline(ScriptedBackend::replying(reply))
            .classify(model, "SEIKO")
            .await
            .unwrap();
        assert_eq!(out.classification.source, ClassificationSource::Fallback, "{:?}", reply);
        assert_eq!(out.classification.attributes, expected);
    }

    let out = ai_pipeline(ScriptedBackend::failing()).classify(model, "SEIKO").await.unwrap();
    assert_eq!(out.classification.source, ClassificationSource::Fallback);
    assert_eq!(out.classification.attributes, expected);
}

#[tokio::test]
async fn test_out_of_domain_ai_values_are_clamped() {
    let reply = concat!(
        r#"{"sr_dial_color":"Purple","bracelet_type":"titanium","gender":"qadın","#,
        r#""movement":"Solar","bracelet_color":"","case_material":"CERAMIC"}"#
    );
    let out = ai_pipeline(ScriptedBackend::replying(reply))
        .classify("SRPD55K1", "SEIKO")
        .await
        .unwrap();

    let attrs = out.classification.attributes;
    assert_eq!(out.classification.source, ClassificationSource::Ai);
    assert_eq!(attrs.gender.label(), "Qadın");
    assert_eq!(attrs.bracelet_type, BraceletType::Steel);
    assert_eq!(attrs.case_material, CaseMaterial::Steel);
    assert_eq!(attrs.movement, Movement::Mechanical);
}

#[tokio::test]
async fn test_catalog_record_is_merged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model_specs_catalog.json");
    std::fs::write(
        &path,
        r#"{
            "SRPE55K1": {
                "name": "Seiko 5 Sports SRPE55K1",
                "brand": "SEIKO",
                "price": 289,
                "image_url": "https://example.com/srpe55.jpg",
                "siferblat_rengi": "SR - Ağ",
                "bilerzik": "Uyğun deyil",
                "olcu": "42,5 mm",
                "mexanizm": null
            }
        }"#,
    )
    .unwrap();

    let catalog = Arc::new(JsonCatalogStore::load(&path).unwrap());
    let pipeline = WatchPipeline::new(catalog, AiClassifier::heuristic_only());
    let record = pipeline.build_record("Seiko SRPE55K1").await.unwrap();

    assert_eq!(record.name, "Seiko 5 Sports SRPE55K1");
    assert_eq!(record.price, "289");
    assert_eq!(record.dial, "SR - Ağ");
    assert_eq!(record.size, "Ölçü - 42.5 x 42.5 mm");
    assert!(record.bracelet.starts_with("Bilərzik - "));
    assert!(!record.bracelet.contains("Uyğun"));
    assert_eq!(record.movement, "Mexanika");

    let collections = record.collections();
    assert_eq!(collections[1], "SEİKO");
}

#[tokio::test]
async fn test_unknown_model_gets_synthesized_record() {
    let record = heuristic_pipeline().build_record("XYZ123").await.unwrap();
    assert_eq!(record.name, "Watch XYZ123");
    assert_eq!(record.brand, ALL_PRODUCTS);
    assert_eq!(record.dial, "SR - Boz");
    assert_eq!(record.size, "Ölçü - 41 x 41 mm");
    assert!(!record.image_url.is_empty());
}

#[tokio::test]
async fn test_strict_series_mode() {
    let pipeline = heuristic_pipeline().with_require_known_series(true);
    assert_eq!(
        pipeline.build_record("ABCDEF1").await.unwrap_err(),
        Error::SeriesCodeNotIdentified
    );
    assert!(pipeline.build_record("GA-2100-1A1").await.is_ok());
}

#[tokio::test]
async fn test_catalog_entry_cannot_override_invariants() {
    let mut catalog = InMemoryCatalogStore::new();
    catalog.insert(
        "BN0193-17E",
        CatalogRecord {
            brand: "CITIZEN".to_string(),
            bracelet: "Bilərzik - Dəri".to_string(),
            movement: "Mexanika".to_string(),
            ..Default::default()
        },
    );
    let pipeline = WatchPipeline::new(Arc::new(catalog), AiClassifier::heuristic_only());
    let record = pipeline.build_record("BN0193-17E").await.unwrap();

    assert_eq!(record.movement, "Kvarts");
    assert_eq!(record.bracelet, "Bilərzik - Kauçuk");
}
