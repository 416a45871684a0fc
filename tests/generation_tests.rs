//! Integration tests for the generation backends
//!
//! These tests verify:
//! - The variant composition policy (ids, elements, confidence)
//! - Simulated latency against a paused clock
//! - Payload limits enforced at the transport boundary
//! - Decoding of decoration service responses

use proptest::prelude::*;
use roomdecor::models::{ColorPreference, DecorationRequest, DesignStyle, ImageData, RoomType};
use roomdecor::services::http_backend::parse_response;
use roomdecor::services::{
    GenerationClient, GenerationError, SimulatedBackend, compose_result_set, compose_variant,
    confidence_for_ordinal,
};
use roomdecor::{Orchestrator, Phase};
use std::sync::Arc;
use std::time::Duration;

fn request(style: DesignStyle) -> DecorationRequest {
    DecorationRequest {
        image: ImageData::jpeg(vec![0xFFu8, 0xD8, 0xFF, 0xE0]),
        design_style: style,
        room_type: None,
        color_preference: None,
        preserve_existing_furniture: true,
    }
}

fn style_strategy() -> impl Strategy<Value = DesignStyle> {
    prop_oneof![
        Just(DesignStyle::Finnish),
        Just(DesignStyle::Swedish),
        Just(DesignStyle::Arabic),
        Just(DesignStyle::Russian),
        Just(DesignStyle::American),
        Just(DesignStyle::Modern),
        "[A-Z][a-z]{2,10}".prop_map(DesignStyle::Custom),
    ]
}

proptest! {
    #[test]
    fn confidence_is_bounded_and_non_decreasing(ordinal in 1usize..64) {
        let here = confidence_for_ordinal(ordinal);
        let next = confidence_for_ordinal(ordinal + 1);

        prop_assert!((0.0..=1.0).contains(&here));
        prop_assert!(next >= here);
    }

    #[test]
    fn composed_sets_are_well_formed(style in style_strategy(), count in 1usize..8) {
        let request = request(style.clone());
        let results = compose_result_set(&request, count).unwrap();

        prop_assert_eq!(results.len(), count);
        for (index, variant) in results.variants().iter().enumerate() {
            let ordinal = index + 1;
            prop_assert_eq!(&variant.id, &format!("option-{}", ordinal));
            prop_assert_eq!(&variant.design_style, &style);
            prop_assert!(!variant.added_elements.is_empty());
            prop_assert_eq!(variant.added_elements.len(), if ordinal >= 3 { 5 } else { 3 });
            prop_assert_eq!(&variant.image, &request.image);
        }
    }

    #[test]
    fn composition_is_deterministic(style in style_strategy(), ordinal in 1usize..6) {
        let request = request(style);
        prop_assert_eq!(compose_variant(&request, ordinal), compose_variant(&request, ordinal));
    }
}

#[test]
fn test_unknown_style_uses_modern_elements() {
    let custom = compose_variant(&request(DesignStyle::Custom("Japandi".to_string())), 1);
    let modern = compose_variant(&request(DesignStyle::Modern), 1);

    assert_eq!(custom.added_elements, modern.added_elements);
    assert!(custom.description.starts_with("Japandi design variation 1."));
}

#[test]
fn test_bold_variant_gets_statement_elements() {
    let variant = compose_variant(&request(DesignStyle::Arabic), 3);

    assert_eq!(
        variant.added_elements,
        vec![
            "Ornate patterns",
            "Rich tapestries",
            "Geometric art",
            "Statement piece",
            "Accent wall",
        ]
    );
    assert_eq!(
        variant.modified_elements,
        vec![
            "Lighting arrangement",
            "Color coordination",
            "Furniture positioning",
        ]
    );
    assert_eq!(variant.confidence_score, 1.0);
}

#[test]
fn test_analysis_mentions_room_and_color() {
    let mut req = request(DesignStyle::Swedish);
    req.room_type = Some(RoomType::Kitchen);
    req.color_preference = Some(ColorPreference::Warm);

    let results = compose_result_set(&req, 2).unwrap();
    assert_eq!(
        results.analysis(),
        "Analyzed Kitchen with existing furniture and warm color scheme."
    );
}

#[test]
fn test_zero_variants_is_an_error() {
    assert_eq!(
        compose_result_set(&request(DesignStyle::Modern), 0).unwrap_err(),
        GenerationError::EmptyResult
    );
}

#[test]
fn test_best_variant_has_highest_confidence() {
    let results = compose_result_set(&request(DesignStyle::Finnish), 3).unwrap();
    assert_eq!(results.best().id, "option-3");
}

#[tokio::test]
async fn test_simulated_backend_enforces_payload_limit() {
    let backend = SimulatedBackend::new().with_payload_limit(Some(8));
    let mut req = request(DesignStyle::Modern);
    req.image = ImageData::jpeg(vec![0u8; 9]);

    let err = backend.submit(Arc::new(req)).await.unwrap_err();

    assert_eq!(err, GenerationError::PayloadTooLarge { size: 9, limit: 8 });
}

#[tokio::test(start_paused = true)]
async fn test_simulated_delay_keeps_orchestrator_submitting() {
    let backend = SimulatedBackend::new().with_delay(Duration::from_millis(3000));
    let orchestrator = Orchestrator::new(Arc::new(backend), tokio::runtime::Handle::current());
    orchestrator.set_image(ImageData::jpeg(vec![1u8, 2, 3]));
    orchestrator.set_design_style("Russian");

    let started = tokio::time::Instant::now();
    let submission = orchestrator.submit().unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(orchestrator.view().is_loading());

    submission.handle.await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert_eq!(orchestrator.phase(), Phase::Ready);
}

#[test]
fn test_service_failure_message_is_kept() {
    let err = parse_response(r#"{"success": false, "error": "service unavailable"}"#).unwrap_err();

    assert_eq!(err.to_string(), "service unavailable");
}

#[test]
fn test_service_empty_options_rejected() {
    let err = parse_response(r#"{"success": true, "options": []}"#).unwrap_err();
    assert_eq!(err, GenerationError::EmptyResult);
}

#[test]
fn test_service_garbage_is_invalid_response() {
    assert!(matches!(
        parse_response("<html>502 Bad Gateway</html>"),
        Err(GenerationError::InvalidResponse(_))
    ));
}
