use crate::models::{DecorationRequest, DecorationVariant, ImageData, ResultSet};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failures reported by a generation backend.
///
/// `Backend` carries the service's own message and displays it verbatim so the
/// failed state can show exactly what the service said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0}")]
    Backend(String),

    #[error("Image is {size} bytes, above the {limit} byte upload limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Decoration service returned no variants")]
    EmptyResult,

    #[error("Could not reach the decoration service: {0}")]
    Transport(String),

    #[error("Unexpected response from the decoration service: {0}")]
    InvalidResponse(String),
}

/// Asynchronous generation backend.
///
/// `submit` resolves exactly once, with a non-empty [`ResultSet`] or a
/// [`GenerationError`]. Implementations trust the request's business fields
/// (the [`RequestBuilder`](super::RequestBuilder) already validated them) and
/// only check transport constraints such as payload size. They never retry.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn submit(&self, request: Arc<DecorationRequest>) -> Result<ResultSet, GenerationError>;
}

/// Reject payloads above `limit`. `None` means no limit is enforced.
pub fn check_payload(image: &ImageData, limit: Option<usize>) -> Result<(), GenerationError> {
    match limit {
        Some(limit) if image.len() > limit => Err(GenerationError::PayloadTooLarge {
            size: image.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

const MODIFIED_ELEMENTS: [&str; 3] = [
    "Lighting arrangement",
    "Color coordination",
    "Furniture positioning",
];

const STATEMENT_ELEMENTS: [&str; 2] = ["Statement piece", "Accent wall"];

/// Confidence for the variant at `ordinal` (1-based).
///
/// 0.85 + 0.05 per ordinal, capped at 1.0. Computed in hundredths so the
/// values are exact (0.9, 0.95, 1.0, ...).
pub fn confidence_for_ordinal(ordinal: usize) -> f64 {
    let hundredths = ordinal.saturating_mul(5).saturating_add(85).min(100);
    hundredths as f64 / 100.0
}

fn approach_for_ordinal(ordinal: usize) -> &'static str {
    match ordinal {
        1 => "preserves most existing furniture while adding complementary decorative elements",
        2 => "balances existing pieces with new furniture for harmony",
        _ => "boldly transforms the space with creative arrangements",
    }
}

/// Build the variant at `ordinal` (1-based) for `request`.
///
/// Deterministic in the requested style and the ordinal. Bold variants
/// (ordinal 3 and up) also get a statement piece and an accent wall.
pub fn compose_variant(request: &DecorationRequest, ordinal: usize) -> DecorationVariant {
    let style = &request.design_style;

    let mut added_elements: Vec<String> = style
        .signature_elements()
        .iter()
        .map(|e| e.to_string())
        .collect();
    if ordinal >= 3 {
        added_elements.extend(STATEMENT_ELEMENTS.iter().map(|e| e.to_string()));
    }

    DecorationVariant {
        id: format!("option-{}", ordinal),
        design_style: style.clone(),
        image: request.image.clone(),
        description: format!(
            "{} design variation {}. This approach {}.",
            style,
            ordinal,
            approach_for_ordinal(ordinal)
        ),
        added_elements,
        modified_elements: MODIFIED_ELEMENTS.iter().map(|e| e.to_string()).collect(),
        confidence_score: confidence_for_ordinal(ordinal),
    }
}

/// Summary line describing the analyzed photo
pub fn room_analysis(request: &DecorationRequest) -> String {
    let room = request
        .room_type
        .as_ref()
        .map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "room".to_string());
    let color = request
        .color_preference
        .as_ref()
        .map(|c| c.as_str().to_lowercase())
        .unwrap_or_else(|| "neutral".to_string());

    format!(
        "Analyzed {} with existing furniture and {} color scheme.",
        room, color
    )
}

/// Compose `count` variants for `request`
pub fn compose_result_set(
    request: &DecorationRequest,
    count: usize,
) -> Result<ResultSet, GenerationError> {
    let variants = (1..=count)
        .map(|ordinal| compose_variant(request, ordinal))
        .collect();

    ResultSet::new(variants, room_analysis(request)).ok_or(GenerationError::EmptyResult)
}

/// In-process backend producing deterministic variants after a fixed delay.
///
/// The rendered image of every variant is the submitted photo itself; the
/// descriptive fields follow the composition policy in [`compose_variant`].
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    variant_count: usize,
    delay: Duration,
    payload_limit: Option<usize>,
}

impl SimulatedBackend {
    /// Three variants, no delay, no payload limit
    pub fn new() -> Self {
        Self {
            variant_count: 3,
            delay: Duration::ZERO,
            payload_limit: None,
        }
    }

    pub fn with_variant_count(mut self, count: usize) -> Self {
        self.variant_count = count;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_payload_limit(mut self, limit: Option<usize>) -> Self {
        self.payload_limit = limit;
        self
    }

    pub fn from_settings(settings: &crate::models::DecoratorSettings) -> Self {
        Self::new()
            .with_variant_count(settings.effective_variant_count())
            .with_delay(Duration::from_millis(settings.simulated_delay_ms))
            .with_payload_limit(settings.payload_limit())
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationClient for SimulatedBackend {
    async fn submit(&self, request: Arc<DecorationRequest>) -> Result<ResultSet, GenerationError> {
        check_payload(&request.image, self.payload_limit)?;

        tracing::debug!(
            "Simulating generation: style={}, variants={}, delay={:?}",
            request.design_style,
            self.variant_count,
            self.delay
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        compose_result_set(&request, self.variant_count)
    }
}
