use super::generation::{GenerationClient, GenerationError, check_payload};
use crate::models::{DecorationRequest, DecorationVariant, DesignStyle, ImageData, ResultSet};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// JSON body returned by the decoration service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecorateResponse {
    success: bool,
    #[serde(default)]
    original_image_analysis: String,
    #[serde(default)]
    options: Vec<WireVariant>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariant {
    id: String,
    design_style: String,
    image_base64: String,
    description: String,
    added_elements: Vec<String>,
    #[serde(default)]
    modified_elements: Vec<String>,
    confidence_score: f64,
}

/// Generation client for a remote decoration service.
///
/// Posts the request as a multipart form (`image`, `designStyle`, `roomType`,
/// `colorPreference`, `preserveExistingFurniture`) and decodes the JSON reply.
/// One HTTP call per submission; no retries.
pub struct HttpGenerationClient {
    http: reqwest::Client,
    endpoint: String,
    payload_limit: Option<usize>,
}

impl HttpGenerationClient {
    /// Create a client for `endpoint` with a per-request transport timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            payload_limit: None,
        })
    }

    pub fn with_payload_limit(mut self, limit: Option<usize>) -> Self {
        self.payload_limit = limit;
        self
    }

    pub fn from_settings(settings: &crate::models::DecoratorSettings) -> Result<Self> {
        Ok(Self::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.request_timeout),
        )?
        .with_payload_limit(settings.payload_limit()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: &DecorationRequest) -> Result<Form, GenerationError> {
        let image = Part::bytes(request.image.bytes().to_vec())
            .file_name("room")
            .mime_str(request.image.media_type())
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Form::new()
            .part("image", image)
            .text("designStyle", request.design_style.to_string())
            .text(
                "roomType",
                request
                    .room_type
                    .as_ref()
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
            )
            .text(
                "colorPreference",
                request
                    .color_preference
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            )
            .text(
                "preserveExistingFurniture",
                request.preserve_existing_furniture.to_string(),
            ))
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn submit(&self, request: Arc<DecorationRequest>) -> Result<ResultSet, GenerationError> {
        check_payload(&request.image, self.payload_limit)?;

        let form = Self::build_form(&request)?;

        tracing::info!(
            "Posting decoration request to {} (style={}, {} bytes)",
            self.endpoint,
            request.design_style,
            request.image.len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!("Decoration service returned {}", status);
            return Err(error_from_body(&body).unwrap_or_else(|| {
                GenerationError::Backend(format!("Service returned error: {}", status))
            }));
        }

        parse_response(&body)
    }
}

/// Extract the service's error message from a failure body, if it has one
fn error_from_body(body: &str) -> Option<GenerationError> {
    let parsed: DecorateResponse = serde_json::from_str(body).ok()?;
    parsed.error.map(GenerationError::Backend)
}

/// Decode a decoration service response body into a [`ResultSet`]
pub fn parse_response(body: &str) -> Result<ResultSet, GenerationError> {
    let parsed: DecorateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    if !parsed.success {
        let message = parsed
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(GenerationError::Backend(message));
    }

    let variants = parsed
        .options
        .into_iter()
        .map(convert_variant)
        .collect::<Result<Vec<_>, _>>()?;
    check_ordering(&variants)?;

    ResultSet::new(variants, parsed.original_image_analysis).ok_or(GenerationError::EmptyResult)
}

/// Ids must be unique and confidence must not decrease by position
fn check_ordering(variants: &[DecorationVariant]) -> Result<(), GenerationError> {
    let mut seen = HashSet::new();
    for variant in variants {
        if !seen.insert(variant.id.as_str()) {
            return Err(GenerationError::InvalidResponse(format!(
                "duplicate variant id {}",
                variant.id
            )));
        }
    }

    if let Some(pair) = variants
        .windows(2)
        .find(|pair| pair[1].confidence_score < pair[0].confidence_score)
    {
        return Err(GenerationError::InvalidResponse(format!(
            "variant {} has confidence {} below {} of {}",
            pair[1].id, pair[1].confidence_score, pair[0].confidence_score, pair[0].id
        )));
    }

    Ok(())
}

fn convert_variant(wire: WireVariant) -> Result<DecorationVariant, GenerationError> {
    if !(0.0..=1.0).contains(&wire.confidence_score) {
        return Err(GenerationError::InvalidResponse(format!(
            "variant {} has confidence {} outside [0, 1]",
            wire.id, wire.confidence_score
        )));
    }

    if wire.added_elements.is_empty() {
        return Err(GenerationError::InvalidResponse(format!(
            "variant {} lists no added elements",
            wire.id
        )));
    }

    let design_style = DesignStyle::parse(&wire.design_style).ok_or_else(|| {
        GenerationError::InvalidResponse(format!("variant {} has no design style", wire.id))
    })?;

    Ok(DecorationVariant {
        image: decode_image(&wire.image_base64)?,
        id: wire.id,
        design_style,
        description: wire.description,
        added_elements: wire.added_elements,
        modified_elements: wire.modified_elements,
        confidence_score: wire.confidence_score,
    })
}

/// Decode plain base64 or a `data:<mime>;base64,<payload>` URL
fn decode_image(encoded: &str) -> Result<ImageData, GenerationError> {
    let (media_type, payload) = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                GenerationError::InvalidResponse("malformed data URL".to_string())
            })?;
            let media_type = header.strip_suffix(";base64").unwrap_or(header);
            (media_type.to_string(), payload)
        }
        None => ("image/jpeg".to_string(), encoded),
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| GenerationError::InvalidResponse(format!("invalid image data: {}", e)))?;

    Ok(ImageData::new(bytes, media_type))
}
