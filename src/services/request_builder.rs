use crate::models::{ColorPreference, DecorationRequest, DesignStyle, RequestFields, RoomType};
use thiserror::Error;

/// Reasons a request cannot be submitted.
///
/// These never reach the backend; the presentation layer shows them as a
/// disabled submit button.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Upload a photo of the room first")]
    MissingImage,

    #[error("Select a design style")]
    MissingStyle,
}

/// Validates raw user fields and assembles a [`DecorationRequest`].
///
/// Stateless; `build` has no side effects beyond an advisory log line for
/// oversized photos.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a request from raw fields.
    ///
    /// The image is checked before the style, so a form with neither reports
    /// `MissingImage`. Blank room/color values become `None`, and the furniture
    /// flag defaults to `true`.
    pub fn build(&self, fields: &RequestFields) -> Result<DecorationRequest, ValidationError> {
        self.validate(fields)?;

        let image = fields.image.clone().ok_or(ValidationError::MissingImage)?;
        let design_style =
            DesignStyle::parse(&fields.design_style).ok_or(ValidationError::MissingStyle)?;

        if image.exceeds_recommended_size() {
            // Advertised limit only; the transport decides whether to reject
            tracing::warn!(
                "Image payload is {} bytes, above the recommended 10MB limit",
                image.len()
            );
        }

        if design_style.is_custom() {
            tracing::debug!(
                "Design style '{}' is not in the picker list; Modern elements will be used as fallback",
                design_style
            );
        }

        Ok(DecorationRequest {
            image,
            design_style,
            room_type: RoomType::parse(&fields.room_type),
            color_preference: ColorPreference::parse(&fields.color_preference),
            preserve_existing_furniture: fields.preserve_existing_furniture.unwrap_or(true),
        })
    }

    /// Check the required fields without assembling a request
    pub fn validate(&self, fields: &RequestFields) -> Result<(), ValidationError> {
        if fields.image.is_none() {
            return Err(ValidationError::MissingImage);
        }
        if fields.design_style.trim().is_empty() {
            return Err(ValidationError::MissingStyle);
        }
        Ok(())
    }

    /// Quick check used to enable/disable the submit action
    pub fn is_submittable(&self, fields: &RequestFields) -> bool {
        self.validate(fields).is_ok()
    }
}
