//! Data models for the room decorator.
//!
//! This module contains the value types that flow through the orchestration core:
//! - [`RequestFields`] / [`DecorationRequest`]: raw user input and its validated form
//! - [`DesignStyle`], [`RoomType`], [`ColorPreference`]: advisory option lists with a `Custom` escape hatch
//! - [`DecorationVariant`] / [`ResultSet`]: what a successful generation returns
//! - [`GenerationJob`] / [`JobStatus`] / [`JobId`]: one submission's lifecycle
//! - [`Phase`] / [`ViewState`]: orchestrator state and the snapshot handed to presentation
//! - [`DecoratorConfig`]: settings loaded from `Decorator Config.yaml`
//!
//! # Architecture Note
//!
//! Requests and variants are immutable once built. Variants and result sets are
//! shared behind `Arc` so snapshots stay cheap to clone.

pub mod config;
pub mod job;
pub mod request;
pub mod session;
pub mod variant;

pub use config::{BackendKind, DecoratorConfig, DecoratorSettings};
pub use job::{GenerationJob, JobId, JobStatus};
pub use request::{
    ColorPreference, DecorationRequest, DesignStyle, ImageData, RECOMMENDED_MAX_IMAGE_BYTES,
    RequestFields, RoomType,
};
pub use session::{Phase, ViewState};
pub use variant::{DecorationVariant, ResultSet};
