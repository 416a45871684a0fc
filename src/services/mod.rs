//! Services module - business logic around a decoration request.
//!
//! The services are **framework-agnostic**: no presentation code, no shared state.
//! The [`Orchestrator`](crate::state::Orchestrator) composes them.
//!
//! # Components
//!
//! - [`RequestBuilder`]: validates raw fields into a [`DecorationRequest`](crate::models::DecorationRequest)
//!   or a [`ValidationError`] (`MissingImage`, `MissingStyle`).
//!
//! - [`GenerationClient`]: the asynchronous backend seam. Resolves once with a
//!   non-empty [`ResultSet`](crate::models::ResultSet) or a [`GenerationError`]. Two implementations:
//!   - [`SimulatedBackend`]: deterministic in-process variants, optional delay
//!   - [`HttpGenerationClient`]: multipart POST to a remote service, JSON reply
//!
//! - [`ExportDescriptor`] / [`ExportSink`]: what to save and who saves it.
//!   [`FileExporter`] writes into a local directory.
//!
//! # Variant composition
//!
//! The simulated backend derives every descriptive field of a variant from the
//! requested style and the variant's ordinal ([`compose_variant`]), so results
//! are reproducible in tests. Confidence rises with the ordinal and is capped at 1.0.

pub mod export;
pub mod generation;
pub mod http_backend;
pub mod request_builder;

pub use export::{
    ExportDescriptor, ExportError, ExportSink, FileExporter, safe_file_name, suggested_filename,
};
pub use generation::{
    GenerationClient, GenerationError, SimulatedBackend, check_payload, compose_result_set,
    compose_variant, confidence_for_ordinal, room_analysis,
};
pub use http_backend::HttpGenerationClient;
pub use request_builder::{RequestBuilder, ValidationError};
