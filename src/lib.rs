// Room Decorator - request orchestration for AI room redecoration
//
// This is the library crate containing the core state machine, the generation
// backends and the data structures. The binary crate (main.rs) provides a
// command-line driver.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{
    DecorationRequest, DecorationVariant, DecoratorConfig, DesignStyle, ImageData, Phase,
    RequestFields, ResultSet, ViewState,
};
pub use state::{Orchestrator, StateChange, Submission};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
