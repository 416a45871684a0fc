use serde::{Deserialize, Serialize};

use super::request::RECOMMENDED_MAX_IMAGE_BYTES;

/// Configuration from `Decorator Config.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecoratorConfig {
    #[serde(rename = "Decorator_Settings", default)]
    pub settings: DecoratorSettings,
}

/// Which generation backend the binary talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Deterministic in-process backend that echoes the photo
    #[default]
    Simulated,
    /// Remote service speaking the multipart/JSON contract
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoratorSettings {
    #[serde(rename = "Backend", default)]
    pub backend: BackendKind,

    #[serde(rename = "Endpoint", default = "default_endpoint")]
    pub endpoint: String,

    #[serde(rename = "Request Timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(rename = "Variant Count", default = "default_variant_count")]
    pub variant_count: usize,

    #[serde(rename = "Simulated Delay Ms", default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,

    #[serde(rename = "Max Image Bytes", default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    #[serde(rename = "Enforce Image Limit", default = "default_enforce_image_limit")]
    pub enforce_image_limit: bool,

    #[serde(rename = "Export Dir", default = "default_export_dir")]
    pub export_dir: String,

    #[serde(rename = "Log Dir", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Json Logs", default)]
    pub json_logs: bool,
}

impl Default for DecoratorSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Simulated,
            endpoint: default_endpoint(),
            request_timeout: default_request_timeout(),
            variant_count: default_variant_count(),
            simulated_delay_ms: default_simulated_delay_ms(),
            max_image_bytes: default_max_image_bytes(),
            enforce_image_limit: default_enforce_image_limit(),
            export_dir: default_export_dir(),
            log_dir: default_log_dir(),
            debug_mode: false,
            json_logs: false,
        }
    }
}

impl DecoratorSettings {
    /// Transport payload limit, or `None` when the limit is advisory only
    pub fn payload_limit(&self) -> Option<usize> {
        self.enforce_image_limit.then_some(self.max_image_bytes)
    }

    /// Variant count clamped to at least one
    pub fn effective_variant_count(&self) -> usize {
        self.variant_count.max(1)
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/api/decorate".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_variant_count() -> usize {
    3
}

fn default_simulated_delay_ms() -> u64 {
    3000
}

fn default_max_image_bytes() -> usize {
    RECOMMENDED_MAX_IMAGE_BYTES
}

fn default_enforce_image_limit() -> bool {
    true
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}
