use crate::models::DecoratorConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the settings file inside the config directory
pub const CONFIG_FILE_NAME: &str = "Decorator Config.yaml";

/// Configuration manager for loading and saving `Decorator Config.yaml`.
///
/// A missing file is not an error: every setting has a default, and a file
/// that names only some keys is completed from those defaults.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding the settings file (e.g., "Decorator Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded DecoratorConfig, or default if file doesn't exist
    pub fn load_config(&self) -> Result<DecoratorConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
            return Ok(DecoratorConfig::default());
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: DecoratorConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the settings file.
    pub fn save_config(&self, config: &DecoratorConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
