//! Engine settings file.
//!
//! ```toml
//! [logging]
//! preset = "debug"
//! format = "json"
//! overrides = ["monitor=trace"]
//!
//! [tone]
//! enabled = true
//! target = "Professional"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mindtype_core::{ConfigStore, EngineError};
use mindtype_types::ToneConfig;
use serde::Deserialize;

use crate::logging::{self, LogConfig, LogFormat, LogPreset};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "MINDTYPE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub tone: ToneConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub overrides: Vec<String>,
}

fn default_preset() -> String {
    "production".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            format: default_format(),
            overrides: Vec::new(),
        }
    }
}

impl LoggingSettings {
    pub fn log_config(&self) -> Result<LogConfig> {
        let preset: LogPreset = self.preset.parse()?;
        let format: LogFormat = self.format.parse()?;
        Ok(LogConfig::new(preset, format).with_overrides(&self.overrides))
    }
}

/// Default settings location: `<config dir>/mindtype/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mindtype").join("config.toml"))
}

impl EngineSettings {
    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: EngineSettings = toml::from_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Load from `$MINDTYPE_CONFIG`, else the default location, else defaults.
    ///
    /// An explicitly named file must exist; the default location is optional.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::load_from(Path::new(&path));
        }

        if let Some(path) = default_path().filter(|p| p.exists()) {
            return Self::load_from(&path);
        }

        Ok(EngineSettings::default())
    }

    /// Check every section without touching process state.
    pub fn validate(&self) -> Result<LogConfig> {
        let log_config = self.logging.log_config()?;
        if self.tone.enabled && self.tone.target.trim().is_empty() {
            return Err(EngineError::ToneTargetRequired).context("validating tone settings");
        }
        Ok(log_config)
    }

    /// Apply to the process: install logging and replace the tone config.
    ///
    /// Nothing is applied unless every section validates. Logging that is
    /// already initialized is left alone.
    pub fn apply(&self, store: &ConfigStore) -> Result<()> {
        let log_config = self.validate()?;
        if !logging::init(&log_config) {
            tracing::debug!(
                target: "mindtype::config",
                "Logging already initialized, keeping existing subscriber"
            );
        }

        store
            .set_tone(self.tone.enabled, &self.tone.target)
            .context("applying tone settings")?;
        tracing::info!(
            target: "mindtype::config",
            "Settings applied: tone enabled={}, target='{}'",
            self.tone.enabled, self.tone.target.trim()
        );
        Ok(())
    }
}
