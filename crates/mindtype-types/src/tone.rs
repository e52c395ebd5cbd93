//! Tone feature configuration.

use serde::{Deserialize, Serialize};

/// Process-wide tone settings consulted by band and fragment computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToneConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Target tone, e.g. "Casual" or "Professional".
    #[serde(default)]
    pub target: String,
}

impl ToneConfig {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled(target: impl Into<String>) -> Self {
        Self {
            enabled: true,
            target: target.into(),
        }
    }

    /// Tone processing only applies when enabled with a non-blank target.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.target.trim().is_empty()
    }
}
