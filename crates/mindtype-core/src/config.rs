//! Tone configuration store.
//!
//! One effective `ToneConfig` per store with replace-on-write semantics. The
//! process-wide store backs the C ABI; library callers may own a store of
//! their own and pass its snapshot explicitly.

use std::sync::{PoisonError, RwLock};

use mindtype_types::ToneConfig;
use once_cell::sync::Lazy;

use crate::error::EngineError;

static GLOBAL: Lazy<ConfigStore> = Lazy::new(ConfigStore::new);

#[derive(Debug, Default)]
pub struct ConfigStore {
    tone: RwLock<ToneConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store.
    pub fn global() -> &'static ConfigStore {
        &GLOBAL
    }

    /// Copy of the current tone configuration.
    pub fn tone(&self) -> ToneConfig {
        self.tone
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the tone configuration.
    ///
    /// Enabling requires a non-blank target; a rejected update leaves the
    /// previous configuration in place.
    pub fn set_tone(&self, enabled: bool, target: &str) -> Result<(), EngineError> {
        let target = target.trim();
        if enabled && target.is_empty() {
            tracing::warn!(
                target: "mindtype::config",
                "Rejected tone update: enabling requires a target"
            );
            return Err(EngineError::ToneTargetRequired);
        }

        let next = ToneConfig {
            enabled,
            target: target.to_string(),
        };
        let mut guard = self.tone.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            target: "mindtype::config",
            "Tone updated: enabled={}, target='{}'",
            next.enabled, next.target
        );
        *guard = next;
        Ok(())
    }
}

/// Update the process-wide tone configuration.
pub fn set_tone(enabled: bool, target: &str) -> Result<(), EngineError> {
    ConfigStore::global().set_tone(enabled, target)
}

/// Snapshot of the process-wide tone configuration.
pub fn tone_config() -> ToneConfig {
    ConfigStore::global().tone()
}
