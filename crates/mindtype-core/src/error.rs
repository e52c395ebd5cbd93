//! Error types for the MindType engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Tone target must be non-empty when tone is enabled")]
    ToneTargetRequired,

    #[error("Invalid UTF-8: only the first {valid_up_to} bytes are valid")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("Unknown event kind code: {0}")]
    UnknownEventKind(u32),

    #[error("Settings error: {0}")]
    Settings(String),
}
