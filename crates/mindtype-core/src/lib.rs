//! Caret activity monitoring and caret-anchored text analysis for MindType.

mod band;
mod boundary;
mod buffer;
mod config;
mod error;
mod fragment;
mod monitor;
mod normalize;
mod transition;

pub use band::{FORWARD_LOOKAHEAD, MAX_SPAN, TONE_MAX_SPAN, compute_band};
pub use boundary::{decode_utf8, valid_utf8_prefix};
pub use buffer::{RING_CAPACITY, SnapshotRing};
pub use config::{ConfigStore, set_tone, tone_config};
pub use error::EngineError;
pub use fragment::extract_fragment;
pub use monitor::CaretMonitor;
pub use normalize::{EventNormalizer, NormalizedEvent};
pub use transition::{LONG_PAUSE_THRESHOLD_MS, SHORT_PAUSE_THRESHOLD_MS, Stimulus, transition};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
