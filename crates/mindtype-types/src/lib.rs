//! Shared types for the MindType caret engine.

mod band;
mod caret;
mod stats;
mod tone;

pub use band::*;
pub use caret::*;
pub use stats::*;
pub use tone::*;
