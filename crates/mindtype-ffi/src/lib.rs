//! C ABI for the MindType caret engine.
//!
//! Hosts drive a monitor handle with caret events and flush ticks, pull
//! snapshots into caller-allocated buffers, and call the stateless band and
//! fragment functions. Strings returned by the engine are owned by the host
//! and must be released with `mind_type_core_free_string` exactly once.
//!
//! No entry point performs I/O except `mind_type_load_settings`, which reads
//! the settings file, and the logging initializers, which install a
//! subscriber writing to stderr.

pub mod abi;
pub mod api;
pub mod logging;
pub mod settings;

pub use abi::{MTBandRange, MTCaretEvent, MTCaretSnapshot, MTString};
