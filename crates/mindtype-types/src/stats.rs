//! Monitor counters.

use serde::{Deserialize, Serialize};

/// Running counters and typing cadence metrics for one monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorStats {
    pub events_processed: u64,
    /// Events dropped for arriving out of order.
    pub events_dropped: u64,
    pub snapshots_emitted: u64,
    /// Snapshots evicted from a full ring before being drained.
    pub snapshots_evicted: u64,
    pub keystrokes: u64,
    /// Exponentially smoothed interval between keystrokes.
    pub avg_inter_key_ms: f64,
    /// Exponentially smoothed keystrokes per second.
    pub eps_smoothed: f64,
    /// Smoothed words per minute, assuming five characters per word.
    pub wpm_smoothed: f64,
    /// Keystrokes in the current burst (keys closer together than the short
    /// pause threshold).
    pub burst_len_current: u32,
    pub burst_len_max: u32,
}
