//! Caret activity monitor.
//!
//! Consumes caret events and flush ticks, classifies the session into one of
//! five interaction states, and queues a snapshot whenever the state changes.
//! All timing is derived from caller-supplied timestamps; the monitor never
//! reads a clock.

use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, Ordering};

use mindtype_types::{CaretEvent, CaretSnapshot, EventKind, InteractionState, MonitorStats};

use crate::buffer::SnapshotRing;
use crate::normalize::{EventNormalizer, NormalizedEvent};
use crate::transition::{SHORT_PAUSE_THRESHOLD_MS, Stimulus, transition};

/// Smoothing factor for typing cadence metrics.
const CADENCE_ALPHA: f64 = 0.2;
/// Characters per word for WPM estimates.
const CHARS_PER_WORD: f64 = 5.0;

static NEXT_MONITOR_ID: AtomicU64 = AtomicU64::new(1);

/// State machine plus snapshot ring for one editor session.
///
/// A monitor is single-writer: serialize `update`/`flush`/`drain` calls for a
/// given instance. Distinct instances are independent.
#[derive(Debug)]
pub struct CaretMonitor {
    id: u64,
    normalizer: EventNormalizer,
    /// Current state plus the latest recorded caret fields
    current: CaretSnapshot,
    /// Whether any event has been accepted
    seen_event: bool,
    /// Idle clock origin, moved by typing and pause signals
    last_activity_ms: u64,
    /// Whether the last selection event held a non-empty range
    selection_held: bool,
    /// Whether the last accepted event was a host-reported blur
    blur_reported: bool,
    last_key_ms: Option<u64>,
    ring: SnapshotRing,
    stats: MonitorStats,
}

impl Default for CaretMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl CaretMonitor {
    pub fn new() -> Self {
        Self::with_ring(SnapshotRing::default())
    }

    /// Create a monitor with a custom snapshot ring.
    pub fn with_ring(ring: SnapshotRing) -> Self {
        let id = NEXT_MONITOR_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(target: "mindtype::monitor", "Created caret monitor #{}", id);
        Self {
            id,
            normalizer: EventNormalizer::new(),
            current: CaretSnapshot::default(),
            seen_event: false,
            last_activity_ms: 0,
            selection_held: false,
            blur_reported: false,
            last_key_ms: None,
            ring,
            stats: MonitorStats::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current classified state and latest recorded fields.
    pub fn state(&self) -> CaretSnapshot {
        self.current
    }

    pub fn primary(&self) -> InteractionState {
        self.current.primary
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Number of snapshots waiting to be drained.
    pub fn pending(&self) -> usize {
        self.ring.len()
    }

    /// Feed one caret event. Returns true if the primary state changed, in
    /// which case a snapshot was queued.
    pub fn update(&mut self, event: &CaretEvent) -> bool {
        self.stats.events_processed += 1;

        let Some(ev) = self.normalizer.normalize(event) else {
            self.stats.events_dropped += 1;
            return false;
        };

        tracing::trace!(
            target: "mindtype::monitor",
            "#{} {:?} at {}ms caret={} len={}",
            self.id, ev.kind, ev.timestamp_ms, ev.caret, ev.text_len
        );

        if !self.seen_event {
            self.seen_event = true;
            self.last_activity_ms = ev.timestamp_ms;
        }
        self.record(&ev);

        let next = transition(self.current.primary, ev.stimulus);
        self.apply(next)
    }

    /// Re-evaluate idle time at `now`. Returns the number of snapshots queued
    /// (0 or 1).
    pub fn flush(&mut self, now: u64) -> u32 {
        if !self.seen_event {
            return 0;
        }

        let idle_ms = now.saturating_sub(self.last_activity_ms);
        let next = transition(
            self.current.primary,
            Stimulus::Tick {
                idle_ms,
                selection_held: self.selection_held,
                blur_reported: self.blur_reported,
            },
        );

        if self.apply(next) {
            tracing::trace!(
                target: "mindtype::monitor",
                "#{} flush at {}ms after {}ms idle",
                self.id, now, idle_ms
            );
            1
        } else {
            0
        }
    }

    /// Remove and return up to `max_count` snapshots, oldest first.
    pub fn drain(&mut self, max_count: usize) -> Vec<CaretSnapshot> {
        self.ring.drain(max_count)
    }

    /// Drain into caller-provided storage, oldest first. Returns how many
    /// slots were written.
    pub fn drain_into<T>(&mut self, out: &mut [MaybeUninit<T>]) -> usize
    where
        T: From<CaretSnapshot>,
    {
        self.ring.drain_into(out)
    }

    fn record(&mut self, ev: &NormalizedEvent) {
        self.current.caret = ev.caret;
        self.current.text_len = ev.text_len;
        self.current.timestamp_ms = ev.timestamp_ms;
        self.current.ime_active = ev.ime_active;
        self.current.blocked = ev.blocked;
        self.blur_reported = ev.kind == EventKind::Blur;

        match ev.kind {
            EventKind::Typing => {
                self.last_activity_ms = ev.timestamp_ms;
                self.selection_held = false;
                self.record_keystroke(ev.timestamp_ms);
            }
            EventKind::Pause => {
                self.last_activity_ms = ev.timestamp_ms;
            }
            EventKind::Selection => {
                self.selection_held = ev.selection_held;
            }
            EventKind::Blur => {
                self.selection_held = false;
            }
        }
    }

    fn record_keystroke(&mut self, now: u64) {
        let stats = &mut self.stats;
        match self.last_key_ms {
            Some(last) => {
                let dt_ms = now.saturating_sub(last);
                let dt = dt_ms as f64;
                if stats.avg_inter_key_ms <= 0.0 {
                    stats.avg_inter_key_ms = dt;
                } else {
                    stats.avg_inter_key_ms += CADENCE_ALPHA * (dt - stats.avg_inter_key_ms);
                }

                // Simultaneous keys carry no rate information.
                if dt_ms > 0 {
                    let inst_cps = 1000.0 / dt;
                    if stats.eps_smoothed <= 0.0 {
                        stats.eps_smoothed = inst_cps;
                    } else {
                        stats.eps_smoothed += CADENCE_ALPHA * (inst_cps - stats.eps_smoothed);
                    }
                    stats.wpm_smoothed = stats.eps_smoothed * 60.0 / CHARS_PER_WORD;
                }

                if dt_ms < SHORT_PAUSE_THRESHOLD_MS {
                    stats.burst_len_current = stats.burst_len_current.saturating_add(1);
                } else {
                    stats.burst_len_current = 1;
                }
            }
            None => stats.burst_len_current = 1,
        }
        stats.burst_len_max = stats.burst_len_max.max(stats.burst_len_current);
        stats.keystrokes += 1;
        self.last_key_ms = Some(now);
    }

    /// Move to `next`, queueing a snapshot if the state changed.
    fn apply(&mut self, next: InteractionState) -> bool {
        let prev = self.current.primary;
        if next == prev {
            return false;
        }

        tracing::debug!(
            target: "mindtype::monitor::state",
            "#{} {:?} -> {:?} at {}ms",
            self.id, prev, next, self.current.timestamp_ms
        );
        self.current.primary = next;
        if self.ring.push(self.current) {
            self.stats.snapshots_evicted += 1;
        }
        self.stats.snapshots_emitted += 1;
        true
    }
}
