//! Validation and classification of raw caret events.

use mindtype_types::{CaretEvent, EventKind};

use crate::transition::Stimulus;

/// An event that passed validation, with offsets clamped to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub kind: EventKind,
    pub stimulus: Stimulus,
    pub timestamp_ms: u64,
    pub caret: u32,
    pub text_len: u32,
    pub selection_held: bool,
    pub ime_active: bool,
    /// Explicit block or active IME composition.
    pub blocked: bool,
}

/// Drops out-of-order events and clamps misreported offsets.
#[derive(Debug, Default)]
pub struct EventNormalizer {
    last_seen_ms: Option<u64>,
}

impl EventNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last accepted event.
    pub fn last_seen_ms(&self) -> Option<u64> {
        self.last_seen_ms
    }

    /// Validate an event. Returns `None` if it arrived out of order.
    pub fn normalize(&mut self, event: &CaretEvent) -> Option<NormalizedEvent> {
        if let Some(last) = self.last_seen_ms {
            if event.timestamp_ms < last {
                tracing::debug!(
                    target: "mindtype::monitor",
                    "Dropping out-of-order {:?} event: {}ms < last seen {}ms",
                    event.kind, event.timestamp_ms, last
                );
                return None;
            }
        }
        self.last_seen_ms = Some(event.timestamp_ms);

        let caret = event.caret.min(event.text_len);
        if caret != event.caret {
            tracing::debug!(
                target: "mindtype::monitor",
                "Clamping caret {} to text length {}",
                event.caret, event.text_len
            );
        }
        let anchor = event.selection_anchor.map(|a| a.min(event.text_len));
        let selection_held = anchor.is_some_and(|a| a != caret);

        let stimulus = match event.kind {
            EventKind::Typing => Stimulus::Typing,
            EventKind::Pause => Stimulus::Pause,
            EventKind::Selection => Stimulus::Selection { held: selection_held },
            EventKind::Blur => Stimulus::Blur,
        };

        Some(NormalizedEvent {
            kind: event.kind,
            stimulus,
            timestamp_ms: event.timestamp_ms,
            caret,
            text_len: event.text_len,
            selection_held,
            ime_active: event.ime_active,
            blocked: event.blocked || event.ime_active,
        })
    }
}
