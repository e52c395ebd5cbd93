//! Caret events and interaction state snapshots.

use serde::{Deserialize, Serialize};

/// Classified interaction state of an editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Keystrokes are arriving faster than the short pause threshold.
    Typing,
    /// Input stopped recently.
    ShortPause,
    /// Input stopped long enough that the text is settled.
    LongPause,
    /// A non-empty selection is held.
    SelectionActive,
    /// The field has no focus, or no event has been seen yet.
    #[default]
    Blurred,
}

impl InteractionState {
    /// Stable numeric code used across the C ABI.
    pub fn code(self) -> u32 {
        match self {
            InteractionState::Typing => 0,
            InteractionState::ShortPause => 1,
            InteractionState::LongPause => 2,
            InteractionState::SelectionActive => 3,
            InteractionState::Blurred => 4,
        }
    }
}

/// Kind of caret event reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A keystroke changed the text.
    Typing,
    /// The host believes input has stopped at this timestamp.
    Pause,
    /// The caret moved or the selection changed.
    Selection,
    /// The field lost focus.
    Blur,
}

impl EventKind {
    /// Parse the numeric code used across the C ABI.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(EventKind::Typing),
            1 => Some(EventKind::Pause),
            2 => Some(EventKind::Selection),
            3 => Some(EventKind::Blur),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            EventKind::Typing => 0,
            EventKind::Pause => 1,
            EventKind::Selection => 2,
            EventKind::Blur => 3,
        }
    }
}

/// A single caret event. Offsets are UTF-8 byte offsets into the text the
/// host held at `timestamp_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaretEvent {
    pub kind: EventKind,
    /// Monotonic milliseconds supplied by the host.
    pub timestamp_ms: u64,
    pub caret: u32,
    pub text_len: u32,
    /// Other end of the selection, if the host reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_anchor: Option<u32>,
    #[serde(default)]
    pub ime_active: bool,
    #[serde(default)]
    pub blocked: bool,
}

impl CaretEvent {
    pub fn new(kind: EventKind, timestamp_ms: u64, caret: u32, text_len: u32) -> Self {
        Self {
            kind,
            timestamp_ms,
            caret,
            text_len,
            selection_anchor: None,
            ime_active: false,
            blocked: false,
        }
    }

    /// Build an event from the text snapshot, deriving `text_len` from its byte length.
    pub fn from_text(kind: EventKind, timestamp_ms: u64, text: &str, caret: u32) -> Self {
        let text_len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        Self::new(kind, timestamp_ms, caret, text_len)
    }

    pub fn with_selection_anchor(mut self, anchor: u32) -> Self {
        self.selection_anchor = Some(anchor);
        self
    }

    pub fn with_ime_active(mut self, ime_active: bool) -> Self {
        self.ime_active = ime_active;
        self
    }

    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// True when the event describes a non-empty selection range.
    pub fn holds_selection(&self) -> bool {
        self.selection_anchor.is_some_and(|anchor| anchor != self.caret)
    }
}

/// Immutable record of the monitor's classified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaretSnapshot {
    pub primary: InteractionState,
    pub caret: u32,
    pub text_len: u32,
    pub timestamp_ms: u64,
    pub blocked: bool,
    pub ime_active: bool,
}
