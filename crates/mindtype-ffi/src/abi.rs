//! `#[repr(C)]` structures shared with the host and their conversions.

use mindtype_core::EngineError;
use mindtype_types::{BandRange, CaretEvent, CaretSnapshot, EventKind};

/// Engine-allocated UTF-8 string. The host releases it with
/// `mind_type_core_free_string`.
#[repr(C)]
#[derive(Debug)]
pub struct MTString {
    pub ptr: *mut u8,
    pub len: usize,
}

impl MTString {
    pub fn empty() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            len: 0,
        }
    }

    /// Hand ownership of `s` to the host.
    pub fn from_string(s: String) -> Self {
        if s.is_empty() {
            return Self::empty();
        }
        let boxed = s.into_bytes().into_boxed_slice();
        let len = boxed.len();
        let ptr = Box::into_raw(boxed) as *mut u8;
        Self { ptr, len }
    }

    /// Borrow the bytes.
    ///
    /// # Safety
    /// `self` must come from [`MTString::from_string`] and not yet be freed.
    pub unsafe fn as_bytes(&self) -> &[u8] {
        if self.ptr.is_null() {
            return &[];
        }
        // SAFETY: ptr/len describe a live boxed slice per the caller contract.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }

    /// Reclaim and drop the allocation.
    ///
    /// # Safety
    /// `self` must come from [`MTString::from_string`] and not yet be freed.
    pub unsafe fn free(self) {
        if self.ptr.is_null() {
            return;
        }
        let slice = std::ptr::slice_from_raw_parts_mut(self.ptr, self.len);
        // SAFETY: reconstructs the Box<[u8]> leaked by from_string.
        drop(unsafe { Box::from_raw(slice) });
    }
}

/// One caret event from the host.
///
/// `selection_anchor` equals `caret` when nothing is selected. `text_ptr` is
/// not read by the monitor; only `text_len` matters.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MTCaretEvent {
    pub text_ptr: *const u8,
    pub text_len: usize,
    pub caret: u32,
    pub timestamp_ms: u64,
    pub event_kind: u32,
    pub selection_anchor: u32,
    pub ime_active: bool,
    pub blocked: bool,
}

impl TryFrom<&MTCaretEvent> for CaretEvent {
    type Error = EngineError;

    fn try_from(raw: &MTCaretEvent) -> Result<Self, Self::Error> {
        let kind =
            EventKind::from_code(raw.event_kind).ok_or(EngineError::UnknownEventKind(raw.event_kind))?;
        let text_len = if raw.text_ptr.is_null() {
            0
        } else {
            u32::try_from(raw.text_len).unwrap_or(u32::MAX)
        };

        Ok(CaretEvent::new(kind, raw.timestamp_ms, raw.caret, text_len)
            .with_selection_anchor(raw.selection_anchor)
            .with_ime_active(raw.ime_active)
            .with_blocked(raw.blocked))
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MTCaretSnapshot {
    pub primary: u32,
    pub caret: u32,
    pub text_len: u32,
    pub timestamp_ms: u64,
    pub blocked: bool,
    pub ime_active: bool,
}

impl From<CaretSnapshot> for MTCaretSnapshot {
    fn from(snap: CaretSnapshot) -> Self {
        Self {
            primary: snap.primary.code(),
            caret: snap.caret,
            text_len: snap.text_len,
            timestamp_ms: snap.timestamp_ms,
            blocked: snap.blocked,
            ime_active: snap.ime_active,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MTBandRange {
    pub start: u32,
    pub end: u32,
    pub valid: bool,
}

impl From<BandRange> for MTBandRange {
    fn from(band: BandRange) -> Self {
        match (u32::try_from(band.start), u32::try_from(band.end)) {
            (Ok(start), Ok(end)) if band.valid => Self {
                start,
                end,
                valid: true,
            },
            _ => Self::default(),
        }
    }
}
