//! Exported `extern "C"` entry points.
//!
//! Every function tolerates null handles and pointers by returning its
//! neutral value. Text arguments are UTF-8 bytes; offsets are byte offsets.

use std::ffi::c_void;
use std::mem::MaybeUninit;

use mindtype_core::{
    CaretMonitor, ConfigStore, compute_band, decode_utf8, extract_fragment, set_tone, tone_config,
    valid_utf8_prefix,
};
use mindtype_types::CaretEvent;

use crate::abi::{MTBandRange, MTCaretEvent, MTCaretSnapshot, MTString};
use crate::logging::{self, LogConfig, LogFormat, LogPreset};
use crate::settings::EngineSettings;

/// Borrow `len` bytes at `ptr`, or nothing for a null pointer.
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `len` bytes for `'a`.
unsafe fn bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        return &[];
    }
    // SAFETY: upheld by the caller.
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

/// # Safety
/// A non-null `handle` must come from `mind_type_caret_monitor_new` and not
/// be freed or used concurrently.
unsafe fn monitor_mut<'a>(handle: *mut c_void) -> Option<&'a mut CaretMonitor> {
    // SAFETY: upheld by the caller.
    unsafe { handle.cast::<CaretMonitor>().as_mut() }
}

/// Engine version, e.g. "0.2.0".
#[unsafe(no_mangle)]
pub extern "C" fn mind_type_core_version() -> MTString {
    MTString::from_string(env!("CARGO_PKG_VERSION").to_string())
}

/// Release a string returned by the engine.
///
/// # Safety
/// `s` must have been returned by this library and not freed before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_core_free_string(s: MTString) {
    // SAFETY: upheld by the caller.
    unsafe { s.free() }
}

/// Create a monitor in the `Blurred` state.
#[unsafe(no_mangle)]
pub extern "C" fn mind_type_caret_monitor_new() -> *mut c_void {
    Box::into_raw(Box::new(CaretMonitor::new())).cast()
}

/// Destroy a monitor. Null is ignored.
///
/// # Safety
/// `monitor` must come from `mind_type_caret_monitor_new` and not be used
/// afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_free(monitor: *mut c_void) {
    if monitor.is_null() {
        return;
    }
    // SAFETY: the handle was produced by Box::into_raw in _new.
    let monitor = unsafe { Box::from_raw(monitor.cast::<CaretMonitor>()) };
    tracing::debug!(target: "mindtype::ffi", "Freed caret monitor #{}", monitor.id());
}

/// Feed one event. Returns true if the primary state changed.
///
/// Events with an unknown kind are dropped.
///
/// # Safety
/// `monitor` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_update(
    monitor: *mut c_void,
    event: MTCaretEvent,
) -> bool {
    // SAFETY: upheld by the caller.
    let Some(monitor) = (unsafe { monitor_mut(monitor) }) else {
        return false;
    };
    match CaretEvent::try_from(&event) {
        Ok(event) => monitor.update(&event),
        Err(e) => {
            tracing::warn!(target: "mindtype::ffi", "Dropping caret event: {}", e);
            false
        }
    }
}

/// Re-evaluate idle time at `now_ms`. Returns the number of snapshots queued.
///
/// # Safety
/// `monitor` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_flush(monitor: *mut c_void, now_ms: u64) -> u32 {
    // SAFETY: upheld by the caller.
    match unsafe { monitor_mut(monitor) } {
        Some(monitor) => monitor.flush(now_ms),
        None => 0,
    }
}

/// Move up to `max_count` queued snapshots, oldest first, into `out`.
/// Returns how many were written.
///
/// # Safety
/// `monitor` must be null or a live handle; a non-null `out` must be valid
/// for writes of `max_count` snapshots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_get_snapshots(
    monitor: *mut c_void,
    out: *mut MTCaretSnapshot,
    max_count: u32,
) -> u32 {
    if out.is_null() || max_count == 0 {
        return 0;
    }
    // SAFETY: upheld by the caller.
    let Some(monitor) = (unsafe { monitor_mut(monitor) }) else {
        return 0;
    };

    // SAFETY: the caller provides max_count writable slots. They are viewed
    // as uninitialized, so no existing contents are read.
    let out = unsafe {
        std::slice::from_raw_parts_mut(
            out.cast::<MaybeUninit<MTCaretSnapshot>>(),
            max_count as usize,
        )
    };
    monitor.drain_into(out) as u32
}

/// Current state without draining anything.
///
/// # Safety
/// `monitor` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_get_state(monitor: *mut c_void) -> MTCaretSnapshot {
    // SAFETY: upheld by the caller.
    match unsafe { monitor_mut(monitor) } {
        Some(monitor) => monitor.state().into(),
        None => MTCaretSnapshot::from(mindtype_types::CaretSnapshot::default()),
    }
}

/// Monitor counters as a JSON object.
///
/// # Safety
/// `monitor` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_caret_monitor_stats_json(monitor: *mut c_void) -> MTString {
    // SAFETY: upheld by the caller.
    let Some(monitor) = (unsafe { monitor_mut(monitor) }) else {
        return MTString::empty();
    };
    match serde_json::to_string(monitor.stats()) {
        Ok(json) => MTString::from_string(json),
        Err(e) => {
            tracing::error!(target: "mindtype::ffi", "Failed to encode stats: {}", e);
            MTString::empty()
        }
    }
}

/// Band around `caret` under the current tone configuration.
///
/// # Safety
/// A non-null `text_ptr` must be valid for reads of `text_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_compute_band(
    text_ptr: *const u8,
    text_len: usize,
    caret: u32,
) -> MTBandRange {
    // SAFETY: upheld by the caller.
    let text = valid_utf8_prefix(unsafe { bytes(text_ptr, text_len) });
    compute_band(text, caret as usize, &tone_config()).into()
}

/// Fragment ending at the end of the given text.
///
/// # Safety
/// A non-null `text_ptr` must be valid for reads of `text_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_extract_fragment(
    text_ptr: *const u8,
    text_len: usize,
) -> MTString {
    // SAFETY: upheld by the caller.
    let text = valid_utf8_prefix(unsafe { bytes(text_ptr, text_len) });
    MTString::from_string(extract_fragment(text, text.len(), &tone_config()))
}

/// Fragment around an explicit `caret`.
///
/// # Safety
/// A non-null `text_ptr` must be valid for reads of `text_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_extract_fragment_at(
    text_ptr: *const u8,
    text_len: usize,
    caret: u32,
) -> MTString {
    // SAFETY: upheld by the caller.
    let text = valid_utf8_prefix(unsafe { bytes(text_ptr, text_len) });
    MTString::from_string(extract_fragment(text, caret as usize, &tone_config()))
}

/// Replace the process-wide tone configuration.
///
/// Returns false, leaving the previous configuration, when enabling with a
/// blank target or when the target is not UTF-8.
///
/// # Safety
/// A non-null `target_ptr` must be valid for reads of `target_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_set_tone(
    enabled: bool,
    target_ptr: *const u8,
    target_len: usize,
) -> bool {
    // SAFETY: upheld by the caller.
    let target = match decode_utf8(unsafe { bytes(target_ptr, target_len) }) {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!(target: "mindtype::config", "Rejected tone update: {}", e);
            return false;
        }
    };
    set_tone(enabled, target).is_ok()
}

/// Install logging with a preset name ("production", "debug", ...). An empty
/// name selects the default preset. Returns false if the name is unknown or
/// logging is already initialized.
///
/// # Safety
/// A non-null `preset_ptr` must be valid for reads of `preset_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_init_logging(preset_ptr: *const u8, preset_len: usize) -> bool {
    // SAFETY: upheld by the caller.
    let Ok(name) = decode_utf8(unsafe { bytes(preset_ptr, preset_len) }) else {
        return false;
    };
    let Ok(preset) = name.parse::<LogPreset>() else {
        return false;
    };
    logging::init(&LogConfig::new(preset, LogFormat::Text))
}

/// Load and apply a settings file. An empty path discovers the file via
/// `$MINDTYPE_CONFIG` or the user config directory.
///
/// # Safety
/// A non-null `path_ptr` must be valid for reads of `path_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mind_type_load_settings(path_ptr: *const u8, path_len: usize) -> bool {
    // SAFETY: upheld by the caller.
    let Ok(path) = decode_utf8(unsafe { bytes(path_ptr, path_len) }) else {
        return false;
    };

    let loaded = if path.is_empty() {
        EngineSettings::load()
    } else {
        EngineSettings::load_from(std::path::Path::new(path))
    };

    match loaded.and_then(|settings| settings.apply(ConfigStore::global())) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(target: "mindtype::config", "Failed to load settings: {:#}", e);
            false
        }
    }
}
