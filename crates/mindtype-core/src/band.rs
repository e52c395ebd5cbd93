//! Caret-anchored band computation.
//!
//! The band is the stretch of text behind the caret that the user has just
//! affected and that is safe to hand to correction passes. It runs back to the
//! previous sentence boundary (bounded by a maximum span) and forward only to
//! the end of the token the caret sits in.

use mindtype_types::{BandRange, ToneConfig};

use crate::boundary::{
    ceil_char_boundary, floor_char_boundary, is_sentence_terminator, is_token_char,
};

/// Maximum bytes the band reaches behind the caret.
pub const MAX_SPAN: usize = 80;
/// Maximum backward reach while tone processing is active.
pub const TONE_MAX_SPAN: usize = 240;
/// Maximum bytes the band reaches past the caret.
pub const FORWARD_LOOKAHEAD: usize = 16;

/// Compute the band around `caret` (a byte offset) in `text`.
///
/// Returns an invalid band for empty text. Otherwise the result satisfies
/// `start <= caret <= end <= text.len()`, with a caret past the end treated as
/// the end of the text.
pub fn compute_band(text: &str, caret: usize, tone: &ToneConfig) -> BandRange {
    if text.is_empty() {
        tracing::trace!(target: "mindtype::band", "Empty text, no band");
        return BandRange::invalid();
    }

    let caret = caret.min(text.len());
    // A caret inside a code point widens to the whole code point.
    let caret_lo = floor_char_boundary(text, caret);
    let caret_hi = ceil_char_boundary(text, caret);

    let max_span = if tone.is_active() { TONE_MAX_SPAN } else { MAX_SPAN };
    let start = scan_backward(text, caret_lo, max_span);
    let end = scan_forward(text, caret_lo, caret_hi);

    tracing::trace!(
        target: "mindtype::band",
        "Band {}..{} for caret {} (len {}, span {})",
        start, end, caret, text.len(), max_span
    );
    BandRange::new(start, end)
}

/// Walk back from `caret` to the start of the current sentence.
fn scan_backward(text: &str, caret: usize, max_span: usize) -> usize {
    let floor = ceil_char_boundary(text, caret.saturating_sub(max_span));
    let mut start = caret;
    // Whitespace and terminators right before the caret close the sentence
    // being typed; they belong to it rather than bounding it.
    let mut in_tail = true;

    for (i, c) in text[..caret].char_indices().rev() {
        if i < floor {
            start = floor;
            break;
        }
        if in_tail && (c.is_whitespace() || is_sentence_terminator(c)) {
            start = i;
            continue;
        }
        in_tail = false;
        if is_sentence_terminator(c) {
            break;
        }
        start = i;
    }

    let slice = &text[start..caret];
    start + (slice.len() - slice.trim_start().len())
}

/// Extend past the caret to the end of the token it sits in.
fn scan_forward(text: &str, caret_lo: usize, caret_hi: usize) -> usize {
    let inside_token = text[..caret_lo]
        .chars()
        .next_back()
        .is_some_and(is_token_char);
    if !inside_token {
        return caret_hi;
    }

    let limit = floor_char_boundary(text, caret_hi.saturating_add(FORWARD_LOOKAHEAD));
    let mut end = caret_hi;
    for c in text[caret_hi..].chars() {
        if !is_token_char(c) || end + c.len_utf8() > limit {
            break;
        }
        end += c.len_utf8();
    }
    end
}
