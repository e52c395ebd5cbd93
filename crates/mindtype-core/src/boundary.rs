//! Character classes and offset helpers shared by band and fragment logic.

use crate::error::EngineError;

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '?', '!', '。', '？', '！', '\n'];

/// Characters that split a sentence into clauses.
const CLAUSE_SEPARATORS: &[char] = &[',', ';', ':', '—', '–', '，', '；', '：'];

pub(crate) fn is_sentence_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

pub(crate) fn is_clause_separator(c: char) -> bool {
    CLAUSE_SEPARATORS.contains(&c)
}

/// Part of a token: anything that is not whitespace or punctuation, plus
/// apostrophes so contractions stay whole.
pub(crate) fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\'' || c == '’'
}

/// Largest char boundary `<= offset`, clamped to the text length.
pub(crate) fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut i = offset;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= offset`, clamped to the text length.
pub(crate) fn ceil_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut i = offset;
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Decode bytes as UTF-8.
///
/// On failure the error carries the longest valid prefix length, which
/// callers may use to recover.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, EngineError> {
    std::str::from_utf8(bytes).map_err(|e| EngineError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })
}

/// Longest valid UTF-8 prefix of `bytes`.
pub fn valid_utf8_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let valid_up_to = e.valid_up_to();
            tracing::debug!(
                target: "mindtype::text",
                "Truncating invalid UTF-8 input at byte {} of {}",
                valid_up_to,
                bytes.len()
            );
            // bytes[..valid_up_to] was validated by the call above.
            std::str::from_utf8(&bytes[..valid_up_to]).unwrap_or_default()
        }
    }
}
