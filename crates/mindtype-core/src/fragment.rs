//! Fragment extraction around an anchor offset.

use mindtype_types::ToneConfig;
use unicode_segmentation::UnicodeSegmentation;

use crate::boundary::{floor_char_boundary, is_clause_separator};

/// Extract the smallest lexical unit around `anchor` (a byte offset).
///
/// With tone inactive this is the word the anchor sits in or has just
/// finished; with tone active it is the enclosing clause. An empty string
/// means no meaningful unit is adjacent to the anchor.
pub fn extract_fragment(text: &str, anchor: usize, tone: &ToneConfig) -> String {
    if text.is_empty() {
        return String::new();
    }
    let anchor = floor_char_boundary(text, anchor);

    let fragment = if tone.is_active() {
        clause_at(text, anchor)
    } else {
        word_at(text, anchor)
    };

    tracing::trace!(
        target: "mindtype::fragment",
        "Fragment at {} of {}: {:?}",
        anchor, text.len(), fragment
    );
    fragment.to_string()
}

fn is_word_like(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Pick the segment ending at or containing `anchor`, else the one starting
/// at it, provided it is word-like.
fn pick_segment<'a, I>(segments: I, anchor: usize) -> Option<(usize, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut before = None;
    let mut after = None;
    for (start, segment) in segments {
        let end = start + segment.len();
        if start < anchor && anchor <= end {
            before = Some((start, segment));
        } else if start == anchor {
            after = Some((start, segment));
        }
        if start >= anchor {
            break;
        }
    }

    before
        .filter(|(_, s)| is_word_like(s))
        .or_else(|| after.filter(|(_, s)| is_word_like(s)))
}

fn word_at(text: &str, anchor: usize) -> &str {
    pick_segment(text.split_word_bound_indices(), anchor)
        .map(|(_, word)| word)
        .unwrap_or("")
}

fn clause_at(text: &str, anchor: usize) -> &str {
    let Some((offset, sentence)) = pick_segment(text.split_sentence_bound_indices(), anchor)
    else {
        return "";
    };
    let rel = (anchor - offset).min(sentence.len());

    // Separators just typed close the clause instead of starting a new one.
    let head = sentence[..rel].trim_end_matches(|c: char| c.is_whitespace() || is_clause_separator(c));
    let left = head
        .char_indices()
        .rev()
        .find(|&(_, c)| is_clause_separator(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let right = sentence[rel..]
        .find(is_clause_separator)
        .map(|i| rel + i)
        .unwrap_or(sentence.len());

    let clause = sentence[left..right]
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || is_clause_separator(c));
    if is_word_like(clause) { clause } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, anchor: usize) -> String {
        extract_fragment(text, anchor, &ToneConfig::disabled())
    }

    fn clause(text: &str, anchor: usize) -> String {
        extract_fragment(text, anchor, &ToneConfig::enabled("Casual"))
    }

    #[test]
    fn test_quik_fox_scenario() {
        assert_eq!(word("The quik fox", 8), "quik");
    }

    #[test]
    fn test_anchor_inside_word() {
        assert_eq!(word("The quik fox", 6), "quik");
        assert_eq!(word("The quik fox", 10), "fox");
    }

    #[test]
    fn test_anchor_at_word_start() {
        assert_eq!(word("The quik fox", 9), "fox");
        assert_eq!(word("The quik fox", 0), "The");
    }

    #[test]
    fn test_anchor_at_end() {
        assert_eq!(word("The quik fox", 12), "fox");
        assert_eq!(word("The quik fox", 99), "fox");
    }

    #[test]
    fn test_anchor_on_isolated_separator() {
        assert_eq!(word("one  ,  two", 5), "");
        assert_eq!(word("   ", 1), "");
        assert_eq!(word("", 0), "");
    }

    #[test]
    fn test_punctuation_is_a_separator() {
        assert_eq!(word("hello, world", 5), "hello");
        assert_eq!(word("end.", 4), "");
        assert_eq!(word("end.", 3), "end");
    }

    #[test]
    fn test_contraction_kept_whole() {
        assert_eq!(word("I don't know", 5), "don't");
    }

    #[test]
    fn test_multibyte_words() {
        let text = "naïve café";
        assert_eq!(word(text, text.len()), "café");
        // Anchor inside 'ï' snaps to its start.
        assert_eq!(word(text, 3), "naïve");
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let text = "Some text with words";
        let first = word(text, 9);
        for _ in 0..3 {
            assert_eq!(word(text, 9), first);
        }
    }

    #[test]
    fn test_clause_mode() {
        let text = "Well, the quik fox jumps, then rests.";
        let anchor = text.find("jumps").unwrap() + "jumps".len();
        assert_eq!(clause(text, anchor), "the quik fox jumps");
    }

    #[test]
    fn test_clause_mode_after_trailing_comma() {
        assert_eq!(clause("Hello, world,", 13), "world");
    }

    #[test]
    fn test_clause_mode_uses_current_sentence() {
        let text = "First part. Second part here";
        assert_eq!(clause(text, text.len()), "Second part here");
    }

    #[test]
    fn test_clause_mode_empty_text() {
        assert_eq!(clause("", 0), "");
        assert_eq!(clause("  ", 2), "");
    }

    #[test]
    fn test_disabled_tone_with_target_stays_word_mode() {
        let tone = ToneConfig {
            enabled: false,
            target: "Casual".into(),
        };
        assert_eq!(extract_fragment("The quik fox", 8, &tone), "quik");
    }
}
