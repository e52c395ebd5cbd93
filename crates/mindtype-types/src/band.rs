//! Text band types.

use serde::{Deserialize, Serialize};

/// Contiguous byte range of text eligible for automated reprocessing.
///
/// When `valid` is true, `start <= end <= text.len()` holds. An invalid band
/// always reports `0..0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandRange {
    pub start: usize,
    pub end: usize,
    pub valid: bool,
}

impl BandRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end, valid: true }
    }

    /// No safe band could be determined.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if an offset lies within the band (inclusive of both ends).
    pub fn contains(&self, offset: usize) -> bool {
        self.valid && offset >= self.start && offset <= self.end
    }

    /// Slice the band out of the text it was computed for.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if !self.valid {
            return None;
        }
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_band() {
        let band = BandRange::invalid();
        assert!(!band.valid);
        assert!(band.is_empty());
        assert!(!band.contains(0));
        assert_eq!(band.slice("abc"), None);
    }

    #[test]
    fn test_slice_and_contains() {
        let band = BandRange::new(4, 8);
        assert_eq!(band.slice("The quik fox"), Some("quik"));
        assert!(band.contains(4));
        assert!(band.contains(8));
        assert!(!band.contains(9));
        assert_eq!(band.len(), 4);
    }
}
