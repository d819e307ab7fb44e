//! Chip regions and insertable fragments.

use crate::chip::{Chip, ChipId};
use std::ops::Range;

/// A chip region: a char range of the buffer owned by exactly one chip.
#[derive(Clone, Debug)]
pub struct ChipSpan {
    /// Identity of the region inside its buffer.
    pub id: ChipId,
    /// Char range in the buffer, padding and separators included.
    pub range: Range<usize>,
    /// The chip rendered over this range.
    pub chip: Chip,
}

impl ChipSpan {
    #[must_use]
    pub fn new(id: ChipId, range: Range<usize>, chip: Chip) -> Self {
        Self { id, range, chip }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Check if this span contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }

    /// Whether this span intersects `[start, end)`.
    ///
    /// An empty query range `start == end` is treated as a point query: it
    /// matches the span containing `start`.
    #[must_use]
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        if start == end {
            self.contains(start)
        } else {
            self.range.start < end && start < self.range.end
        }
    }
}

/// Text ready to be written into a buffer, optionally tagged as one chip
/// over its whole length.
#[derive(Clone, Debug, Default)]
pub struct Fragment {
    text: String,
    chip: Option<Chip>,
}

impl Fragment {
    /// Untagged text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chip: None,
        }
    }

    /// Text tagged with a chip.
    #[must_use]
    pub fn chip(text: impl Into<String>, chip: Chip) -> Self {
        Self {
            text: text.into(),
            chip: Some(chip),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn chip_ref(&self) -> Option<&Chip> {
        self.chip.as_ref()
    }

    /// Length in chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Option<Chip>) {
        (self.text, self.chip)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(range: Range<usize>) -> ChipSpan {
        ChipSpan::new(ChipId::from_raw(0), range, Chip::new("x", None))
    }

    #[test]
    fn test_span_intersects_half_open() {
        let s = span(4..9);
        assert!(s.intersects(0, 5));
        assert!(s.intersects(8, 12));
        assert!(!s.intersects(0, 4));
        assert!(!s.intersects(9, 12));
    }

    #[test]
    fn test_span_point_query() {
        let s = span(4..9);
        assert!(s.intersects(4, 4));
        assert!(s.intersects(8, 8));
        assert!(!s.intersects(9, 9));
    }

    #[test]
    fn test_fragment_len_counts_chars() {
        let f = Fragment::plain("héllo");
        assert_eq!(f.len_chars(), 5);
        assert!(f.chip_ref().is_none());
        assert!(Fragment::default().is_empty());
    }
}
