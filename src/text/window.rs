//! Scanning window over a mutable buffer.

use crate::chip::ChipId;
use crate::text::buffer::{ChipText, clamp_range};
use crate::text::span::Fragment;
use std::ops::Range;

/// A forward cursor over `[start, end)` of a buffer that keeps its position
/// and bounds consistent while the buffer is edited under it.
///
/// ```
/// use chipfield::{ChipBuffer, ChipText, TextWindow};
///
/// let mut buffer = ChipBuffer::with_text("a;b;c");
/// let mut window = TextWindow::new(&mut buffer, 0, 5);
/// while let Some(ch) = window.next_char() {
///     if ch == ';' {
///         window.delete_current();
///     }
/// }
/// assert_eq!(buffer.to_plain_string(), "abc");
/// ```
pub struct TextWindow<'a> {
    text: &'a mut dyn ChipText,
    start: usize,
    index: usize,
    next: usize,
    end: usize,
}

impl<'a> TextWindow<'a> {
    /// Create a window over `[start, end)`, clamped to the buffer.
    pub fn new(text: &'a mut dyn ChipText, start: usize, end: usize) -> Self {
        let Range { start, end } = clamp_range(start..end, text.len_chars());
        Self {
            text,
            start,
            index: start,
            next: start,
            end,
        }
    }

    /// Whether another character remains in the window.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next < self.end
    }

    /// Advance to and return the next character.
    pub fn next_char(&mut self) -> Option<char> {
        if !self.has_next() {
            return None;
        }
        self.index = self.next;
        self.next += 1;
        self.text.char_at(self.index)
    }

    /// Position of the character most recently returned by
    /// [`next_char`](Self::next_char).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current (exclusive) end of the window.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the whole buffer.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.text.len_chars()
    }

    /// Length of the window.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Delete the current character. The window shrinks by one and the
    /// character that moved into its place is the next one returned.
    pub fn delete_current(&mut self) {
        if self.index >= self.text.len_chars() {
            return;
        }
        self.text.remove(self.index..self.index + 1);
        self.end = self.end.saturating_sub(1).max(self.index);
        self.next = self.index;
    }

    /// Replace `range` with `fragment` and resume scanning right after the
    /// inserted text. The window end moves by the change in length.
    pub fn replace(&mut self, range: Range<usize>, fragment: &Fragment) -> Option<ChipId> {
        let range = clamp_range(range, self.text.len_chars());
        let removed = range.len();
        let inserted = fragment.len_chars();
        let id = self.text.replace_fragment(range.clone(), fragment);

        self.next = range.start + inserted;
        self.index = self.next.saturating_sub(1);
        self.end = (self.end + inserted)
            .saturating_sub(removed)
            .min(self.text.len_chars());
        id
    }

    /// Read access to the underlying buffer.
    #[must_use]
    pub fn text(&self) -> &dyn ChipText {
        &*self.text
    }

    /// Write access to the underlying buffer.
    ///
    /// Edits made through this handle are not tracked by the window.
    pub fn text_mut(&mut self) -> &mut dyn ChipText {
        &mut *self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::buffer::ChipBuffer;

    #[test]
    fn test_scans_window_only() {
        let mut buffer = ChipBuffer::with_text("abcdef");
        let mut window = TextWindow::new(&mut buffer, 1, 4);
        let mut seen = String::new();
        while let Some(ch) = window.next_char() {
            seen.push(ch);
        }
        assert_eq!(seen, "bcd");
        assert_eq!(window.window_len(), 3);
    }

    #[test]
    fn test_delete_revisits_shifted_char() {
        let mut buffer = ChipBuffer::with_text("x;;y");
        let mut window = TextWindow::new(&mut buffer, 0, 4);
        let mut kept = String::new();
        while let Some(ch) = window.next_char() {
            if ch == ';' {
                window.delete_current();
            } else {
                kept.push(ch);
            }
        }
        assert_eq!(kept, "xy");
        assert_eq!(window.end(), 2);
        assert_eq!(buffer.to_plain_string(), "xy");
    }

    #[test]
    fn test_replace_moves_past_inserted_text() {
        let mut buffer = ChipBuffer::with_text("ab,cd,");
        let mut window = TextWindow::new(&mut buffer, 0, 6);
        let mut commas = Vec::new();
        while let Some(ch) = window.next_char() {
            if ch == ',' {
                let at = window.index();
                commas.push(at);
                window.replace(at..at + 1, &Fragment::plain("[,]"));
            }
        }
        assert_eq!(commas, vec![2, 7]);
        assert_eq!(window.end(), 10);
        assert_eq!(buffer.to_plain_string(), "ab[,]cd[,]");
    }

    #[test]
    fn test_window_is_clamped() {
        let mut buffer = ChipBuffer::with_text("ab");
        let window = TextWindow::new(&mut buffer, 1, 40);
        assert_eq!(window.end(), 2);
        assert_eq!(window.total_len(), 2);
    }
}
