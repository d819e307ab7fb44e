//! Buffer contract and the rope-backed chip buffer.
//!
//! [`ChipText`] is everything the tokenizer and terminator handler need from
//! a host buffer: char access, range replacement and chip-region bookkeeping.
//! Any host (array-backed, rope-backed, toolkit-native) can implement it.
//! [`ChipBuffer`] is the implementation shipped with the crate.

use crate::chip::{ChipId, ChipState};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::text::span::{ChipSpan, Fragment};
use ropey::Rope;
use std::fmt;
use std::ops::Range;

/// Check that `range` lies inside `[0, len]` with `start <= end`.
pub fn validate_range(range: Range<usize>, len: usize) -> Result<Range<usize>> {
    if range.start > range.end || range.end > len {
        return Err(Error::OutOfRange {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(range)
}

/// Clamp `range` into `[0, len]` with `start <= end`, logging a warning when
/// anything had to change.
#[must_use]
pub fn clamp_range(range: Range<usize>, len: usize) -> Range<usize> {
    match validate_range(range.clone(), len) {
        Ok(range) => range,
        Err(err) => {
            emit_log(LogLevel::Warn, &format!("clamping: {err}"));
            let start = range.start.min(len);
            let end = range.end.min(len).max(start);
            start..end
        }
    }
}

/// Clamp a single position into `[0, len]`, logging like [`clamp_range`].
#[must_use]
pub fn clamp_position(pos: usize, len: usize) -> usize {
    clamp_range(pos..pos, len).start
}

/// A mutable char buffer holding chip regions.
///
/// All positions are char offsets. Implementations must keep
/// [`chip_spans`](ChipText::chip_spans) ordered by start and must shift,
/// clip or drop spans as text around or inside them is replaced.
pub trait ChipText {
    /// Length in chars.
    fn len_chars(&self) -> usize;

    /// Character at `idx`, or `None` past the end.
    fn char_at(&self, idx: usize) -> Option<char>;

    /// Text of a char range (clamped).
    fn slice(&self, range: Range<usize>) -> String;

    /// Chip regions, ordered by start.
    fn chip_spans(&self) -> &[ChipSpan];

    /// Mutable access to one chip region.
    fn chip_span_mut(&mut self, id: ChipId) -> Option<&mut ChipSpan>;

    /// Replace a char range (clamped) with a fragment. If the fragment is a
    /// non-empty chip, a new region is recorded over it and its id returned.
    fn replace_fragment(&mut self, range: Range<usize>, fragment: &Fragment) -> Option<ChipId>;

    /// Forget a chip region without touching the text.
    fn remove_chip_span(&mut self, id: ChipId) -> Option<ChipSpan>;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Replace a char range with plain text.
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.replace_fragment(range, &Fragment::plain(text));
    }

    /// Remove a char range.
    fn remove(&mut self, range: Range<usize>) {
        self.replace_fragment(range, &Fragment::default());
    }

    /// Insert a fragment at a char position.
    fn insert(&mut self, at: usize, fragment: &Fragment) -> Option<ChipId> {
        self.replace_fragment(at..at, fragment)
    }

    /// Append a fragment at the end.
    fn append(&mut self, fragment: &Fragment) -> Option<ChipId> {
        let len = self.len_chars();
        self.replace_fragment(len..len, fragment)
    }

    /// Clear all text and chip regions.
    fn clear(&mut self) {
        let len = self.len_chars();
        self.remove(0..len);
    }

    /// Look up a chip region by id.
    fn chip_span(&self, id: ChipId) -> Option<&ChipSpan> {
        self.chip_spans().iter().find(|span| span.id == id)
    }

    /// The chip region containing `pos`, if any.
    fn chip_at(&self, pos: usize) -> Option<&ChipSpan> {
        self.chip_spans().iter().find(|span| span.contains(pos))
    }

    /// The raw text, separators included.
    fn to_plain_string(&self) -> String {
        self.slice(0..self.len_chars())
    }
}

/// Rope-backed [`ChipText`].
///
/// # Examples
///
/// ```
/// use chipfield::{Chip, ChipBuffer, ChipText, Fragment};
///
/// let mut buffer = ChipBuffer::with_text("to: ");
/// let id = buffer.append(&Fragment::chip("alice", Chip::new("alice", None)));
/// assert_eq!(buffer.len_chars(), 9);
/// assert_eq!(buffer.chip_span(id.unwrap()).unwrap().range, 4..9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ChipBuffer {
    rope: Rope,
    spans: Vec<ChipSpan>,
    next_id: u64,
}

impl ChipBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding plain text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Copy any [`ChipText`], chip regions and ids included.
    #[must_use]
    pub fn copy_from(text: &dyn ChipText) -> Self {
        let spans = text.chip_spans().to_vec();
        let next_id = spans
            .iter()
            .map(|span| span.id.raw() + 1)
            .max()
            .unwrap_or(0);
        Self {
            rope: Rope::from_str(&text.to_plain_string()),
            spans,
            next_id,
        }
    }

    /// Number of chip regions.
    #[must_use]
    pub fn chip_count(&self) -> usize {
        self.spans.len()
    }

    /// Set the interaction state of a chip.
    pub fn set_chip_state(&mut self, id: ChipId, state: ChipState) -> Result<()> {
        let span = self.chip_span_mut(id).ok_or(Error::UnknownChip(id))?;
        span.chip.set_state(state);
        Ok(())
    }

    /// Move, clip or drop regions after `start..end` became `inserted` chars.
    fn adjust_spans(&mut self, start: usize, end: usize, inserted: usize) {
        let removed = end - start;
        self.spans.retain_mut(|span| {
            let Range { start: s, end: e } = span.range;
            if e <= start {
                return true;
            }
            if s >= end {
                span.range = (s - removed + inserted)..(e - removed + inserted);
                return true;
            }
            // The edit cuts into the region: keep whatever lies outside the
            // replaced range, growing around text inserted strictly inside.
            let new_start = if s < start { s } else { start + inserted };
            let new_end = if e > end { e - removed + inserted } else { start };
            span.range = new_start..new_end;
            new_start < new_end
        });
    }
}

impl ChipText for ChipBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let range = clamp_range(range, self.len_chars());
        self.rope.slice(range).to_string()
    }

    fn chip_spans(&self) -> &[ChipSpan] {
        &self.spans
    }

    fn chip_span_mut(&mut self, id: ChipId) -> Option<&mut ChipSpan> {
        self.spans.iter_mut().find(|span| span.id == id)
    }

    fn replace_fragment(&mut self, range: Range<usize>, fragment: &Fragment) -> Option<ChipId> {
        let Range { start, end } = clamp_range(range, self.len_chars());
        let inserted = fragment.len_chars();
        if start == end && inserted == 0 {
            return None;
        }

        if start < end {
            self.rope.remove(start..end);
        }
        if inserted > 0 {
            self.rope.insert(start, fragment.text());
        }
        self.adjust_spans(start, end, inserted);

        let chip = fragment.chip_ref().filter(|_| inserted > 0)?;
        let id = ChipId::from_raw(self.next_id);
        self.next_id += 1;
        let at = self.spans.partition_point(|span| span.range.start < start);
        self.spans
            .insert(at, ChipSpan::new(id, start..start + inserted, chip.clone()));
        Some(id)
    }

    fn remove_chip_span(&mut self, id: ChipId) -> Option<ChipSpan> {
        let idx = self.spans.iter().position(|span| span.id == id)?;
        Some(self.spans.remove(idx))
    }
}

impl fmt::Display for ChipBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl From<&str> for ChipBuffer {
    fn from(text: &str) -> Self {
        Self::with_text(text)
    }
}
