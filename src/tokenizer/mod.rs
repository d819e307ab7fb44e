//! Token and chip boundary detection.
//!
//! A [`ChipTokenizer`] is the authority on how a buffer splits into chip
//! regions and plain tokens, and the only thing that converts between the
//! two. [`SpanChipTokenizer`] marks each chip with a pair of
//! [`CHIP_SEPARATOR`] characters padded by spaces:
//!
//! ```text
//! ' '  SEP  chip text  SEP  ' '
//! ```
//!
//! The separator is the ASCII unit separator. Nothing a user types or pastes
//! may contain it: text arriving from outside must go through
//! [`strip_separators`] before it reaches the buffer, otherwise region
//! boundaries could be forged. [`ChipField`](crate::ChipField) does this for
//! every edit.

mod span;

pub use span::SpanChipTokenizer;

use crate::chip::{Chip, ChipData, ChipId};
use crate::config::ChipConfiguration;
use crate::text::{ChipSpan, ChipText, Fragment};
use std::borrow::Cow;
use std::ops::Range;

/// Marks both ends of a chip's text inside the buffer. Untypable.
pub const CHIP_SEPARATOR: char = '\u{1F}';

/// Padding placed outside each separator so word-based input methods see
/// chips as separate words.
pub const AUTOCORRECT_SEPARATOR: char = ' ';

/// Remove every [`CHIP_SEPARATOR`] from externally sourced text.
#[must_use]
pub fn strip_separators(text: &str) -> Cow<'_, str> {
    if text.contains(CHIP_SEPARATOR) {
        Cow::Owned(text.chars().filter(|&c| c != CHIP_SEPARATOR).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Parser and mutator of a mixed chip/token buffer.
///
/// All positions are char offsets; ranges are half-open.
pub trait ChipTokenizer {
    /// Re-create every chip in `text` with a new visual configuration, and
    /// use it for chips created from now on. Token regions are untouched.
    fn apply_configuration(&mut self, text: &mut dyn ChipText, config: &ChipConfiguration);

    /// First index of the token enclosing `cursor`.
    fn find_token_start(&self, text: &dyn ChipText, cursor: usize) -> usize;

    /// End (exclusive) of the token enclosing `cursor`.
    fn find_token_end(&self, text: &dyn ChipText, cursor: usize) -> usize;

    /// Every unterminated token, last token in the buffer first.
    fn find_all_tokens(&self, text: &dyn ChipText) -> Vec<Range<usize>>;

    /// Build the chip fragment for a token's text.
    fn terminate_token(&mut self, text: &str, data: Option<ChipData>) -> Fragment;

    /// Rebuild any state derived from the chips already in `text`.
    ///
    /// Callers invoke this before a run of terminations against `text`, so
    /// the outcome depends on that buffer alone and not on buffers the
    /// tokenizer worked on earlier.
    fn sync_with(&mut self, _text: &dyn ChipText) {}

    /// Convert every unterminated token in `text` into a chip.
    fn terminate_all_tokens(&mut self, text: &mut dyn ChipText);

    /// Start of a chip's region, if the chip is in `text`.
    fn find_chip_start(&self, chip: ChipId, text: &dyn ChipText) -> Option<usize> {
        text.chip_span(chip).map(ChipSpan::start)
    }

    /// End (exclusive) of a chip's region, if the chip is in `text`.
    fn find_chip_end(&self, chip: ChipId, text: &dyn ChipText) -> Option<usize> {
        text.chip_span(chip).map(ChipSpan::end)
    }

    /// Chip regions intersecting `[start, end)`, left to right.
    fn find_all_chips(&self, start: usize, end: usize, text: &dyn ChipText) -> Vec<ChipSpan> {
        text.chip_spans()
            .iter()
            .filter(|span| span.intersects(start, end))
            .cloned()
            .collect()
    }

    /// Replace a chip's region with its plain text. Returns the caret
    /// position (end of the re-inserted text).
    fn revert_chip_to_token(&mut self, chip: ChipId, text: &mut dyn ChipText) -> Option<usize>;

    /// Remove a chip and its region from `text`. Returns the removed chip, or
    /// `None` if it was already gone.
    fn delete_chip(&mut self, chip: ChipId, text: &mut dyn ChipText) -> Option<Chip>;

    /// Remove a chip together with any padding the tokenizer added around it.
    fn delete_chip_and_padding(&mut self, chip: ChipId, text: &mut dyn ChipText) -> Option<Chip> {
        self.delete_chip(chip, text)
    }
}
