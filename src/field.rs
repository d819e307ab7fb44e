//! An editable chip field: buffer, caret and the edit pipeline.
//!
//! [`ChipField`] plays the part of the host text widget. Every user edit goes
//! through [`ChipField::edit`], which
//!
//! 1. deletes whole chips touched by a removed range (backspacing into a
//!    chip removes the chip),
//! 2. strips separators and illegal characters from the inserted text,
//! 3. lets the terminator handler chipify around trigger characters, and
//! 4. places the caret.
//!
//! Programmatic changes (setting values, chipifying, validation) run with
//! notifications suppressed, so they are never fed back into the pipeline.

use crate::chip::{Chip, ChipData, ChipId, ChipInfo, ChipState};
use crate::config::ChipConfiguration;
use crate::error::{Error, Result};
use crate::terminator::{
    ChipTerminatorHandler, DefaultChipTerminatorHandler, PasteBehavior, TerminatorBehavior,
};
use crate::text::{ChipBuffer, ChipSpan, ChipText, Fragment, clamp_range};
use crate::tokenizer::{ChipTokenizer, SpanChipTokenizer, strip_separators};
use crate::validator::{ChipValidator, ChipifyingValidator, IllegalCharacters, remove_illegal};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Where an edit came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Typed input, including input method commits.
    #[default]
    Typed,
    /// A clipboard paste.
    Paste,
}

/// Keeps edit notifications suppressed while alive.
///
/// Guards nest; notifications resume when the last one is dropped.
#[derive(Debug)]
#[must_use = "notifications resume as soon as the guard is dropped"]
pub struct NotificationGuard {
    depth: Rc<Cell<u32>>,
}

impl NotificationGuard {
    fn new(depth: &Rc<Cell<u32>>) -> Self {
        depth.set(depth.get() + 1);
        Self {
            depth: Rc::clone(depth),
        }
    }
}

impl Drop for NotificationGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Map `pos` across `replaced` becoming `inserted` chars. Positions inside
/// the replaced range snap to its start, or to the end of the inserted text
/// when `towards_end` is set.
fn remap(pos: usize, replaced: &Range<usize>, inserted: usize, towards_end: bool) -> usize {
    if pos <= replaced.start {
        pos
    } else if pos >= replaced.end {
        pos - replaced.len() + inserted
    } else if towards_end {
        replaced.start + inserted
    } else {
        replaced.start
    }
}

type ChipRemovedListener = Box<dyn FnMut(&Chip)>;

/// A chip input field without any UI.
///
/// # Examples
///
/// ```
/// use chipfield::{ChipField, TerminatorBehavior};
///
/// let mut field = ChipField::new();
/// field.add_terminator(',', TerminatorBehavior::ChipifyToTerminator);
///
/// field.insert("alice,bob,ca");
/// assert_eq!(field.chip_values(), vec!["alice", "bob"]);
/// assert_eq!(field.token_values(), vec!["ca"]);
/// ```
pub struct ChipField {
    buffer: ChipBuffer,
    caret: usize,
    tokenizer: Box<dyn ChipTokenizer>,
    terminator_handler: Option<Box<dyn ChipTerminatorHandler>>,
    validator: Option<Box<dyn ChipValidator>>,
    illegal_characters: Option<Box<dyn IllegalCharacters>>,
    on_chip_removed: Option<ChipRemovedListener>,
    suppressed: Rc<Cell<u32>>,
}

impl Default for ChipField {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipField {
    /// Field with a [`SpanChipTokenizer`], a terminator handler without any
    /// triggers and a [`ChipifyingValidator`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_tokenizer(SpanChipTokenizer::new())
    }

    pub fn with_tokenizer(tokenizer: impl ChipTokenizer + 'static) -> Self {
        Self {
            buffer: ChipBuffer::new(),
            caret: 0,
            tokenizer: Box::new(tokenizer),
            terminator_handler: Some(Box::new(DefaultChipTerminatorHandler::new())),
            validator: Some(Box::new(ChipifyingValidator)),
            illegal_characters: None,
            on_chip_removed: None,
            suppressed: Rc::new(Cell::new(0)),
        }
    }

    // --- configuration ---------------------------------------------------

    pub fn set_terminator_handler(&mut self, handler: impl ChipTerminatorHandler + 'static) {
        self.terminator_handler = Some(Box::new(handler));
    }

    /// Stop handling trigger characters altogether.
    pub fn clear_terminator_handler(&mut self) {
        self.terminator_handler = None;
    }

    /// Replace the trigger map of the current terminator handler.
    pub fn set_terminators(&mut self, terminators: HashMap<char, TerminatorBehavior>) {
        if let Some(handler) = &mut self.terminator_handler {
            handler.set_terminators(terminators);
        }
    }

    pub fn add_terminator(&mut self, ch: char, behavior: TerminatorBehavior) {
        if let Some(handler) = &mut self.terminator_handler {
            handler.add_terminator(ch, behavior);
        }
    }

    pub fn set_paste_behavior(&mut self, behavior: PasteBehavior) {
        if let Some(handler) = &mut self.terminator_handler {
            handler.set_paste_behavior(behavior);
        }
    }

    pub fn set_validator(&mut self, validator: impl ChipValidator + 'static) {
        self.validator = Some(Box::new(validator));
    }

    pub fn clear_validator(&mut self) {
        self.validator = None;
    }

    /// Characters dropped from every typed or pasted edit.
    pub fn set_illegal_characters(&mut self, illegal: impl IllegalCharacters + 'static) {
        self.illegal_characters = Some(Box::new(illegal));
    }

    pub fn clear_illegal_characters(&mut self) {
        self.illegal_characters = None;
    }

    /// Called for every chip an edit deletes.
    pub fn set_on_chip_removed(&mut self, listener: impl FnMut(&Chip) + 'static) {
        self.on_chip_removed = Some(Box::new(listener));
    }

    // --- notification suppression ----------------------------------------

    /// Suppress edit processing until the returned guard is dropped.
    ///
    /// While suppressed, [`edit`](Self::edit) applies changes as raw text.
    pub fn suppress_notifications(&self) -> NotificationGuard {
        NotificationGuard::new(&self.suppressed)
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get() > 0
    }

    // --- buffer and caret -------------------------------------------------

    #[must_use]
    pub fn buffer(&self) -> &ChipBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret. Positions past the end are rejected.
    pub fn set_caret(&mut self, caret: usize) -> Result<()> {
        let len = self.buffer.len_chars();
        if caret > len {
            return Err(Error::OutOfRange {
                start: caret,
                end: caret,
                len,
            });
        }
        self.caret = caret;
        Ok(())
    }

    /// The caret, moved past the chip it sits inside of (if any).
    fn caret_outside_chip(&self) -> usize {
        self.buffer
            .chip_at(self.caret)
            .filter(|span| span.start() < self.caret)
            .map_or(self.caret, ChipSpan::end)
    }

    fn replace_tracked(&mut self, range: Range<usize>, fragment: &Fragment) -> Option<ChipId> {
        let range = clamp_range(range, self.buffer.len_chars());
        let inserted = fragment.len_chars();
        let id = self.buffer.replace_fragment(range.clone(), fragment);
        self.caret = remap(self.caret, &range, inserted, true);
        id
    }

    fn notify_removed(&mut self, chip: &Chip) {
        if let Some(listener) = &mut self.on_chip_removed {
            listener(chip);
        }
    }

    // --- edit pipeline ----------------------------------------------------

    /// Replace `range` with `text` as the user would.
    ///
    /// Returns the caret position requested by the terminator handler, or
    /// `None` if it did not ask for one. The field's caret is updated either
    /// way.
    pub fn edit(&mut self, range: Range<usize>, text: &str, kind: EditKind) -> Option<usize> {
        let range = clamp_range(range, self.buffer.len_chars());
        // Separators can never come from outside, suppressed or not.
        let text = strip_separators(text);

        if self.is_suppressed() {
            self.buffer.replace(range.clone(), &text);
            self.caret = range.start + text.chars().count();
            return None;
        }
        let _guard = self.suppress_notifications();

        let Range { mut start, mut end } = range;
        if start == end {
            // Typing inside a chip lands after it.
            if let Some(span) = self.buffer.chip_at(start).filter(|span| span.start() < start) {
                start = span.end();
                end = start;
            }
        } else {
            let doomed = self.tokenizer.find_all_chips(start, end, &self.buffer);
            for span in doomed.iter().rev() {
                if let Some(chip) = self.tokenizer.delete_chip(span.id, &mut self.buffer) {
                    start = remap(start, &span.range, 0, false);
                    end = remap(end, &span.range, 0, true);
                    tracing::debug!(chip = %span.id, text = chip.text(), "chip removed by edit");
                    self.notify_removed(&chip);
                }
            }
        }

        let inserted_text = match &self.illegal_characters {
            Some(illegal) => remove_illegal(&text, illegal.as_ref()),
            None => text.into_owned(),
        };
        let inserted = inserted_text.chars().count();
        self.buffer.replace(start..end, &inserted_text);
        self.caret = start + inserted;

        if inserted == 0 {
            return None;
        }
        let handler = self.terminator_handler.as_ref()?;

        let before = self.buffer.len_chars();
        let requested = handler.find_and_handle_chip_terminators(
            self.tokenizer.as_mut(),
            &mut self.buffer,
            start,
            start + inserted,
            kind == EditKind::Paste,
        );
        let after = self.buffer.len_chars();
        self.caret = match requested {
            Some(caret) => caret.min(after),
            // Handled triggers all sit before the caret.
            None => (self.caret + after).saturating_sub(before).min(after),
        };
        requested
    }

    /// Type `text` at the caret.
    pub fn insert(&mut self, text: &str) -> Option<usize> {
        self.edit(self.caret..self.caret, text, EditKind::Typed)
    }

    /// Paste `text` at the caret.
    pub fn paste(&mut self, text: &str) -> Option<usize> {
        self.edit(self.caret..self.caret, text, EditKind::Paste)
    }

    /// Delete the character before the caret, or the whole chip it belongs
    /// to.
    pub fn delete_backward(&mut self) -> Option<usize> {
        if self.caret == 0 {
            return None;
        }
        self.edit(self.caret - 1..self.caret, "", EditKind::Typed)
    }

    // --- content ----------------------------------------------------------

    /// Remove everything, deleting chips through the tokenizer.
    pub fn clear(&mut self) {
        let _guard = self.suppress_notifications();
        let ids: Vec<ChipId> = self.buffer.chip_spans().iter().map(|span| span.id).collect();
        for id in ids.into_iter().rev() {
            self.tokenizer.delete_chip(id, &mut self.buffer);
        }
        self.buffer.clear();
        self.caret = 0;
    }

    /// Replace the content with one chip per value.
    pub fn set_chip_values<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.set_chips(values.into_iter().map(|value| ChipInfo::new(value.as_ref())));
    }

    /// Replace the content with one chip per entry, carrying its data.
    pub fn set_chips<I>(&mut self, chips: I)
    where
        I: IntoIterator<Item = ChipInfo>,
    {
        let _guard = self.suppress_notifications();
        self.clear();
        self.tokenizer.sync_with(&self.buffer);
        for info in chips {
            let fragment = self.tokenizer.terminate_token(&info.text, info.data);
            self.buffer.append(&fragment);
        }
        self.caret = self.buffer.len_chars();
    }

    /// Chips in reading order.
    pub fn all_chips(&self) -> impl Iterator<Item = &Chip> + '_ {
        self.buffer.chip_spans().iter().map(|span| &span.chip)
    }

    #[must_use]
    pub fn chip_values(&self) -> Vec<String> {
        self.all_chips().map(|chip| chip.text().to_string()).collect()
    }

    /// Unterminated tokens in reading order.
    #[must_use]
    pub fn token_values(&self) -> Vec<String> {
        let mut tokens = self.tokenizer.find_all_tokens(&self.buffer);
        tokens.reverse();
        tokens
            .into_iter()
            .map(|range| self.buffer.slice(range))
            .collect()
    }

    /// Chip values followed by token values.
    #[must_use]
    pub fn chip_and_token_values(&self) -> Vec<String> {
        let mut values = self.chip_values();
        values.extend(self.token_values());
        values
    }

    /// Text of `range` with every chip region replaced by its chip text.
    fn plain_text(&self, range: Range<usize>) -> String {
        let Range { start, end } = range;
        let mut out = String::new();
        let mut pos = start;
        for span in self.buffer.chip_spans() {
            if span.end() <= start || span.start() >= end {
                continue;
            }
            if span.start() > pos {
                out.push_str(&self.buffer.slice(pos..span.start()));
            }
            out.push_str(span.chip.text());
            pos = pos.max(span.end());
        }
        if pos < end {
            out.push_str(&self.buffer.slice(pos..end));
        }
        out
    }

    // --- chip operations --------------------------------------------------

    /// Turn `range` into one chip. Chips inside the range are merged into it.
    pub fn chipify(&mut self, range: Range<usize>) -> Option<ChipId> {
        let _guard = self.suppress_notifications();
        let Range { mut start, mut end } = clamp_range(range, self.buffer.len_chars());
        if start == end {
            return None;
        }

        let merged = self.tokenizer.find_all_chips(start, end, &self.buffer);
        for span in merged.iter().rev() {
            if self
                .tokenizer
                .revert_chip_to_token(span.id, &mut self.buffer)
                .is_some()
            {
                let inserted = span.chip.text().chars().count();
                start = remap(start, &span.range, inserted, false);
                end = remap(end, &span.range, inserted, true);
                self.caret = remap(self.caret, &span.range, inserted, true);
            }
        }

        let value = self.buffer.slice(start..end);
        self.tokenizer.sync_with(&self.buffer);
        let fragment = self.tokenizer.terminate_token(&value, None);
        self.replace_tracked(start..end, &fragment)
    }

    /// Chipify every unterminated token.
    pub fn chipify_all_unterminated_tokens(&mut self) {
        let _guard = self.suppress_notifications();
        let at_end = self.caret >= self.buffer.len_chars();
        self.tokenizer.terminate_all_tokens(&mut self.buffer);
        let len = self.buffer.len_chars();
        self.caret = if at_end { len } else { self.caret.min(len) };
    }

    /// Replace the token at the caret with a chip for a picked suggestion.
    pub fn select_suggestion(&mut self, text: &str, data: Option<ChipData>) -> Option<ChipId> {
        let _guard = self.suppress_notifications();
        let end = self.caret_outside_chip();
        let start = self.tokenizer.find_token_start(&self.buffer, end).min(end);

        self.tokenizer.sync_with(&self.buffer);
        let fragment = self.tokenizer.terminate_token(text, data);
        let inserted = fragment.len_chars();
        let id = self.buffer.replace_fragment(start..end, &fragment);
        self.caret = start + inserted;
        id
    }

    /// Turn a chip back into editable text, either in place or moved to the
    /// end of the field. The caret lands at the end of that text.
    pub fn edit_chip(&mut self, id: ChipId, move_to_end: bool) -> Result<()> {
        let span = self.buffer.chip_span(id).cloned().ok_or(Error::UnknownChip(id))?;
        let _guard = self.suppress_notifications();

        if move_to_end {
            self.buffer.append(&Fragment::plain(span.chip.text()));
            self.tokenizer.delete_chip_and_padding(id, &mut self.buffer);
            self.caret = self.buffer.len_chars();
        } else {
            self.tokenizer.revert_chip_to_token(id, &mut self.buffer);
            self.caret = self.tokenizer.find_token_end(&self.buffer, span.start());
        }
        Ok(())
    }

    pub fn set_chip_state(&mut self, id: ChipId, state: ChipState) -> Result<()> {
        self.buffer.set_chip_state(id, state)
    }

    /// Repair the content with the validator if it is invalid. Returns
    /// whether anything changed.
    pub fn perform_validation(&mut self) -> bool {
        let Some(validator) = &self.validator else {
            return false;
        };
        if self.buffer.is_empty() || validator.is_valid(self.tokenizer.as_ref(), &self.buffer) {
            return false;
        }

        let _guard = NotificationGuard::new(&self.suppressed);
        self.buffer = validator.fix_text(self.tokenizer.as_mut(), &self.buffer);
        self.caret = self.buffer.len_chars();
        tracing::debug!(chips = self.buffer.chip_count(), "field repaired by validator");
        true
    }

    /// Push a new visual configuration to every chip.
    pub fn invalidate_chips(&mut self, config: &ChipConfiguration) {
        let _guard = self.suppress_notifications();
        self.tokenizer.apply_configuration(&mut self.buffer, config);
    }
}

impl fmt::Display for ChipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text(0..self.buffer.len_chars()))
    }
}

impl fmt::Debug for ChipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChipField")
            .field("buffer", &self.buffer)
            .field("caret", &self.caret)
            .field("suppressed", &self.suppressed.get())
            .finish_non_exhaustive()
    }
}
