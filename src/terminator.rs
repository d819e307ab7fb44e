//! Terminator characters and what they do to the surrounding text.
//!
//! A [`ChipTerminatorHandler`] scans freshly edited text for configured
//! trigger characters and, per trigger, asks the tokenizer to turn nearby
//! text into chips. Behaviors are configured per character, with an optional
//! override for pasted text.

use crate::error::{Error, Result};
use crate::text::{ChipText, TextWindow};
use crate::tokenizer::ChipTokenizer;
use std::collections::HashMap;

/// What a trigger character chipifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminatorBehavior {
    /// Every token in the whole buffer.
    ChipifyAll,
    /// The token enclosing the trigger, which may extend past it.
    ChipifyCurrentToken,
    /// The text between the previous chip (or buffer start) and the trigger.
    ChipifyToTerminator,
}

impl TerminatorBehavior {
    /// Integer code of this behavior (`0` all, `1` current token, `2` to
    /// terminator).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ChipifyAll => 0,
            Self::ChipifyCurrentToken => 1,
            Self::ChipifyToTerminator => 2,
        }
    }
}

impl TryFrom<i32> for TerminatorBehavior {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::ChipifyAll),
            1 => Ok(Self::ChipifyCurrentToken),
            2 => Ok(Self::ChipifyToTerminator),
            other => Err(Error::UnknownBehavior(other)),
        }
    }
}

/// How triggers inside pasted text are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PasteBehavior {
    /// Each trigger keeps its own behavior.
    UseDefault,
    /// Every trigger in the paste uses this behavior.
    Override(TerminatorBehavior),
}

impl PasteBehavior {
    /// Code meaning [`PasteBehavior::UseDefault`].
    pub const USE_DEFAULT_CODE: i32 = -1;
}

impl Default for PasteBehavior {
    fn default() -> Self {
        Self::Override(TerminatorBehavior::ChipifyToTerminator)
    }
}

impl From<TerminatorBehavior> for PasteBehavior {
    fn from(behavior: TerminatorBehavior) -> Self {
        Self::Override(behavior)
    }
}

impl TryFrom<i32> for PasteBehavior {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        if code == Self::USE_DEFAULT_CODE {
            Ok(Self::UseDefault)
        } else {
            TerminatorBehavior::try_from(code).map(Self::Override)
        }
    }
}

/// Finds trigger characters in an edited range and chipifies around them.
pub trait ChipTerminatorHandler {
    /// Replace the whole trigger map.
    fn set_terminators(&mut self, terminators: HashMap<char, TerminatorBehavior>);

    /// Add or replace one trigger.
    fn add_terminator(&mut self, ch: char, behavior: TerminatorBehavior);

    fn set_paste_behavior(&mut self, behavior: PasteBehavior);

    /// Scan `[start, end)` of `text` for triggers and handle each one.
    ///
    /// Returns the caret position the host should apply, or `None` to leave
    /// the caret where it is.
    fn find_and_handle_chip_terminators(
        &self,
        tokenizer: &mut dyn ChipTokenizer,
        text: &mut dyn ChipText,
        start: usize,
        end: usize,
        is_paste: bool,
    ) -> Option<usize>;
}

/// Trigger-map driven [`ChipTerminatorHandler`].
///
/// # Examples
///
/// ```
/// use chipfield::{
///     ChipBuffer, ChipTerminatorHandler, ChipText, DefaultChipTerminatorHandler,
///     SpanChipTokenizer, TerminatorBehavior,
/// };
///
/// let mut handler = DefaultChipTerminatorHandler::new();
/// handler.add_terminator(';', TerminatorBehavior::ChipifyCurrentToken);
///
/// let mut tokenizer = SpanChipTokenizer::new();
/// let mut buffer = ChipBuffer::with_text("token;");
/// let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 5, 6, false);
///
/// assert_eq!(buffer.chip_count(), 1);
/// assert_eq!(caret, Some(buffer.len_chars()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultChipTerminatorHandler {
    terminators: HashMap<char, TerminatorBehavior>,
    paste_behavior: PasteBehavior,
}

impl DefaultChipTerminatorHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger by behavior code. Unknown codes are rejected.
    pub fn add_terminator_code(&mut self, ch: char, code: i32) -> Result<()> {
        let behavior = TerminatorBehavior::try_from(code)?;
        self.add_terminator(ch, behavior);
        Ok(())
    }

    /// Set the paste behavior by code (`-1` uses each trigger's own).
    pub fn set_paste_behavior_code(&mut self, code: i32) -> Result<()> {
        self.paste_behavior = PasteBehavior::try_from(code)?;
        Ok(())
    }

    #[must_use]
    pub fn terminators(&self) -> &HashMap<char, TerminatorBehavior> {
        &self.terminators
    }

    #[must_use]
    pub fn paste_behavior(&self) -> PasteBehavior {
        self.paste_behavior
    }

    #[must_use]
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains_key(&ch)
    }

    fn effective_behavior(&self, own: TerminatorBehavior, is_paste: bool) -> TerminatorBehavior {
        match self.paste_behavior {
            PasteBehavior::Override(behavior) if is_paste => behavior,
            _ => own,
        }
    }

    fn chipify_all(window: &mut TextWindow<'_>, tokenizer: &mut dyn ChipTokenizer) -> usize {
        window.delete_current();
        tokenizer.terminate_all_tokens(window.text_mut());
        window.total_len()
    }

    fn chipify_current_token(
        window: &mut TextWindow<'_>,
        tokenizer: &mut dyn ChipTokenizer,
    ) -> Option<usize> {
        window.delete_current();
        let index = window.index();
        let token_start = tokenizer.find_token_start(window.text(), index);
        let token_end = tokenizer.find_token_end(window.text(), index);
        if token_start >= token_end {
            return None;
        }

        let value = window.text().slice(token_start..token_end);
        let fragment = tokenizer.terminate_token(&value, None);
        let inserted = fragment.len_chars();
        window.replace(token_start..token_end, &fragment);
        Some(token_start + inserted)
    }

    fn chipify_to_terminator(window: &mut TextWindow<'_>, tokenizer: &mut dyn ChipTokenizer) {
        let index = window.index();
        if index > 0 {
            let token_start = tokenizer.find_token_start(window.text(), index);
            if token_start < index {
                let value = window.text().slice(token_start..index);
                let fragment = tokenizer.terminate_token(&value, None);
                window.replace(token_start..index + 1, &fragment);
                return;
            }
        }
        window.delete_current();
    }
}

impl ChipTerminatorHandler for DefaultChipTerminatorHandler {
    fn set_terminators(&mut self, terminators: HashMap<char, TerminatorBehavior>) {
        self.terminators = terminators;
    }

    fn add_terminator(&mut self, ch: char, behavior: TerminatorBehavior) {
        self.terminators.insert(ch, behavior);
    }

    fn set_paste_behavior(&mut self, behavior: PasteBehavior) {
        self.paste_behavior = behavior;
    }

    fn find_and_handle_chip_terminators(
        &self,
        tokenizer: &mut dyn ChipTokenizer,
        text: &mut dyn ChipText,
        start: usize,
        end: usize,
        is_paste: bool,
    ) -> Option<usize> {
        if self.terminators.is_empty() {
            return None;
        }

        tokenizer.sync_with(text);
        let mut window = TextWindow::new(text, start, end);
        let mut caret = None;

        while let Some(ch) = window.next_char() {
            let Some(&own) = self.terminators.get(&ch) else {
                continue;
            };
            // Padding and text of existing chips are not typed input.
            if window.text().chip_at(window.index()).is_some() {
                continue;
            }

            let behavior = self.effective_behavior(own, is_paste);
            tracing::trace!(?ch, index = window.index(), ?behavior, "chip terminator");
            match behavior {
                TerminatorBehavior::ChipifyAll => {
                    // The whole buffer was rewritten; later positions are stale.
                    return Some(Self::chipify_all(&mut window, tokenizer));
                }
                TerminatorBehavior::ChipifyCurrentToken => {
                    if let Some(position) = Self::chipify_current_token(&mut window, tokenizer) {
                        caret = Some(position);
                    }
                }
                TerminatorBehavior::ChipifyToTerminator => {
                    Self::chipify_to_terminator(&mut window, tokenizer);
                }
            }
        }
        caret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ChipBuffer;
    use crate::tokenizer::SpanChipTokenizer;

    fn handler() -> DefaultChipTerminatorHandler {
        let mut handler = DefaultChipTerminatorHandler::new();
        handler.add_terminator('\n', TerminatorBehavior::ChipifyAll);
        handler.add_terminator(';', TerminatorBehavior::ChipifyCurrentToken);
        handler.add_terminator(' ', TerminatorBehavior::ChipifyToTerminator);
        handler
    }

    #[test]
    fn test_behavior_codes() {
        for behavior in [
            TerminatorBehavior::ChipifyAll,
            TerminatorBehavior::ChipifyCurrentToken,
            TerminatorBehavior::ChipifyToTerminator,
        ] {
            assert_eq!(TerminatorBehavior::try_from(behavior.code()), Ok(behavior));
        }
        assert_eq!(
            TerminatorBehavior::try_from(7),
            Err(Error::UnknownBehavior(7))
        );
        assert_eq!(PasteBehavior::try_from(-1), Ok(PasteBehavior::UseDefault));
        assert_eq!(
            PasteBehavior::try_from(0),
            Ok(PasteBehavior::Override(TerminatorBehavior::ChipifyAll))
        );
        assert_eq!(PasteBehavior::try_from(-2), Err(Error::UnknownBehavior(-2)));
    }

    #[test]
    fn test_code_setters_fail_fast() {
        let mut handler = DefaultChipTerminatorHandler::new();
        assert!(handler.add_terminator_code(',', 1).is_ok());
        assert_eq!(
            handler.add_terminator_code('.', 9),
            Err(Error::UnknownBehavior(9))
        );
        assert!(handler.is_terminator(','));
        assert!(!handler.is_terminator('.'));

        assert!(handler.set_paste_behavior_code(3).is_err());
        assert_eq!(handler.paste_behavior(), PasteBehavior::default());
        handler.set_paste_behavior_code(-1).unwrap();
        assert_eq!(handler.paste_behavior(), PasteBehavior::UseDefault);
    }

    #[test]
    fn test_no_terminators_is_noop() {
        let handler = DefaultChipTerminatorHandler::new();
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::with_text("a;b\n");
        let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, 4, false);
        assert_eq!(caret, None);
        assert_eq!(buffer.to_plain_string(), "a;b\n");
    }

    #[test]
    fn test_empty_range() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::new();
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, 0, false);
        assert_eq!(caret, None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_out_of_range_scan_is_clamped() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::with_text("ab;");
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 1, 40, false);
        assert_eq!(caret, Some(buffer.len_chars()));
        assert_eq!(buffer.chip_count(), 1);
    }

    #[test]
    fn test_current_token_extends_past_trigger() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::with_text("to;ken");
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 2, 3, false);
        assert_eq!(buffer.chip_spans()[0].chip.text(), "token");
        assert_eq!(caret, Some(9));
    }

    #[test]
    fn test_current_token_without_token_keeps_caret() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::with_text(";");
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, 1, false);
        assert_eq!(caret, None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_to_terminator_splits_token() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::with_text("to ken");
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 2, 3, false);
        assert_eq!(caret, None);
        assert_eq!(buffer.chip_spans()[0].chip.text(), "to");
        assert!(buffer.to_plain_string().ends_with("ken"));
    }

    #[test]
    fn test_triggers_inside_chips_are_ignored() {
        let mut tokenizer = SpanChipTokenizer::new();
        let mut buffer = ChipBuffer::new();
        buffer.append(&tokenizer.terminate_token("a b", None));
        let before = buffer.to_plain_string();
        let len = buffer.len_chars();
        let caret = handler().find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, len, false);
        assert_eq!(caret, None);
        assert_eq!(buffer.to_plain_string(), before);
    }
}
