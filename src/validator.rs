//! Validation of a whole buffer, and input character filtering.

use crate::text::{ChipBuffer, ChipText};
use crate::tokenizer::ChipTokenizer;
use std::collections::HashSet;

/// Checks a buffer and repairs it when invalid.
///
/// Validation does not assume any particular edit just happened, so it can
/// run at any time (for example when the field loses focus).
pub trait ChipValidator {
    fn is_valid(&self, tokenizer: &dyn ChipTokenizer, text: &dyn ChipText) -> bool;

    /// A repaired copy of `text` for which [`is_valid`](Self::is_valid)
    /// holds. `text` itself is not modified.
    fn fix_text(&self, tokenizer: &mut dyn ChipTokenizer, text: &dyn ChipText) -> ChipBuffer;
}

/// Valid when no plain tokens are left; repairs by chipifying all of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChipifyingValidator;

impl ChipValidator for ChipifyingValidator {
    fn is_valid(&self, tokenizer: &dyn ChipTokenizer, text: &dyn ChipText) -> bool {
        tokenizer.find_all_tokens(text).is_empty()
    }

    fn fix_text(&self, tokenizer: &mut dyn ChipTokenizer, text: &dyn ChipText) -> ChipBuffer {
        let mut fixed = ChipBuffer::copy_from(text);
        tokenizer.terminate_all_tokens(&mut fixed);
        fixed
    }
}

/// Characters that may never be typed or pasted into a field.
pub trait IllegalCharacters {
    fn is_illegal(&self, ch: char) -> bool;
}

impl<F> IllegalCharacters for F
where
    F: Fn(char) -> bool,
{
    fn is_illegal(&self, ch: char) -> bool {
        self(ch)
    }
}

/// A fixed set of illegal characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet(HashSet<char>);

impl CharSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ch: char) -> bool {
        self.0.insert(ch)
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&str> for CharSet {
    fn from(chars: &str) -> Self {
        chars.chars().collect()
    }
}

impl IllegalCharacters for CharSet {
    fn is_illegal(&self, ch: char) -> bool {
        self.contains(ch)
    }
}

/// `text` without the characters `illegal` rejects.
#[must_use]
pub fn remove_illegal(text: &str, illegal: &dyn IllegalCharacters) -> String {
    text.chars().filter(|&ch| !illegal.is_illegal(ch)).collect()
}
