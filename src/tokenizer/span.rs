//! Separator-delimited chip tokenizer.

use super::{AUTOCORRECT_SEPARATOR, CHIP_SEPARATOR, ChipTokenizer, strip_separators};
use crate::chip::{Chip, ChipCreator, ChipData, ChipId, DefaultChipCreator};
use crate::config::ChipConfiguration;
use crate::text::{ChipText, Fragment, clamp_position};
use std::collections::HashSet;
use std::ops::Range;

/// Text written into the buffer for a chip: `' ' SEP text SEP ' '`.
fn region_text(value: &str) -> String {
    format!("{AUTOCORRECT_SEPARATOR}{CHIP_SEPARATOR}{value}{CHIP_SEPARATOR}{AUTOCORRECT_SEPARATOR}")
}

fn is_token_whitespace(ch: char) -> bool {
    ch != CHIP_SEPARATOR && ch.is_whitespace()
}

/// [`ChipTokenizer`] that delimits chips with [`CHIP_SEPARATOR`] pairs and
/// records each region in the buffer's span list.
///
/// # Examples
///
/// ```
/// use chipfield::{ChipBuffer, ChipText, ChipTokenizer, SpanChipTokenizer};
///
/// let mut tokenizer = SpanChipTokenizer::new();
/// let mut buffer = ChipBuffer::with_text("alice bob");
/// tokenizer.terminate_all_tokens(&mut buffer);
///
/// assert_eq!(buffer.chip_count(), 1);
/// assert_eq!(buffer.chip_spans()[0].chip.text(), "alice bob");
/// ```
#[derive(Debug, Default)]
pub struct SpanChipTokenizer<C = DefaultChipCreator> {
    creator: C,
    configuration: Option<ChipConfiguration>,
    seen: Option<HashSet<String>>,
}

impl SpanChipTokenizer {
    /// Tokenizer using the [`DefaultChipCreator`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_creator(DefaultChipCreator)
    }
}

impl<C: ChipCreator> SpanChipTokenizer<C> {
    /// Tokenizer building chips with a host-supplied factory.
    pub fn with_creator(creator: C) -> Self {
        Self {
            creator,
            configuration: None,
            seen: None,
        }
    }

    /// Refuse to chipify a value that is already present as a chip.
    ///
    /// Terminating a duplicate yields an empty fragment, so the duplicate
    /// token is removed from the buffer instead. A value becomes available
    /// again once its chip is gone from the buffer; the known values are
    /// re-read from the buffer on every [`sync_with`](ChipTokenizer::sync_with).
    #[must_use]
    pub fn unique_values(mut self) -> Self {
        self.seen = Some(HashSet::new());
        self
    }

    /// Whether [`unique_values`](Self::unique_values) is enabled.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.seen.is_some()
    }

    /// The configuration applied to new chips, if any was pushed.
    #[must_use]
    pub fn configuration(&self) -> Option<&ChipConfiguration> {
        self.configuration.as_ref()
    }

    #[must_use]
    pub fn creator(&self) -> &C {
        &self.creator
    }

    fn render(&self, mut chip: Chip) -> Fragment {
        if let Some(config) = &self.configuration {
            self.creator.configure_chip(&mut chip, config);
        }
        Fragment::chip(region_text(chip.text()), chip)
    }

    fn forget(&mut self, value: &str) {
        if let Some(seen) = &mut self.seen {
            seen.remove(value);
        }
    }
}

impl<C: ChipCreator> ChipTokenizer for SpanChipTokenizer<C> {
    fn apply_configuration(&mut self, text: &mut dyn ChipText, config: &ChipConfiguration) {
        let merged = self
            .configuration
            .map_or(*config, |current| current.merge(*config));
        self.configuration = Some(merged);

        let spans = self.find_all_chips(0, text.len_chars(), text);
        tracing::debug!(chips = spans.len(), "applying chip configuration");

        // Right to left, so a rewritten region never moves the ones still
        // to be visited.
        for span in spans.into_iter().rev() {
            let mut chip = self.creator.copy_chip(&span.chip);
            self.creator.configure_chip(&mut chip, &merged);
            let expected = region_text(chip.text());

            if text.slice(span.range.clone()) == expected {
                if let Some(slot) = text.chip_span_mut(span.id) {
                    slot.chip = chip;
                }
            } else {
                // The region was damaged by an outside edit; rebuild it.
                text.remove_chip_span(span.id);
                text.replace_fragment(span.range, &Fragment::chip(expected, chip));
            }
        }
    }

    fn find_token_start(&self, text: &dyn ChipText, cursor: usize) -> usize {
        let len = text.len_chars();
        let cursor = clamp_position(cursor, len);
        if let Some(span) = text.chip_at(cursor).filter(|span| span.start() < cursor) {
            return span.end();
        }

        let mut idx = cursor;
        while idx > 0 && text.char_at(idx - 1) != Some(CHIP_SEPARATOR) {
            idx -= 1;
        }
        while let Some(ch) = text.char_at(idx) {
            // Stop on the padding space in front of a chip, never inside it.
            if !is_token_whitespace(ch) || text.char_at(idx + 1) == Some(CHIP_SEPARATOR) {
                break;
            }
            idx += 1;
        }
        idx
    }

    fn find_token_end(&self, text: &dyn ChipText, cursor: usize) -> usize {
        let len = text.len_chars();
        let cursor = clamp_position(cursor, len);
        if let Some(span) = text.chip_at(cursor).filter(|span| span.start() < cursor) {
            return span.end();
        }

        for idx in cursor..len {
            if text.char_at(idx) == Some(CHIP_SEPARATOR) {
                let padded = idx > cursor && text.char_at(idx - 1) == Some(AUTOCORRECT_SEPARATOR);
                return if padded { idx - 1 } else { idx };
            }
        }
        len
    }

    fn find_all_tokens(&self, text: &dyn ChipText) -> Vec<Range<usize>> {
        let mut tokens = Vec::new();
        let mut inside_chip = false;
        let mut idx = text.len_chars();

        while idx > 0 {
            idx -= 1;
            let Some(ch) = text.char_at(idx) else {
                continue;
            };
            if ch == CHIP_SEPARATOR {
                inside_chip = !inside_chip;
                continue;
            }
            if inside_chip || ch.is_whitespace() {
                continue;
            }

            let start = self.find_token_start(text, idx);
            let end = self.find_token_end(text, idx);
            if start < end {
                tokens.push(start..end);
                idx = start;
            }
        }
        tokens
    }

    fn terminate_token(&mut self, text: &str, data: Option<ChipData>) -> Fragment {
        let stripped = strip_separators(text);
        let value = stripped.trim();
        if value.is_empty() {
            return Fragment::default();
        }
        if let Some(seen) = &mut self.seen {
            if !seen.insert(value.to_string()) {
                tracing::debug!(value, "dropping duplicate chip value");
                return Fragment::default();
            }
        }
        let chip = self.creator.create_chip(value, data);
        self.render(chip)
    }

    fn sync_with(&mut self, text: &dyn ChipText) {
        if let Some(seen) = &mut self.seen {
            seen.clear();
            seen.extend(text.chip_spans().iter().map(|span| span.chip.text().to_string()));
        }
    }

    fn terminate_all_tokens(&mut self, text: &mut dyn ChipText) {
        self.sync_with(text);
        let mut tokens = self.find_all_tokens(text);
        tokens.sort_by(|a, b| b.start.cmp(&a.start));
        tracing::debug!(tokens = tokens.len(), "terminating all tokens");

        for range in tokens {
            let value = text.slice(range.clone());
            let fragment = self.terminate_token(&value, None);
            text.replace_fragment(range, &fragment);
        }
    }

    fn revert_chip_to_token(&mut self, chip: ChipId, text: &mut dyn ChipText) -> Option<usize> {
        let span = text.remove_chip_span(chip)?;
        let value = span.chip.text().to_string();
        self.forget(&value);
        text.replace(span.range.clone(), &value);
        Some(span.start() + value.chars().count())
    }

    fn delete_chip(&mut self, chip: ChipId, text: &mut dyn ChipText) -> Option<Chip> {
        let span = text.remove_chip_span(chip)?;
        self.forget(span.chip.text());
        if !span.is_empty() {
            text.remove(span.range.clone());
        }
        Some(span.chip)
    }
}
