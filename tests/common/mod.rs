#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use chipfield::{
    ChipBuffer, ChipText, ChipTokenizer, DefaultChipTerminatorHandler, Fragment,
    SpanChipTokenizer, TerminatorBehavior,
};
use tracing::Level;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Raw buffer text with separators drawn as `|` and spaces as `·`.
pub fn render(text: &dyn ChipText) -> String {
    text.to_plain_string()
        .replace(chipfield::CHIP_SEPARATOR, "|")
        .replace(' ', "·")
}

/// Build a buffer from parts; parts starting with `@` become chips.
pub fn buffer_of(tokenizer: &mut SpanChipTokenizer, parts: &[&str]) -> ChipBuffer {
    let mut buffer = ChipBuffer::new();
    for part in parts {
        match part.strip_prefix('@') {
            Some(value) => buffer.append(&tokenizer.terminate_token(value, None)),
            None => buffer.append(&Fragment::plain(*part)),
        };
    }
    buffer
}

/// Chip texts in reading order.
pub fn chip_texts(text: &dyn ChipText) -> Vec<String> {
    text.chip_spans()
        .iter()
        .map(|span| span.chip.text().to_string())
        .collect()
}

/// `\n` chipifies all, `;` the current token, space up to the terminator.
pub fn standard_handler() -> DefaultChipTerminatorHandler {
    let mut handler = DefaultChipTerminatorHandler::new();
    handler
        .add_terminator_code('\n', TerminatorBehavior::ChipifyAll.code())
        .unwrap();
    handler
        .add_terminator_code(';', TerminatorBehavior::ChipifyCurrentToken.code())
        .unwrap();
    handler
        .add_terminator_code(' ', TerminatorBehavior::ChipifyToTerminator.code())
        .unwrap();
    handler
}

/// Every separator belongs to exactly one chip span and spans never overlap.
pub fn assert_regions_consistent(text: &dyn ChipText) {
    let spans = text.chip_spans();
    for pair in spans.windows(2) {
        assert!(
            pair[0].end() <= pair[1].start(),
            "chip regions overlap: {:?} / {:?}",
            pair[0].range,
            pair[1].range
        );
    }
    for idx in 0..text.len_chars() {
        if text.char_at(idx) == Some(chipfield::CHIP_SEPARATOR) {
            let owners = spans.iter().filter(|span| span.contains(idx)).count();
            assert_eq!(owners, 1, "separator at {idx} in {:?}", render(text));
        }
    }
    for span in spans {
        let inside = (span.start()..span.end())
            .filter(|&idx| text.char_at(idx) == Some(chipfield::CHIP_SEPARATOR))
            .count();
        assert_eq!(inside, 2, "chip region {:?} in {:?}", span.range, render(text));
    }
}
