//! Fuzz target for the chip field edit pipeline.
//!
//! Drives arbitrary typing, pasting, deletion and chip operations and checks
//! that chip regions stay well formed: every separator belongs to exactly one
//! region and the caret never leaves the buffer.

#![no_main]

use arbitrary::Arbitrary;
use chipfield::{
    CHIP_SEPARATOR, ChipField, ChipText, EditKind, PasteBehavior, SpanChipTokenizer,
    TerminatorBehavior,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Action {
    Type(String),
    Paste(String),
    Replace { start: u16, end: u16, text: String },
    Backspace,
    MoveCaret(u16),
    Chipify { start: u16, end: u16 },
    ChipifyAll,
    EditChip { index: u8, move_to_end: bool },
    Validate,
}

#[derive(Arbitrary, Debug)]
struct Input {
    unique: bool,
    paste_override: bool,
    actions: Vec<Action>,
}

const MAX_ACTIONS: usize = 256;

fn check_regions(field: &ChipField) {
    let buffer = field.buffer();
    let spans = buffer.chip_spans();
    for pair in spans.windows(2) {
        assert!(pair[0].end() <= pair[1].start(), "overlapping chip regions");
    }
    for idx in 0..buffer.len_chars() {
        if buffer.char_at(idx) == Some(CHIP_SEPARATOR) {
            let owners = spans.iter().filter(|span| span.contains(idx)).count();
            assert_eq!(owners, 1, "stray separator at {idx}");
        }
    }
    assert!(field.caret() <= field.len_chars());
}

fuzz_target!(|input: Input| {
    let mut field = if input.unique {
        ChipField::with_tokenizer(SpanChipTokenizer::new().unique_values())
    } else {
        ChipField::new()
    };
    field.add_terminator(',', TerminatorBehavior::ChipifyToTerminator);
    field.add_terminator(';', TerminatorBehavior::ChipifyCurrentToken);
    field.add_terminator('\n', TerminatorBehavior::ChipifyAll);
    if !input.paste_override {
        field.set_paste_behavior(PasteBehavior::UseDefault);
    }

    for action in input.actions.into_iter().take(MAX_ACTIONS) {
        let len = field.len_chars();
        match action {
            Action::Type(text) => {
                field.insert(&text);
            }
            Action::Paste(text) => {
                field.paste(&text);
            }
            Action::Replace { start, end, text } => {
                let (a, b) = (usize::from(start), usize::from(end));
                field.edit(a.min(b)..a.max(b), &text, EditKind::Typed);
            }
            Action::Backspace => {
                field.delete_backward();
            }
            Action::MoveCaret(pos) => {
                let _ = field.set_caret(usize::from(pos).min(len));
            }
            Action::Chipify { start, end } => {
                let (a, b) = (usize::from(start).min(len), usize::from(end).min(len));
                field.chipify(a.min(b)..a.max(b));
            }
            Action::ChipifyAll => field.chipify_all_unterminated_tokens(),
            Action::EditChip { index, move_to_end } => {
                let id = field
                    .buffer()
                    .chip_spans()
                    .get(usize::from(index))
                    .map(|span| span.id);
                if let Some(id) = id {
                    let _ = field.edit_chip(id, move_to_end);
                }
            }
            Action::Validate => {
                field.perform_validation();
            }
        }
        check_regions(&field);
    }
});
