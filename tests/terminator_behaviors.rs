//! Terminator handling against a real tokenizer and buffer.
//!
//! Triggers used throughout: `\n` chipifies all, `;` the current token and a
//! space chipifies up to the terminator.

mod common;

use chipfield::{
    ChipBuffer, ChipTerminatorHandler, ChipText, ChipTokenizer, PasteBehavior, SpanChipTokenizer,
    TerminatorBehavior,
};
use common::{assert_regions_consistent, buffer_of, chip_texts, init_logging, render, standard_handler};

#[test]
fn test_chipify_all_on_newline() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text("token\n");

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 5, 6, false);

    assert_eq!(render(&buffer), "·|token|·");
    assert_eq!(caret, Some(buffer.len_chars()));
    assert!(tokenizer.find_all_tokens(&buffer).is_empty());
}

#[test]
fn test_chipify_current_token_on_semicolon() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text("token;");

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 5, 6, false);

    assert_eq!(chip_texts(&buffer), vec!["token"]);
    let region = &buffer.chip_spans()[0];
    assert_eq!(caret, Some(region.len()));
    assert_eq!(region.len(), 9);
}

#[test]
fn test_leading_terminator_is_deleted() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text(" token");

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, 1, false);

    assert_eq!(buffer.to_plain_string(), "token");
    assert_eq!(caret, None);
    assert_eq!(buffer.chip_count(), 0);
}

#[test]
fn test_paste_override_chipifies_to_each_terminator() {
    init_logging();
    let mut handler = standard_handler();
    handler.set_paste_behavior(TerminatorBehavior::ChipifyToTerminator.into());
    let mut tokenizer = SpanChipTokenizer::new();
    let pasted = "token1\ntoken2;token3 ";
    let mut buffer = ChipBuffer::with_text(pasted);
    let len = buffer.len_chars();

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, len, true);

    assert_eq!(caret, None);
    assert_eq!(chip_texts(&buffer), vec!["token1", "token2", "token3"]);
    assert!(tokenizer.find_all_tokens(&buffer).is_empty());
    assert_regions_consistent(&buffer);
}

#[test]
fn test_paste_without_override_stops_at_chipify_all() {
    init_logging();
    let mut handler = standard_handler();
    handler.set_paste_behavior(PasteBehavior::UseDefault);
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text("token1\ntoken2;token3");
    let len = buffer.len_chars();

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, len, true);

    // The newline rewrote the whole buffer, so the `;` was never handled.
    assert_eq!(chip_texts(&buffer), vec!["token1token2;token3"]);
    assert_eq!(caret, Some(buffer.len_chars()));
}

#[test]
fn test_typed_event_ignores_paste_override() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text("ab;");

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 2, 3, false);

    // `;` keeps its own behavior and reports a caret.
    assert_eq!(caret, Some(6));
    assert_eq!(chip_texts(&buffer), vec!["ab"]);
}

#[test]
fn test_mixed_triggers_in_one_scan() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = ChipBuffer::with_text("a b;");

    let caret = handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, 4, false);

    assert_eq!(chip_texts(&buffer), vec!["a", "b"]);
    assert_eq!(caret, Some(buffer.len_chars()));
    assert_regions_consistent(&buffer);
}

#[test]
fn test_terminator_after_existing_chip() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = buffer_of(&mut tokenizer, &["@first", "second "]);
    let len = buffer.len_chars();

    let caret =
        handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, len - 1, len, false);

    assert_eq!(caret, None);
    assert_eq!(chip_texts(&buffer), vec!["first", "second"]);
    assert_eq!(render(&buffer), "·|first|··|second|·");
}

#[test]
fn test_space_right_after_chip_is_swallowed() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new();
    let mut buffer = buffer_of(&mut tokenizer, &["@first", " "]);
    let len = buffer.len_chars();

    handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, len - 1, len, false);

    assert_eq!(render(&buffer), "·|first|·");
}

#[test]
fn test_find_all_tokens_lists_last_token_first() {
    let mut tokenizer = SpanChipTokenizer::new();
    let buffer = buffer_of(&mut tokenizer, &["a", "@X", "b", "@Y", "c"]);

    let tokens: Vec<String> = tokenizer
        .find_all_tokens(&buffer)
        .into_iter()
        .map(|range| buffer.slice(range))
        .collect();

    assert_eq!(tokens, vec!["c", "b", "a"]);
}

#[test]
fn test_boundaries() {
    let mut tokenizer = SpanChipTokenizer::new();
    let empty = ChipBuffer::new();
    assert_eq!(tokenizer.find_token_start(&empty, 0), 0);
    assert_eq!(tokenizer.find_token_end(&empty, 0), 0);

    let whole = buffer_of(&mut tokenizer, &["@whole"]);
    assert!(tokenizer.find_all_tokens(&whole).is_empty());
}

#[test]
fn test_unique_tokenizer_drops_repeated_paste() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new().unique_values();
    let mut buffer = ChipBuffer::with_text("dup dup other ");
    let len = buffer.len_chars();

    handler.find_and_handle_chip_terminators(&mut tokenizer, &mut buffer, 0, len, true);

    assert_eq!(chip_texts(&buffer), vec!["dup", "other"]);
    assert_regions_consistent(&buffer);
}

#[test]
fn test_unique_values_are_per_buffer() {
    init_logging();
    let handler = standard_handler();
    let mut tokenizer = SpanChipTokenizer::new().unique_values();

    let mut first = ChipBuffer::with_text("dup ");
    handler.find_and_handle_chip_terminators(&mut tokenizer, &mut first, 0, 4, true);
    let mut second = ChipBuffer::with_text("dup ");
    handler.find_and_handle_chip_terminators(&mut tokenizer, &mut second, 0, 4, true);

    assert_eq!(chip_texts(&first), vec!["dup"]);
    assert_eq!(chip_texts(&second), vec!["dup"]);
}
