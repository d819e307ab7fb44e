//! `chipfield` - chip/token text input engine
//!
//! Turns free-form text into "chips" (atomic, styled units such as email
//! recipients or tags) and back. The engine is host agnostic: it works on any
//! buffer implementing [`ChipText`], and [`ChipField`] wires the pieces into
//! the edit pipeline a text widget needs.
//!
//! # Examples
//!
//! ```
//! use chipfield::{ChipField, PasteBehavior, TerminatorBehavior};
//!
//! let mut field = ChipField::new();
//! field.add_terminator('\n', TerminatorBehavior::ChipifyAll);
//! field.add_terminator(',', TerminatorBehavior::ChipifyToTerminator);
//! field.set_paste_behavior(PasteBehavior::UseDefault);
//!
//! field.paste("ann@example.com, bo@example.com");
//! field.insert("\n");
//!
//! assert_eq!(field.chip_values(), vec!["ann@example.com", "bo@example.com"]);
//! assert!(field.token_values().is_empty());
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // ChipTokenizer in tokenizer etc
#![allow(clippy::missing_errors_doc)] // Error variants are self-describing
#![allow(clippy::missing_panics_doc)] // Non-test code does not panic
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Not every accessor needs the attribute
#![allow(clippy::return_self_not_must_use)] // Builder methods are obvious
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod chip;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod terminator;
pub mod text;
pub mod tokenizer;
pub mod validator;

// Re-export core types at crate root
pub use chip::{
    Chip, ChipAppearance, ChipCreator, ChipData, ChipId, ChipInfo, ChipState, DefaultChipCreator,
};
pub use color::Rgba;
pub use config::ChipConfiguration;
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};

// Re-export buffer types
pub use text::{ChipBuffer, ChipSpan, ChipText, Fragment, TextWindow};

// Re-export engine types
pub use field::{ChipField, EditKind, NotificationGuard};
pub use terminator::{
    ChipTerminatorHandler, DefaultChipTerminatorHandler, PasteBehavior, TerminatorBehavior,
};
pub use tokenizer::{
    AUTOCORRECT_SEPARATOR, CHIP_SEPARATOR, ChipTokenizer, SpanChipTokenizer, strip_separators,
};
pub use validator::{CharSet, ChipValidator, ChipifyingValidator, IllegalCharacters, remove_illegal};
