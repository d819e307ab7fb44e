//! Text storage holding a mix of chip regions and plain tokens.
//!
//! Key types:
//!
//! - [`ChipText`]: the buffer contract the tokenizer works against
//! - [`ChipBuffer`]: rope-backed implementation with ordered chip regions
//! - [`ChipSpan`]: one chip region (id, char range, chip)
//! - [`Fragment`]: text about to be inserted, optionally tagged as a chip
//! - [`TextWindow`]: a forward cursor that survives edits made while scanning
//!
//! # Examples
//!
//! ```
//! use chipfield::{Chip, ChipBuffer, ChipText, Fragment};
//!
//! let mut buffer = ChipBuffer::with_text("hello");
//! let id = buffer
//!     .append(&Fragment::chip(" [x] ", Chip::new("x", None)))
//!     .unwrap();
//!
//! // Typing before a chip shifts its region.
//! buffer.insert(0, &Fragment::plain(">> "));
//! assert_eq!(buffer.chip_span(id).unwrap().range, 8..13);
//! ```

mod buffer;
mod span;
mod window;

pub use buffer::{ChipBuffer, ChipText, clamp_position, clamp_range, validate_range};
pub use span::{ChipSpan, Fragment};
pub use window::TextWindow;
