//! Chip entities.
//!
//! A [`Chip`] is the finalized form of a token: its text, optional opaque
//! host data, a measured width and a set of interaction flags. Chips are built
//! by a [`ChipCreator`] and live inside exactly one chip region of a
//! [`ChipText`](crate::text::ChipText) buffer, addressed by a [`ChipId`].

mod creator;

pub use creator::{ChipCreator, DefaultChipCreator, ellipsize};

use crate::color::Rgba;
use bitflags::bitflags;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque host data attached to a chip (for example the contact behind a
/// recipient chip). Shared, never inspected by the tokenizer.
pub type ChipData = Arc<dyn Any + Send + Sync>;

/// Identity of a chip region inside one buffer.
///
/// Ids are handed out by the buffer when a chip fragment is inserted and are
/// never reused by that buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChipId(u64);

impl ChipId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Interaction state of a chip, as reported to the renderer.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ChipState: u8 {
        const PRESSED  = 0x01;
        const SELECTED = 0x02;
        const FOCUSED  = 0x04;
        const DISABLED = 0x08;
    }
}

/// Concrete visual attributes of a chip.
///
/// Filled in from a [`ChipConfiguration`](crate::ChipConfiguration) by
/// [`ChipCreator::configure_chip`]; unset configuration fields keep these
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChipAppearance {
    pub left_margin: u32,
    pub right_margin: u32,
    pub background: Rgba,
    pub corner_radius: u32,
    pub text_color: Rgba,
    pub text_size: u32,
    pub height: u32,
    pub vertical_spacing: u32,
    pub max_available_width: Option<u32>,
}

impl Default for ChipAppearance {
    fn default() -> Self {
        Self {
            left_margin: 0,
            right_margin: 0,
            background: Rgba::from_rgb(0xE0, 0xE0, 0xE0),
            corner_radius: 1,
            text_color: Rgba::BLACK,
            text_size: 1,
            height: 1,
            vertical_spacing: 0,
            max_available_width: None,
        }
    }
}

/// A finalized piece of input.
#[derive(Clone, Debug)]
pub struct Chip {
    text: String,
    data: Option<ChipData>,
    display_text: Option<String>,
    width: Option<u32>,
    state: ChipState,
    appearance: ChipAppearance,
}

impl Chip {
    /// Create an unmeasured chip with default appearance.
    #[must_use]
    pub fn new(text: impl Into<String>, data: Option<ChipData>) -> Self {
        Self {
            text: text.into(),
            data,
            display_text: None,
            width: None,
            state: ChipState::empty(),
            appearance: ChipAppearance::default(),
        }
    }

    /// The text this chip represents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The host data attached to this chip.
    #[must_use]
    pub fn data(&self) -> Option<&ChipData> {
        self.data.as_ref()
    }

    /// Downcast the host data.
    #[must_use]
    pub fn data_as<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Text to draw: the chip text, ellipsized if it was measured too wide.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.display_text.as_deref().unwrap_or(&self.text)
    }

    /// Rendered width in columns, or `None` while unmeasured.
    #[must_use]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub(crate) fn set_measurement(&mut self, width: u32, display_text: Option<String>) {
        self.width = Some(width);
        self.display_text = display_text;
    }

    #[must_use]
    pub fn state(&self) -> ChipState {
        self.state
    }

    pub fn set_state(&mut self, state: ChipState) {
        self.state = state;
    }

    #[must_use]
    pub fn appearance(&self) -> &ChipAppearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut ChipAppearance {
        &mut self.appearance
    }
}

/// Text and data for a chip the host wants to insert directly.
#[derive(Clone, Debug)]
pub struct ChipInfo {
    pub text: String,
    pub data: Option<ChipData>,
}

impl ChipInfo {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: ChipData) -> Self {
        self.data = Some(data);
        self
    }
}
