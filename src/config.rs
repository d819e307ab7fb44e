//! Visual configuration pushed to chips.
//!
//! Every field is optional: `None` means "leave the chip's current value
//! alone", so a host can push a partial configuration (for example only a new
//! `max_available_width` after a resize).

use crate::color::Rgba;

/// Partial chip appearance configuration.
///
/// # Examples
///
/// ```
/// use chipfield::{ChipConfiguration, Rgba};
///
/// let config = ChipConfiguration::new()
///     .with_background(Rgba::from_rgb(0xee, 0xee, 0xee))
///     .with_max_available_width(24);
/// assert_eq!(config.text_color, None);
/// assert_eq!(config.max_available_width, Some(24));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChipConfiguration {
    /// Total horizontal spacing around a chip, split evenly left and right.
    pub horizontal_spacing: Option<u32>,
    pub background: Option<Rgba>,
    pub corner_radius: Option<u32>,
    pub text_color: Option<Rgba>,
    pub text_size: Option<u32>,
    pub height: Option<u32>,
    pub vertical_spacing: Option<u32>,
    /// Widest a chip may render, in columns; longer chip text is ellipsized.
    pub max_available_width: Option<u32>,
}

impl ChipConfiguration {
    /// A configuration that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_horizontal_spacing(mut self, spacing: u32) -> Self {
        self.horizontal_spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: u32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Rgba) -> Self {
        self.text_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_text_size(mut self, size: u32) -> Self {
        self.text_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_vertical_spacing(mut self, spacing: u32) -> Self {
        self.vertical_spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_max_available_width(mut self, width: u32) -> Self {
        self.max_available_width = Some(width);
        self
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            horizontal_spacing: other.horizontal_spacing.or(self.horizontal_spacing),
            background: other.background.or(self.background),
            corner_radius: other.corner_radius.or(self.corner_radius),
            text_color: other.text_color.or(self.text_color),
            text_size: other.text_size.or(self.text_size),
            height: other.height.or(self.height),
            vertical_spacing: other.vertical_spacing.or(self.vertical_spacing),
            max_available_width: other.max_available_width.or(self.max_available_width),
        }
    }

    /// Whether every field is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
