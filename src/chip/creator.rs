//! Chip factory.

use super::{Chip, ChipData};
use crate::config::ChipConfiguration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '…';

/// Builds and styles chips for a tokenizer.
///
/// Hosts implement this to attach their own appearance rules; the tokenizer
/// only ever calls these three methods.
pub trait ChipCreator {
    /// Create a chip for `text` carrying `data`.
    fn create_chip(&self, text: &str, data: Option<ChipData>) -> Chip;

    /// Create a copy of an existing chip, keeping its text and data.
    fn copy_chip(&self, existing: &Chip) -> Chip;

    /// Apply a (partial) configuration to a chip just before it is inserted.
    fn configure_chip(&self, chip: &mut Chip, config: &ChipConfiguration);
}

/// Terminal-oriented chip factory.
///
/// Configuration fields are copied into the chip's appearance, then the chip
/// is measured in terminal columns: one column of inner padding on each
/// side, the text, and the horizontal margins. When a maximum width is known
/// and the chip would exceed it, the display text is ellipsized on a grapheme
/// boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultChipCreator;

impl DefaultChipCreator {
    /// Inner padding columns on each side of the chip text.
    pub const PADDING: u32 = 1;

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn measure(chip: &mut Chip) {
        let look = *chip.appearance();
        let chrome = look
            .left_margin
            .saturating_add(look.right_margin)
            .saturating_add(2 * Self::PADDING);
        let text_width = u32::try_from(chip.text().width()).unwrap_or(u32::MAX);
        let full = chrome.saturating_add(text_width);

        match look.max_available_width {
            Some(max) if full > max => {
                let room = max.saturating_sub(chrome) as usize;
                let shortened = ellipsize(chip.text(), room);
                let width =
                    chrome.saturating_add(u32::try_from(shortened.width()).unwrap_or(u32::MAX));
                chip.set_measurement(width.min(max), Some(shortened));
            }
            _ => chip.set_measurement(full, None),
        }
    }
}

impl ChipCreator for DefaultChipCreator {
    fn create_chip(&self, text: &str, data: Option<ChipData>) -> Chip {
        Chip::new(text, data)
    }

    fn copy_chip(&self, existing: &Chip) -> Chip {
        let mut chip = Chip::new(existing.text(), existing.data().cloned());
        *chip.appearance_mut() = *existing.appearance();
        chip.set_state(existing.state());
        chip
    }

    fn configure_chip(&self, chip: &mut Chip, config: &ChipConfiguration) {
        let look = chip.appearance_mut();
        if let Some(spacing) = config.horizontal_spacing {
            look.left_margin = spacing / 2;
            look.right_margin = spacing / 2;
        }
        if let Some(color) = config.background {
            look.background = color;
        }
        if let Some(radius) = config.corner_radius {
            look.corner_radius = radius;
        }
        if let Some(color) = config.text_color {
            look.text_color = color;
        }
        if let Some(size) = config.text_size {
            look.text_size = size;
        }
        if let Some(height) = config.height {
            look.height = height;
        }
        if let Some(spacing) = config.vertical_spacing {
            look.vertical_spacing = spacing;
        }
        if let Some(width) = config.max_available_width {
            look.max_available_width = Some(width);
        }
        Self::measure(chip);
    }
}

/// Shorten `text` to at most `max_width` columns, ending in an ellipsis.
///
/// Cuts only between grapheme clusters. Returns the text unchanged when it
/// already fits, and an empty string when not even the ellipsis fits.
#[must_use]
pub fn ellipsize(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use std::sync::Arc;

    #[test]
    fn test_create_keeps_text_and_data() {
        let creator = DefaultChipCreator::new();
        let chip = creator.create_chip("carol", Some(Arc::new(String::from("id-7"))));
        assert_eq!(chip.text(), "carol");
        assert_eq!(chip.data_as::<String>().map(String::as_str), Some("id-7"));
    }

    #[test]
    fn test_configure_applies_only_set_fields() {
        let creator = DefaultChipCreator::new();
        let mut chip = creator.create_chip("dave", None);
        let before = *chip.appearance();

        let config = ChipConfiguration::new()
            .with_text_color(Rgba::WHITE)
            .with_horizontal_spacing(4);
        creator.configure_chip(&mut chip, &config);

        assert_eq!(chip.appearance().text_color, Rgba::WHITE);
        assert_eq!(chip.appearance().left_margin, 2);
        assert_eq!(chip.appearance().right_margin, 2);
        assert_eq!(chip.appearance().background, before.background);
        // 2 + 2 margins, 1 + 1 padding, 4 text columns.
        assert_eq!(chip.width(), Some(10));
    }

    #[test]
    fn test_configure_ellipsizes_wide_chip() {
        let creator = DefaultChipCreator::new();
        let mut chip = creator.create_chip("a very long recipient name", None);
        creator.configure_chip(
            &mut chip,
            &ChipConfiguration::new().with_max_available_width(10),
        );
        assert_eq!(chip.width(), Some(10));
        assert_eq!(chip.display_text(), "a very …");
        assert_eq!(chip.text(), "a very long recipient name");
    }

    #[test]
    fn test_configure_huge_spacing_saturates() {
        let creator = DefaultChipCreator::new();
        let mut chip = creator.create_chip("frank", None);
        creator.configure_chip(
            &mut chip,
            &ChipConfiguration::new().with_horizontal_spacing(u32::MAX),
        );
        assert_eq!(chip.width(), Some(u32::MAX));

        creator.configure_chip(
            &mut chip,
            &ChipConfiguration::new().with_max_available_width(20),
        );
        assert_eq!(chip.width(), Some(20));
        assert_eq!(chip.display_text(), "");
    }

    #[test]
    fn test_copy_preserves_appearance() {
        let creator = DefaultChipCreator::new();
        let mut chip = creator.create_chip("erin", None);
        creator.configure_chip(&mut chip, &ChipConfiguration::new().with_height(3));
        let copy = creator.copy_chip(&chip);
        assert_eq!(copy.appearance().height, 3);
        assert_eq!(copy.width(), None);
    }

    #[test]
    fn test_ellipsize_respects_graphemes() {
        assert_eq!(ellipsize("hello", 10), "hello");
        assert_eq!(ellipsize("hello", 3), "he…");
        assert_eq!(ellipsize("hello", 0), "");
        // Wide CJK characters take two columns each.
        assert_eq!(ellipsize("中文字", 4), "中…");
    }
}
