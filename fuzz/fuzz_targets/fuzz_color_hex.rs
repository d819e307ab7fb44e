//! Fuzz target for chip color parsing.
//!
//! Hosts pass chip background and text colors as hex strings; parsing must
//! reject malformed input without panicking.

#![no_main]

use chipfield::{ChipConfiguration, Rgba};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let parsed = Rgba::from_hex(data);

    if !data.starts_with('#') {
        let _ = Rgba::from_hex(&format!("#{data}"));
    }

    // Anything that parses must be usable as a chip color.
    if let Some(color) = parsed {
        let config = ChipConfiguration::new()
            .with_background(color)
            .with_text_color(color);
        let _ = config.merge(ChipConfiguration::new());
    }

    for (i, _) in data.char_indices().take(10) {
        let _ = Rgba::from_hex(&data[i..]);
        let _ = Rgba::from_hex(&data[..i]);
    }
});
