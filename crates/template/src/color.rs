//! Element color strings

use pdf_core::Color;

/// How an element color string paints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// `transparent`: nothing is painted
    None,
    Solid(Color),
}

impl Paint {
    pub fn color(self) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(color) => Some(color),
        }
    }
}

/// Parse an element color
///
/// Accepts `#RRGGBB`, `#RGB` and the same forms without `#`, in any case,
/// plus the literal `transparent`. Anything else falls back to black.
pub fn parse_color(value: &str) -> Paint {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Paint::None;
    }

    match parse_hex(value) {
        Some(color) => Paint::Solid(color),
        None => {
            log::warn!("unrecognized color {value:?}, using black");
            Paint::Solid(Color::BLACK)
        }
    }
}

fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #RGB expands each digit: #F0A == #FF00AA
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|d| d * 17);
            Some(Color::from_rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
