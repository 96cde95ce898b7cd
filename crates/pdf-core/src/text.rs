//! Text runs in content streams

use crate::document::Color;
use crate::fmt_num;
use crate::font::to_hex_string;

/// Font and paint state for one text run
pub struct TextRenderContext {
    /// Page font resource, e.g. "F1"
    pub font_name: String,
    pub font_size: f32,
    pub color: Color,
}

/// Build a `BT … ET` block showing `encoded` with its baseline at `(x, y)`
///
/// `encoded` holds bytes in the font's encoding. They are written as a hex
/// string, so parentheses and backslashes need no escaping.
pub fn generate_text_operators(encoded: &[u8], x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let lines = [
        "BT".to_string(),
        format!("{} rg", ctx.color.to_operands()),
        format!("/{} {} Tf", ctx.font_name, fmt_num(ctx.font_size as f64)),
        format!("{} {} Td", fmt_num(x), fmt_num(y)),
        format!("{} Tj", to_hex_string(encoded)),
        "ET".to_string(),
    ];

    let mut ops = lines.join("\n");
    ops.push('\n');
    ops.into_bytes()
}
