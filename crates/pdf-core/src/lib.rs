//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Creating a single-page PDF document of a fixed size
//! - Using the standard Type1 font faces
//! - Inserting text at specific coordinates
//! - Drawing rectangles, ellipses and lines with fill, stroke and opacity
//!
//! All coordinates are in points with the origin at the bottom-left corner
//! of the page and Y increasing upward.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Color, PageSize, PdfDocument, ShapeStyle, StandardFont};
//!
//! let mut doc = PdfDocument::new(PageSize::A4)?;
//! doc.set_font(StandardFont::HelveticaBold, 18.0);
//! doc.set_text_color(Color::from_rgb(59, 130, 246));
//! doc.insert_text("Hello, World!", 50.0, 780.0);
//! doc.draw_rect(40.0, 700.0, 200.0, 40.0, &ShapeStyle::filled(Color::BLACK));
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod shape;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{encode_win_ansi, StandardFont};
pub use shape::{
    generate_ellipse_operators, generate_line_operators, generate_rect_operators, ShapeStyle,
    Stroke,
};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Largest magnitude written for a content-stream number
const MAX_REAL: f64 = 32_767.0;

/// Format a number for a content stream.
///
/// Values are clamped to +/-32767 and rounded to four decimal places.
/// Integral values are written without a fractional part so that `595.0`
/// becomes `595`. Non-finite values are written as `0`.
pub(crate) fn fmt_num(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let n = (n.clamp(-MAX_REAL, MAX_REAL) * 10_000.0).round() / 10_000.0;
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
