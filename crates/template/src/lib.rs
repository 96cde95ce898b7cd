//! Template Engine - JSON template parsing and rendering
//!
//! This crate provides:
//! - Template JSON schema types (text, rectangle, circle, line elements)
//! - Template parsing from JSON
//! - `{{field}}` placeholder resolution against a data record
//! - Rendering a template onto a single A4 page
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_template, TemplateRenderer};
//!
//! let template = parse_template(template_json)?;
//! let data: serde_json::Value = serde_json::from_str(data_json)?;
//! let pdf_bytes = TemplateRenderer::new(&template).render(&data)?;
//! ```

mod color;
pub mod parser;
mod renderer;
mod schema;

pub use color::{parse_color, Paint};
pub use parser::{parse_template, resolve_placeholders};
pub use renderer::{RenderOptions, TemplateRenderer};
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template is not an object or has no element list
    #[error("Malformed template: {0}")]
    TemplateMalformed(String),

    #[error("Invalid data record: {0}")]
    InvalidData(String),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] pdf_core::PdfError),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Render a template with data using default options
pub fn render_template(template: &Template, data: &serde_json::Value) -> Result<Vec<u8>> {
    TemplateRenderer::new(template).render(data)
}

/// Parse a template and a data record from JSON and render them
pub fn render_json(template_json: &str, data_json: &str) -> Result<Vec<u8>> {
    let template = parse_template(template_json)?;
    let data: serde_json::Value =
        serde_json::from_str(data_json).map_err(|e| TemplateError::InvalidData(e.to_string()))?;
    render_template(&template, &data)
}
