//! Template rendering

use crate::color::parse_color;
use crate::parser::resolve_placeholders;
use crate::schema::*;
use crate::{Result, TemplateError};
use pdf_core::{PageSize, PdfDocument, ShapeStyle, StandardFont, Stroke};
use serde::{Deserialize, Serialize};

/// Output options for a render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Flate-compress the page content stream
    pub compress: bool,
    /// Producer written to the document info dictionary
    pub producer: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compress: true,
            producer: Some("pdfdraw".to_string()),
        }
    }
}

impl RenderOptions {
    /// Load options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TemplateError::InvalidOptions(e.to_string()))
    }
}

/// Template renderer
///
/// Every render creates a fresh A4 page and draws the template elements in
/// list order, so the renderer holds no state between calls.
pub struct TemplateRenderer<'a> {
    /// The template to render
    template: &'a Template,
    options: RenderOptions,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a new renderer for a template
    pub fn new(template: &'a Template) -> Self {
        Self {
            template,
            options: RenderOptions::default(),
        }
    }

    /// Set output options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the template with data into PDF bytes
    ///
    /// # Arguments
    /// * `data` - Record used to fill `{{field}}` placeholders
    pub fn render(&self, data: &serde_json::Value) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(PageSize::A4)?;
        doc.set_compression(self.options.compress);
        doc.set_producer(self.options.producer.clone());

        self.render_into(&mut doc, data);

        Ok(doc.to_bytes()?)
    }

    /// Draw every element onto an existing document
    pub fn render_into(&self, doc: &mut PdfDocument, data: &serde_json::Value) {
        for (index, element) in self.template.elements.iter().enumerate() {
            log::debug!("rendering element {} ({})", index, element.kind());
            self.render_element(doc, element, data);
        }
    }

    /// Render a single element
    fn render_element(&self, doc: &mut PdfDocument, element: &Element, data: &serde_json::Value) {
        match element {
            Element::Text(text) => self.render_text(doc, text, data),
            Element::Rectangle(shape) => self.render_rectangle(doc, shape),
            Element::Circle(shape) => self.render_circle(doc, shape),
            Element::Line(shape) => self.render_line(doc, shape),
            Element::Image(_) => {
                log::debug!("image elements are not drawn");
            }
            Element::Unknown => {
                log::warn!("skipping element with unknown type");
            }
        }
    }

    /// Render a text element at its baseline position
    fn render_text(&self, doc: &mut PdfDocument, text: &TextElement, data: &serde_json::Value) {
        let Some(color) = parse_color(&text.base.color).color() else {
            log::debug!("text element is transparent");
            return;
        };

        let content = resolve_placeholders(&text.content, data);

        doc.set_font(select_font(text), text.effective_font_size() as f32);
        doc.set_text_color(color);
        doc.set_opacity(text.base.effective_opacity());
        doc.insert_text(&content, text.base.x, text.base.y);
    }

    /// Render a rectangle with its bottom-left corner at (x, y)
    fn render_rectangle(&self, doc: &mut PdfDocument, shape: &ShapeElement) {
        let base = &shape.base;
        doc.draw_rect(base.x, base.y, base.width, base.height, &shape_style(base));
    }

    /// Render an ellipse inscribed in the element bounding box
    fn render_circle(&self, doc: &mut PdfDocument, shape: &ShapeElement) {
        let base = &shape.base;
        let rx = base.width / 2.0;
        let ry = base.height / 2.0;
        doc.draw_ellipse(
            base.x + rx,
            base.y + ry,
            rx.abs(),
            ry.abs(),
            &shape_style(base),
        );
    }

    /// Render a horizontal line `width` long; `height` is the thickness
    fn render_line(&self, doc: &mut PdfDocument, shape: &ShapeElement) {
        let base = &shape.base;
        let Some(color) = parse_color(&base.color).color() else {
            log::debug!("line element is transparent");
            return;
        };

        let thickness = if base.height.is_finite() && base.height != 0.0 {
            base.height
        } else {
            DEFAULT_LINE_THICKNESS
        };

        doc.draw_line(
            base.x,
            base.y,
            base.x + base.width,
            base.y,
            Stroke {
                color,
                width: thickness,
            },
            base.effective_opacity(),
        );
    }
}

/// Pick the standard face for a text element
///
/// Unknown font names fall back to Helvetica. Bold weight selects the bold
/// sibling of whichever face was chosen.
fn select_font(text: &TextElement) -> StandardFont {
    let face = match text.font.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(name) => StandardFont::from_name(name).unwrap_or_else(|| {
            log::warn!("unknown font {name:?}, using Helvetica");
            StandardFont::Helvetica
        }),
        None => StandardFont::Helvetica,
    };

    if text.is_bold() {
        face.bold()
    } else {
        face
    }
}

/// Fill from `color`, stroke from `borderColor`/`borderWidth`
fn shape_style(base: &ElementBase) -> ShapeStyle {
    let stroke = base
        .border_color
        .as_deref()
        .and_then(|border| parse_color(border).color())
        .map(|color| Stroke {
            color,
            width: base.border_width.unwrap_or(DEFAULT_BORDER_WIDTH),
        });

    ShapeStyle {
        fill: parse_color(&base.color).color(),
        stroke,
        opacity: base.effective_opacity(),
    }
}

impl Template {
    /// Render this template with data into PDF bytes
    pub fn render(&self, data: &serde_json::Value) -> Result<Vec<u8>> {
        TemplateRenderer::new(self).render(data)
    }
}
