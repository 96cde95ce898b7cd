//! PDF Document builder

use crate::font::encode_win_ansi;
use crate::shape::{
    generate_ellipse_operators, generate_line_operators, generate_rect_operators, ShapeStyle,
    Stroke,
};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{fmt_num, PdfError, Result, StandardFont};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::io::Write;
use std::path::Path;

/// Device RGB color, each channel 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From 8-bit channels, e.g. the digits of `#3B82F6`
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let channel = |c: u8| f32::from(c) / 255.0;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Operands for the `rg`/`RG` color operators, e.g. `1 0 0`
    pub(crate) fn to_operands(self) -> String {
        format!(
            "{} {} {}",
            fmt_num(self.r as f64),
            fmt_num(self.g as f64),
            fmt_num(self.b as f64)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };

    /// US Letter portrait
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// US Legal portrait
    pub const LEGAL: PageSize = PageSize {
        width: 612.0,
        height: 1008.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Single-page PDF document builder
///
/// Drawing calls append operators to an in-memory content buffer in call
/// order, so later primitives paint over earlier ones. Fonts and graphics
/// states are registered as page resources the first time they are used.
/// The PDF object graph is only assembled by [`PdfDocument::to_bytes`].
pub struct PdfDocument {
    /// Media box of the single page
    page_size: PageSize,
    /// Font faces in first-use order (face -> resource name)
    font_resources: Vec<(StandardFont, String)>,
    /// Opacity graphics states in first-use order (alpha in 1/10000 -> resource name)
    graphics_states: Vec<(u32, String)>,
    /// Current font face
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current constant alpha for text
    current_opacity: f32,
    /// Buffered content operators for the page
    content_buffer: Vec<u8>,
    /// Flate-compress the content stream on save
    compress: bool,
    /// Value of the Producer entry in the document info dictionary
    producer: Option<String>,
}

impl PdfDocument {
    /// Create a document with one blank page
    ///
    /// # Arguments
    /// * `page_size` - Page dimensions in points
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::A4)?;
    /// ```
    pub fn new(page_size: PageSize) -> Result<Self> {
        if !page_size.is_valid() {
            return Err(PdfError::InvalidPageSize(page_size.width, page_size.height));
        }

        Ok(Self {
            page_size,
            font_resources: Vec::new(),
            graphics_states: Vec::new(),
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_opacity: 1.0,
            content_buffer: Vec::new(),
            compress: true,
            producer: None,
        })
    }

    /// Get the page dimensions
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Enable or disable Flate compression of the content stream
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Set the Producer entry of the document info dictionary
    pub fn set_producer(&mut self, producer: Option<String>) {
        self.producer = producer;
    }

    /// Set the current font face and size for subsequent text insertions
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font(StandardFont::Helvetica, 12.0);
    /// doc.insert_text("Regular", 50.0, 700.0);
    /// doc.set_font(StandardFont::Helvetica.bold(), 16.0);
    /// doc.insert_text("Bold", 50.0, 680.0);
    /// ```
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Get the current font face
    pub fn current_font(&self) -> StandardFont {
        self.current_font
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the constant alpha used for text (0.0 - 1.0)
    pub fn set_opacity(&mut self, opacity: f32) {
        self.current_opacity = opacity;
    }

    /// Insert a single line of text with its baseline starting at `(x, y)`
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `x` - X coordinate in points (from left)
    /// * `y` - Y coordinate in points (from bottom)
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64) {
        // Skip empty text - nothing to render
        if text.is_empty() {
            return;
        }

        let (bytes, replaced) = encode_win_ansi(text);
        if replaced > 0 {
            log::warn!(
                "{} character(s) in {:?} have no WinAnsi code and were replaced with '?'",
                replaced,
                text
            );
        }

        let font_resource_name = self.get_or_create_font_ref(self.current_font);
        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };

        let operators = generate_text_operators(&bytes, x, y, &ctx);
        self.buffer_painted(operators, self.current_opacity);
    }

    /// Draw a rectangle with its bottom-left corner at `(x, y)`
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &ShapeStyle) {
        let operators = generate_rect_operators(x, y, width, height, style);
        self.buffer_painted(operators, style.opacity);
    }

    /// Draw an ellipse centered at `(cx, cy)` with radii `rx` and `ry`
    pub fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, style: &ShapeStyle) {
        let operators = generate_ellipse_operators(cx, cy, rx, ry, style);
        self.buffer_painted(operators, style.opacity);
    }

    /// Draw a straight line from `(x1, y1)` to `(x2, y2)`
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke, opacity: f32) {
        let operators = generate_line_operators(x1, y1, x2, y2, stroke.width, stroke.color);
        self.buffer_painted(operators, opacity);
    }

    /// Get or create the page resource name for a font face
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams.
    /// Each face is registered once per document.
    pub fn get_or_create_font_ref(&mut self, font: StandardFont) -> String {
        if let Some((_, name)) = self.font_resources.iter().find(|(f, _)| *f == font) {
            return name.clone();
        }

        let resource_name = format!("F{}", self.font_resources.len() + 1);
        log::debug!(
            "registering font {} as /{}",
            font.postscript_name(),
            resource_name
        );
        self.font_resources.push((font, resource_name.clone()));
        resource_name
    }

    /// Get or create the ExtGState resource name for a constant alpha
    ///
    /// Returns `None` for fully opaque painting, which needs no graphics state.
    fn get_or_create_graphics_state(&mut self, opacity: f32) -> Option<String> {
        let alpha = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let key = (alpha * 10_000.0).round() as u32;
        if key >= 10_000 {
            return None;
        }

        if let Some((_, name)) = self.graphics_states.iter().find(|(k, _)| *k == key) {
            return Some(name.clone());
        }

        let resource_name = format!("GS{}", self.graphics_states.len() + 1);
        self.graphics_states.push((key, resource_name.clone()));
        Some(resource_name)
    }

    /// Buffer operators, isolating them in their own graphics state when translucent
    fn buffer_painted(&mut self, operators: Vec<u8>, opacity: f32) {
        if operators.is_empty() {
            return;
        }

        match self.get_or_create_graphics_state(opacity) {
            Some(gs_name) => {
                self.content_buffer
                    .extend_from_slice(format!("q\n/{gs_name} gs\n").as_bytes());
                self.content_buffer.extend_from_slice(&operators);
                self.content_buffer.extend_from_slice(b"Q\n");
            }
            None => self.content_buffer.extend_from_slice(&operators),
        }
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    ///
    /// No timestamps or random identifiers are written, so the same drawing
    /// calls always produce the same bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.build_document()?;

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Assemble the lopdf object graph for the page
    fn build_document(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        // Page resources
        let mut resources = Dictionary::new();
        if !self.font_resources.is_empty() {
            let mut font_dict = Dictionary::new();
            for (font, resource_name) in &self.font_resources {
                let font_id = doc.add_object(font.to_dictionary());
                font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
            }
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !self.graphics_states.is_empty() {
            let mut gs_dict = Dictionary::new();
            for (key, resource_name) in &self.graphics_states {
                let alpha = *key as f32 / 10_000.0;
                let gs_id = doc.add_object(dictionary! {
                    "Type" => "ExtGState",
                    "ca" => Object::Real(alpha.into()),
                    "CA" => Object::Real(alpha.into()),
                });
                gs_dict.set(resource_name.as_bytes(), Object::Reference(gs_id));
            }
            resources.set("ExtGState", Object::Dictionary(gs_dict));
        }

        let contents_id = doc.add_object(self.content_stream()?);

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            number_object(self.page_size.width),
            number_object(self.page_size.height),
        ];

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box,
            "Resources" => resources,
            "Contents" => contents_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(producer) = &self.producer {
            let info_id = doc.add_object(dictionary! {
                "Producer" => Object::string_literal(producer.as_str()),
            });
            doc.trailer.set("Info", info_id);
        }

        Ok(doc)
    }

    /// Build the page content stream from the buffered operators
    fn content_stream(&self) -> Result<Stream> {
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), self.content_buffer.clone()));
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.content_buffer)?;
        let compressed = encoder.finish()?;

        let mut stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        stream.allows_compression = false;
        Ok(stream)
    }

    /// Raw content operators buffered so far
    pub fn content(&self) -> &[u8] {
        &self.content_buffer
    }
}

/// Integral sizes are written as integers so the media box reads `595 842`
fn number_object(n: f64) -> Object {
    if n.fract() == 0.0 {
        Object::Integer(n as i64)
    } else {
        Object::Real((n as f32).into())
    }
}
