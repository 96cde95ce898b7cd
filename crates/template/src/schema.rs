//! Template JSON schema types

use serde::{Deserialize, Deserializer, Serialize};

/// Default font size for text elements
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Default stroke width for element borders
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

/// Default thickness for line elements
pub const DEFAULT_LINE_THICKNESS: f64 = 2.0;

/// Root template structure
///
/// Only `elements` affects rendering. The remaining fields are authoring
/// metadata carried along so a template survives a load/save round-trip.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Storage id assigned by the authoring tool (string or number)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    /// Unique template name (storage key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Page size label ("A4", "Letter", "Legal"); informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Creation time as stored by the authoring tool (string or epoch millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<serde_json::Value>,

    /// Elements in paint order; later elements are drawn over earlier ones
    pub elements: Vec<Element>,
}

impl Template {
    /// Create an empty template with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Append an element (drawn above every element added before it)
    pub fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }
}

/// Element identifier, unique within its template
///
/// Authoring tools have stored both string ids and numeric (timestamp) ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ElementId {
    Text(String),
    Number(serde_json::Number),
}

/// One visual primitive, discriminated by its `type` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Rectangle(ShapeElement),
    Circle(ShapeElement),
    Line(ShapeElement),
    /// Declared by the authoring tool; never drawn
    Image(ImageElement),
    /// Any other `type` value
    #[serde(other)]
    Unknown,
}

impl Element {
    /// Attributes shared by every known element kind
    pub fn base(&self) -> Option<&ElementBase> {
        match self {
            Element::Text(e) => Some(&e.base),
            Element::Rectangle(e) | Element::Circle(e) | Element::Line(e) => Some(&e.base),
            Element::Image(e) => Some(&e.base),
            Element::Unknown => None,
        }
    }

    /// The `type` tag of this element
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Rectangle(_) => "rectangle",
            Element::Circle(_) => "circle",
            Element::Line(_) => "line",
            Element::Image(_) => "image",
            Element::Unknown => "unknown",
        }
    }
}

/// Geometry and style attributes common to all elements
///
/// Coordinates are PDF points with the origin at the bottom-left corner of
/// the page and Y increasing upward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,

    /// `#RRGGBB`, `#RGB` or `transparent`
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: String,

    /// 0.0 - 1.0, fully opaque when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,

    /// Degrees; stored but not applied when rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ElementBase {
    /// Create base attributes at a position with a size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
            color: default_color(),
            opacity: None,
            border_color: None,
            border_width: None,
            rotation: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_border(mut self, color: impl Into<String>, width: f64) -> Self {
        self.border_color = Some(color.into());
        self.border_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Opacity clamped to 0.0 - 1.0
    pub fn effective_opacity(&self) -> f32 {
        match self.opacity {
            Some(o) if o.is_nan() => 1.0,
            Some(o) => o.clamp(0.0, 1.0) as f32,
            None => 1.0,
        }
    }
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

// An explicit `null` reads the same as an absent field

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn color_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_color))
}

fn font_size_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_FONT_SIZE))
}

/// Single-line text run with `{{field}}` placeholders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default = "default_font_size", deserialize_with = "font_size_or_default")]
    pub font_size: f64,

    /// `normal` or `bold`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    /// Font face name, e.g. `Helvetica` or `TimesRoman`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl TextElement {
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            base: ElementBase::new(x, y, 0.0, 0.0),
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: None,
            font: None,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight
            .as_deref()
            .is_some_and(|w| w.trim().eq_ignore_ascii_case("bold"))
    }

    /// Font size to draw with; zero or invalid sizes use the default
    pub fn effective_font_size(&self) -> f64 {
        if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            DEFAULT_FONT_SIZE
        }
    }
}

/// Geometry-only element: rectangle, circle or line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapeElement {
    #[serde(flatten)]
    pub base: ElementBase,
}

impl ShapeElement {
    pub fn new(base: ElementBase) -> Self {
        Self { base }
    }
}

/// Image placeholder kept for round-trip fidelity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageElement {
    #[serde(flatten)]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}
