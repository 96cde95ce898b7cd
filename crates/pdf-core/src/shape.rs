//! Path primitives: rectangles, ellipses and lines

use crate::document::Color;
use crate::fmt_num;

/// Bézier control point distance for a quarter ellipse, 4/3 * (sqrt(2) - 1)
const KAPPA: f64 = 0.552_284_8;

/// Outline of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in points
    pub width: f64,
}

/// Paint applied to a closed shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Fill color, `None` leaves the interior unpainted
    pub fill: Option<Color>,
    /// Outline, `None` draws no border
    pub stroke: Option<Stroke>,
    /// Constant alpha (0.0 - 1.0) for both fill and stroke
    pub opacity: f32,
}

impl ShapeStyle {
    /// Solid fill, no outline
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Outline only
    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke { color, width }),
            opacity: 1.0,
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// True when the style paints nothing at all
    pub fn is_invisible(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none()
    }

    /// Painting operator for the current path
    fn paint_operator(&self) -> Option<&'static str> {
        match (self.fill.is_some(), self.stroke.is_some()) {
            (true, true) => Some("B"),
            (true, false) => Some("f"),
            (false, true) => Some("S"),
            (false, false) => None,
        }
    }

    /// Color and line width operators preceding the path
    fn state_operators(&self) -> String {
        let mut ops = String::new();
        if let Some(fill) = self.fill {
            ops.push_str(&format!("{} rg\n", fill.to_operands()));
        }
        if let Some(stroke) = self.stroke {
            ops.push_str(&format!("{} RG\n", stroke.color.to_operands()));
            ops.push_str(&format!("{} w\n", fmt_num(stroke.width.max(0.0))));
        }
        ops
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::filled(Color::BLACK)
    }
}

/// Generate PDF operators for a rectangle
///
/// `(x, y)` is the bottom-left corner. Returns no operators when the style
/// has neither fill nor stroke.
pub fn generate_rect_operators(x: f64, y: f64, width: f64, height: f64, style: &ShapeStyle) -> Vec<u8> {
    let Some(paint) = style.paint_operator() else {
        return Vec::new();
    };

    let mut ops = style.state_operators();
    ops.push_str(&format!(
        "{} {} {} {} re\n",
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    ));
    ops.push_str(paint);
    ops.push('\n');

    ops.into_bytes()
}

/// Generate PDF operators for an ellipse centered at `(cx, cy)`
///
/// The outline is approximated with four cubic Bézier curves. Returns no
/// operators when the style has neither fill nor stroke.
pub fn generate_ellipse_operators(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    style: &ShapeStyle,
) -> Vec<u8> {
    let Some(paint) = style.paint_operator() else {
        return Vec::new();
    };

    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let mut ops = style.state_operators();
    ops.push_str(&format!("{} {} m\n", fmt_num(cx + rx), fmt_num(cy)));
    let curves = [
        (cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry),
        (cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy),
        (cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry),
        (cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy),
    ];
    for (x1, y1, x2, y2, x3, y3) in curves {
        ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            fmt_num(x3),
            fmt_num(y3)
        ));
    }
    ops.push_str("h\n");
    ops.push_str(paint);
    ops.push('\n');

    ops.into_bytes()
}

/// Generate PDF operators for a straight line segment
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    thickness: f64,
    color: Color,
) -> Vec<u8> {
    let mut ops = String::new();
    ops.push_str(&format!("{} RG\n", color.to_operands()));
    ops.push_str(&format!("{} w\n", fmt_num(thickness.max(0.0))));
    ops.push_str(&format!("{} {} m\n", fmt_num(x1), fmt_num(y1)));
    ops.push_str(&format!("{} {} l\n", fmt_num(x2), fmt_num(y2)));
    ops.push_str("S\n");

    ops.into_bytes()
}
