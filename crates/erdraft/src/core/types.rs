//! Core type definitions for diagram drawing
//!
//! This module contains the toolkit-independent drawing vocabulary shared by
//! the renderer and the presentation backends: geometry, colors, strokes and
//! the [`DrawPrimitive`] instruction set.

use std::fmt;
use std::str::FromStr;

/// Character set for terminal preview output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CharacterSet {
    /// Pure ASCII characters only: + - | . o { }
    Ascii,
    /// Unicode box-drawing characters: ┌ ┐ └ ┘ ─ │ ╌
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl FromStr for CharacterSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(CharacterSet::Ascii),
            "unicode" => Ok(CharacterSet::Unicode),
            other => Err(format!(
                "Unknown style: {other}. Use 'ascii' or 'unicode'"
            )),
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// A point on the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }

    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    /// True if the two rectangles share any interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Outline or line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    pub color: Color,
    pub width: u32,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: u32) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Text role, mapped to a font size and weight by presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextStyle {
    /// Entity name in the header band
    Title,
    /// One field row
    Field,
    /// Relation label
    Label,
}

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAnchor {
    Start,
    Middle,
}

/// What part of an entity box a rectangle paints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RectRole {
    Body,
    Header,
    Border,
}

/// Cardinality glyph drawn at one end of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EndpointGlyph {
    #[default]
    None,
    /// Single perpendicular bar: exactly one
    Bar,
    /// Three-pronged fork: many
    CrowFoot,
    /// Hollow circle
    Circle,
    /// Circle followed by a bar: zero or one
    CircleBar,
}

/// Toolkit-independent drawing instruction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum DrawPrimitive {
    Rect {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        role: RectRole,
    },
    Text {
        position: Point,
        content: String,
        style: TextStyle,
        anchor: TextAnchor,
    },
    /// Polyline; `start` sits at `points[0]`, `end` at the last point
    Path {
        points: Vec<Point>,
        stroke: Stroke,
        start: EndpointGlyph,
        end: EndpointGlyph,
    },
}

impl DrawPrimitive {
    /// Bounding box of the primitive (text runs report their anchor point)
    pub fn bounds(&self) -> Rect {
        match self {
            DrawPrimitive::Rect { bounds, .. } => *bounds,
            DrawPrimitive::Text { position, .. } => Rect::new(position.x, position.y, 0, 0),
            DrawPrimitive::Path { points, .. } => {
                let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
                let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
                let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
                let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
                Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_set_default() {
        assert_eq!(CharacterSet::default(), CharacterSet::Unicode);
        assert!(CharacterSet::Ascii.is_ascii());
        assert!(!CharacterSet::Unicode.is_ascii());
    }

    #[test]
    fn test_character_set_display() {
        assert_eq!(CharacterSet::Ascii.to_string(), "ascii");
        assert_eq!(CharacterSet::Unicode.to_string(), "unicode");
    }

    #[test]
    fn test_character_set_from_str() {
        assert_eq!("ascii".parse::<CharacterSet>(), Ok(CharacterSet::Ascii));
        assert_eq!("Unicode".parse::<CharacterSet>(), Ok(CharacterSet::Unicode));
        assert!("compact".parse::<CharacterSet>().unwrap_err().contains("compact"));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 200, 70);
        assert_eq!(rect.right(), 210);
        assert_eq!(rect.bottom(), 90);
        assert_eq!(rect.center_y(), 55);
        assert_eq!(rect.center_x(), 110);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 100, 50);
        let touching = Rect::new(100, 0, 100, 50);
        let overlapping = Rect::new(99, 49, 10, 10);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0xe0, 0x0f, 0x33).to_string(), "#e00f33");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_path_bounds() {
        let path = DrawPrimitive::Path {
            points: vec![Point::new(210, 55), Point::new(260, 55), Point::new(300, 80)],
            stroke: Stroke::solid(Color::BLACK, 1),
            start: EndpointGlyph::Bar,
            end: EndpointGlyph::CrowFoot,
        };
        assert_eq!(path.bounds(), Rect::new(210, 55, 90, 25));
    }
}
