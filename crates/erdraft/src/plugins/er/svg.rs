//! SVG backend
//!
//! Paints draw primitives into a standalone SVG document. Primitives are
//! written in the order given, so later ones sit on top.

use std::fmt::Write;

use anyhow::Result;

use crate::core::{
    display_width, DrawPrimitive, EndpointGlyph, Point, Rect, RectRole, Stroke, TextAnchor,
    TextStyle,
};

/// Distance from the box edge to a bar mark
const BAR_OFFSET: i64 = 8;
/// Distance from the box edge to a circle center
const CIRCLE_OFFSET: i64 = 16;
const CIRCLE_RADIUS: i64 = 4;
/// Distance from the box edge to the crow foot apex
const CROW_LENGTH: i64 = 12;
/// Half the span of a bar or crow foot across the line
const MARK_HALF_SPAN: i64 = 6;

/// Standalone SVG document writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgBackend {
    pub font_family: String,
    pub title_size: u32,
    pub field_size: u32,
    pub label_size: u32,
    /// Approximate advance of one text column, used to size the document
    pub char_width: u32,
    pub margin: u32,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            title_size: 14,
            field_size: 12,
            label_size: 11,
            char_width: 8,
            margin: 10,
        }
    }
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Render a complete `<svg>` document
    pub fn render(&self, primitives: &[DrawPrimitive]) -> Result<String> {
        let (width, height) = self.extent(primitives);
        let mut svg = String::new();

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            svg,
            r#"<style>
  text {{ font-family: {}; fill: #333; }}
  .title {{ font-size: {}px; font-weight: bold; }}
  .field {{ font-size: {}px; }}
  .label {{ font-size: {}px; fill: #666; }}
</style>"#,
            self.font_family, self.title_size, self.field_size, self.label_size
        )?;

        for primitive in primitives {
            match primitive {
                DrawPrimitive::Rect {
                    bounds,
                    fill,
                    stroke,
                    role,
                } => {
                    let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_string());
                    write!(
                        svg,
                        r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                        role_class(*role),
                        bounds.x,
                        bounds.y,
                        bounds.width,
                        bounds.height,
                        fill
                    )?;
                    match stroke {
                        Some(stroke) => write_stroke(&mut svg, stroke)?,
                        None => write!(svg, r#" stroke="none""#)?,
                    }
                    writeln!(svg, " />")?;
                }
                DrawPrimitive::Text {
                    position,
                    content,
                    style,
                    anchor,
                } => {
                    writeln!(
                        svg,
                        r#"<text class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                        style_class(*style),
                        position.x,
                        position.y,
                        anchor_name(*anchor),
                        escape_xml(content)
                    )?;
                }
                DrawPrimitive::Path {
                    points,
                    stroke,
                    start,
                    end,
                } => {
                    let coords: Vec<String> =
                        points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                    write!(
                        svg,
                        r#"<polyline class="relation" points="{}" fill="none""#,
                        coords.join(" ")
                    )?;
                    write_stroke(&mut svg, stroke)?;
                    writeln!(svg, " />")?;

                    if let [first, second, ..] = points.as_slice() {
                        write_glyph(&mut svg, *first, *second, *start, stroke)?;
                    }
                    if let [.., before_last, last] = points.as_slice() {
                        write_glyph(&mut svg, *last, *before_last, *end, stroke)?;
                    }
                }
            }
        }

        writeln!(svg, "</svg>")?;
        Ok(svg)
    }

    /// Document size covering every primitive plus the margin
    fn extent(&self, primitives: &[DrawPrimitive]) -> (u32, u32) {
        let mut width = 0;
        let mut height = 0;
        for primitive in primitives {
            let (right, bottom) = match primitive {
                DrawPrimitive::Text {
                    position,
                    content,
                    anchor,
                    ..
                } => {
                    let advance = display_width(content) as u32 * self.char_width;
                    let right = match anchor {
                        TextAnchor::Start => position.x + advance,
                        TextAnchor::Middle => position.x + advance / 2,
                    };
                    (right, position.y + self.title_size)
                }
                other => {
                    let bounds: Rect = other.bounds();
                    (bounds.right(), bounds.bottom())
                }
            };
            width = width.max(right);
            height = height.max(bottom);
        }
        if width == 0 && height == 0 {
            return (0, 0);
        }
        (width + self.margin, height + self.margin)
    }
}

fn write_stroke(svg: &mut String, stroke: &Stroke) -> std::fmt::Result {
    write!(
        svg,
        r#" stroke="{}" stroke-width="{}""#,
        stroke.color, stroke.width
    )?;
    if stroke.dashed {
        write!(svg, r#" stroke-dasharray="5 4""#)?;
    }
    Ok(())
}

/// Draw the cardinality mark where the path meets an entity at `tip`.
/// `toward` is the neighbouring point on the path.
fn write_glyph(
    svg: &mut String,
    tip: Point,
    toward: Point,
    glyph: EndpointGlyph,
    stroke: &Stroke,
) -> std::fmt::Result {
    let (tx, ty) = (i64::from(tip.x), i64::from(tip.y));
    // Unit vector pointing from the path into the entity, and its normal
    let (ux, uy) = ((tx - i64::from(toward.x)).signum(), (ty - i64::from(toward.y)).signum());
    if ux == 0 && uy == 0 {
        return Ok(());
    }
    let (nx, ny) = (-uy, ux);
    let back = |d: i64| (tx - ux * d, ty - uy * d);
    let across = |(x, y): (i64, i64), d: i64| (x + nx * d, y + ny * d);

    let bar = |svg: &mut String| {
        let center = back(BAR_OFFSET);
        mark_line(
            svg,
            across(center, MARK_HALF_SPAN),
            across(center, -MARK_HALF_SPAN),
            stroke,
        )
    };

    match glyph {
        EndpointGlyph::None => Ok(()),
        EndpointGlyph::Bar => bar(svg),
        EndpointGlyph::Circle => mark_circle(svg, back(CIRCLE_OFFSET), stroke),
        EndpointGlyph::CircleBar => {
            bar(svg)?;
            mark_circle(svg, back(CIRCLE_OFFSET), stroke)
        }
        EndpointGlyph::CrowFoot => {
            let apex = back(CROW_LENGTH);
            for spread in [MARK_HALF_SPAN, 0, -MARK_HALF_SPAN] {
                mark_line(svg, apex, across((tx, ty), spread), stroke)?;
            }
            Ok(())
        }
    }
}

fn mark_line(
    svg: &mut String,
    (x1, y1): (i64, i64),
    (x2, y2): (i64, i64),
    stroke: &Stroke,
) -> std::fmt::Result {
    writeln!(
        svg,
        r#"<line class="glyph" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{}" />"#,
        stroke.color, stroke.width
    )
}

fn mark_circle(svg: &mut String, (cx, cy): (i64, i64), stroke: &Stroke) -> std::fmt::Result {
    writeln!(
        svg,
        r#"<circle class="glyph" cx="{cx}" cy="{cy}" r="{CIRCLE_RADIUS}" fill="white" stroke="{}" stroke-width="{}" />"#,
        stroke.color, stroke.width
    )
}

fn role_class(role: RectRole) -> &'static str {
    match role {
        RectRole::Body => "entity-body",
        RectRole::Header => "entity-header",
        RectRole::Border => "entity-border",
    }
}

fn style_class(style: TextStyle) -> &'static str {
    match style {
        TextStyle::Title => "title",
        TextStyle::Field => "field",
        TextStyle::Label => "label",
    }
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn path(start: EndpointGlyph, end: EndpointGlyph, dashed: bool) -> DrawPrimitive {
        let mut stroke = Stroke::solid(Color::BLACK, 1);
        stroke.dashed = dashed;
        DrawPrimitive::Path {
            points: vec![Point::new(210, 45), Point::new(230, 45)],
            stroke,
            start,
            end,
        }
    }

    #[test]
    fn test_empty_document() {
        let svg = SvgBackend::new().render(&[]).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="0" height="0""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_rect_and_text() {
        let primitives = vec![
            DrawPrimitive::Rect {
                bounds: Rect::new(10, 10, 200, 30),
                fill: Some(Color::rgb(0xec, 0xec, 0xff)),
                stroke: None,
                role: RectRole::Header,
            },
            DrawPrimitive::Text {
                position: Point::new(110, 25),
                content: "A<B> & \"C\"".to_string(),
                style: TextStyle::Title,
                anchor: TextAnchor::Middle,
            },
        ];
        let svg = SvgBackend::new().render(&primitives).unwrap();

        assert!(svg.contains(
            r##"<rect class="entity-header" x="10" y="10" width="200" height="30" fill="#ececff" stroke="none" />"##
        ));
        assert!(svg.contains("A&lt;B&gt; &amp; &quot;C&quot;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"width="220" height="50""#));
    }

    #[test]
    fn test_path_glyphs() {
        let svg = SvgBackend::new()
            .render(&[path(EndpointGlyph::Bar, EndpointGlyph::CrowFoot, false)])
            .unwrap();
        assert!(svg.contains(r#"points="210,45 230,45""#));
        // One bar line plus three crow foot lines
        assert_eq!(svg.matches(r#"class="glyph""#).count(), 4);
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_circle_bar_and_dashes() {
        let svg = SvgBackend::new()
            .render(&[path(EndpointGlyph::CircleBar, EndpointGlyph::None, true)])
            .unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_unicode_text_is_kept() {
        let text = DrawPrimitive::Text {
            position: Point::new(18, 50),
            content: "名前: string".to_string(),
            style: TextStyle::Field,
            anchor: TextAnchor::Start,
        };
        let svg = SvgBackend::new().render(&[text]).unwrap();
        assert!(svg.contains("名前: string"));
    }
}
