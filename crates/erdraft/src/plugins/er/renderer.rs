//! ER diagram renderer
//!
//! Turns a laid-out graph into toolkit-independent draw primitives. Entities
//! come first, in layout order, followed by one connector per relation.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::database::{Graph, LineStyle, Multiplicity, Relation};
use super::layout::{ErLayoutAlgorithm, ErLayoutResult, LayoutConfig, LayoutEntity};
use crate::core::{
    Color, DrawPrimitive, EndpointGlyph, Point, Rect, RectRole, Renderer, Stroke, TextAnchor,
    TextStyle,
};

/// Shortest horizontal stub leaving or entering a box
const MIN_STUB: u32 = 20;
/// Longest horizontal stub for backward connectors
const MAX_STUB: u32 = 100;

/// Fill and stroke colors for the rendered diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header_fill: Color,
    pub body_fill: Color,
    pub border: Stroke,
    pub connector: Stroke,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_fill: Color::rgb(0xec, 0xec, 0xff),
            body_fill: Color::WHITE,
            border: Stroke::solid(Color::rgb(0x93, 0x70, 0xdb), 1),
            connector: Stroke::solid(Color::rgb(0x33, 0x33, 0x33), 1),
        }
    }
}

impl Theme {
    /// Black on white, for print
    pub fn monochrome() -> Self {
        Self {
            header_fill: Color::rgb(0xee, 0xee, 0xee),
            body_fill: Color::WHITE,
            border: Stroke::solid(Color::BLACK, 1),
            connector: Stroke::solid(Color::BLACK, 1),
        }
    }

    pub fn with_header_fill(mut self, color: Color) -> Self {
        self.header_fill = color;
        self
    }

    pub fn with_body_fill(mut self, color: Color) -> Self {
        self.body_fill = color;
        self
    }

    pub fn with_border(mut self, stroke: Stroke) -> Self {
        self.border = stroke;
        self
    }

    pub fn with_connector(mut self, stroke: Stroke) -> Self {
        self.connector = stroke;
        self
    }
}

/// Glyph drawn at a connector end for a multiplicity
pub fn endpoint_glyph(multiplicity: Multiplicity) -> EndpointGlyph {
    match multiplicity {
        Multiplicity::ExactlyOne => EndpointGlyph::Bar,
        Multiplicity::ZeroOrOne => EndpointGlyph::CircleBar,
        Multiplicity::ZeroOrMany | Multiplicity::OneOrMany => EndpointGlyph::CrowFoot,
    }
}

/// ER diagram renderer producing draw primitives
pub struct ErRenderer {
    layout: ErLayoutAlgorithm,
    theme: Theme,
}

impl ErRenderer {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            layout: ErLayoutAlgorithm::with_config(config),
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Emit primitives for an already computed layout
    pub fn render_layout(&self, graph: &Graph, layout: &ErLayoutResult) -> Vec<DrawPrimitive> {
        let render_span = span!(
            Level::INFO,
            "render_erd",
            entity_count = layout.entities.len(),
            relation_count = graph.relation_count()
        );
        let _enter = render_span.enter();

        let mut primitives = Vec::new();
        for placed in &layout.entities {
            self.draw_entity(graph, placed, &mut primitives);
        }

        let mut dropped = 0usize;
        for relation in &graph.relations {
            let endpoints = layout.bounds_of(&relation.from).zip(layout.bounds_of(&relation.to));
            match endpoints {
                Some((from, to)) => self.draw_relation(relation, from, to, &mut primitives),
                None => {
                    dropped += 1;
                    debug!(
                        from = %relation.from,
                        to = %relation.to,
                        "Dropped relation to undeclared entity"
                    );
                }
            }
        }

        info!(
            primitive_count = primitives.len(),
            dropped_relations = dropped,
            "ER diagram rendered"
        );
        primitives
    }

    fn draw_entity(&self, graph: &Graph, placed: &LayoutEntity, out: &mut Vec<DrawPrimitive>) {
        let config = self.layout.config();
        let bounds = placed.bounds;

        out.push(DrawPrimitive::Rect {
            bounds,
            fill: Some(self.theme.body_fill),
            stroke: None,
            role: RectRole::Body,
        });
        out.push(DrawPrimitive::Rect {
            bounds: Rect::new(bounds.x, bounds.y, bounds.width, config.header_height),
            fill: Some(self.theme.header_fill),
            stroke: None,
            role: RectRole::Header,
        });
        out.push(DrawPrimitive::Rect {
            bounds,
            fill: None,
            stroke: Some(self.theme.border),
            role: RectRole::Border,
        });
        out.push(DrawPrimitive::Text {
            position: Point::new(bounds.center_x(), bounds.y + config.header_height / 2),
            content: placed.name.clone(),
            style: TextStyle::Title,
            anchor: TextAnchor::Middle,
        });

        let Some(entity) = graph.entities.get(placed.index) else {
            return;
        };
        let text_x = bounds.x + config.text_padding;
        for (row, field) in entity.fields.iter().enumerate() {
            let y = bounds.y + config.header_height + row as u32 * config.row_height;
            out.push(DrawPrimitive::Text {
                position: Point::new(text_x, y + config.row_height / 2),
                content: config.field_label(field),
                style: TextStyle::Field,
                anchor: TextAnchor::Start,
            });
        }
    }

    fn draw_relation(&self, relation: &Relation, from: Rect, to: Rect, out: &mut Vec<DrawPrimitive>) {
        let points = if relation.is_self_relation() {
            self_loop(from, self.layout.config().gutter)
        } else {
            route(from, to, self.layout.config().gutter)
        };
        trace!(from = %relation.from, to = %relation.to, ?points, "Routed relation");

        let mut stroke = self.theme.connector;
        stroke.dashed = relation.cardinality.line == LineStyle::NonIdentifying;

        let label_at = midpoint(&points);
        out.push(DrawPrimitive::Path {
            points,
            stroke,
            start: endpoint_glyph(relation.cardinality.from),
            end: endpoint_glyph(relation.cardinality.to),
        });

        if let (Some(label), Some(position)) = (&relation.label, label_at) {
            out.push(DrawPrimitive::Text {
                position,
                content: label.clone(),
                style: TextStyle::Label,
                anchor: TextAnchor::Middle,
            });
        }
    }
}

impl Default for ErRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<Graph> for ErRenderer {
    type Output = Vec<DrawPrimitive>;

    fn render(&self, database: &Graph) -> Result<Self::Output> {
        let layout = self.layout.place(database);
        Ok(self.render_layout(database, &layout))
    }

    fn name(&self) -> &'static str {
        "er"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "primitives"
    }
}

/// Orthogonal route from the right edge of `from` to the left edge of `to`
fn route(from: Rect, to: Rect, gutter: u32) -> Vec<Point> {
    let start = Point::new(from.right(), from.center_y());
    let end = Point::new(to.x, to.center_y());

    if end.x >= start.x {
        if start.y == end.y {
            return vec![start, end];
        }
        let mid_x = start.x + (end.x - start.x) / 2;
        return vec![
            start,
            Point::new(mid_x, start.y),
            Point::new(mid_x, end.y),
            end,
        ];
    }

    // Target lies to the left: leave right, run along a gap between rows,
    // then come back in from the left
    let stub = ((start.x - end.x) / 3).clamp(MIN_STUB, MAX_STUB);
    let lane = if to.y >= from.bottom() {
        to.y.saturating_sub(gutter / 2)
    } else if from.y >= to.bottom() {
        from.y.saturating_sub(gutter / 2)
    } else {
        from.y.min(to.y).saturating_sub(gutter / 2)
    };
    let out_x = start.x + stub;
    let in_x = end.x.saturating_sub(stub);

    vec![
        start,
        Point::new(out_x, start.y),
        Point::new(out_x, lane),
        Point::new(in_x, lane),
        Point::new(in_x, end.y),
        end,
    ]
}

/// Loop from the right edge over the top of the box, ending on its top edge
fn self_loop(bounds: Rect, gutter: u32) -> Vec<Point> {
    let start = Point::new(bounds.right(), bounds.center_y());
    let out_x = bounds.right() + MIN_STUB;
    let lane = bounds.y.saturating_sub(gutter / 2);
    let top_x = bounds.center_x();

    vec![
        start,
        Point::new(out_x, start.y),
        Point::new(out_x, lane),
        Point::new(top_x, lane),
        Point::new(top_x, bounds.y),
    ]
}

/// Point halfway along an orthogonal polyline
fn midpoint(points: &[Point]) -> Option<Point> {
    let segment_len = |a: &Point, b: &Point| a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
    let total: u32 = points.windows(2).map(|w| segment_len(&w[0], &w[1])).sum();

    let mut remaining = total / 2;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = segment_len(&a, &b);
        if remaining <= len {
            let step = |from: u32, to: u32| {
                if to >= from {
                    from + remaining
                } else {
                    from - remaining
                }
            };
            return Some(if a.y == b.y {
                Point::new(step(a.x, b.x), a.y)
            } else {
                Point::new(a.x, step(a.y, b.y))
            });
        }
        remaining -= len;
    }
    points.first().copied()
}
