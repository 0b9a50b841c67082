//! ER diagram layout algorithm
//!
//! Places entity boxes in declaration order, left to right, wrapping to a new
//! row when a box would cross the configured canvas width.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::database::{Entity, Field, Graph};
use crate::core::{max_display_width, LayoutAlgorithm, Rect};

/// Suffixes appended to key fields in entity rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMarkers {
    pub primary: String,
    pub foreign: String,
}

impl KeyMarkers {
    /// `PK` / `FK` text markers for output without emoji
    pub fn plain() -> Self {
        Self {
            primary: "PK".to_string(),
            foreign: "FK".to_string(),
        }
    }
}

impl Default for KeyMarkers {
    fn default() -> Self {
        Self {
            primary: "🔑".to_string(),
            foreign: "🔗".to_string(),
        }
    }
}

/// Layout geometry, in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Wrap rows at this width; `None` keeps every entity on one row
    pub canvas_width: Option<u32>,
    /// Minimum entity box width
    pub entity_width: u32,
    pub header_height: u32,
    pub row_height: u32,
    /// Space between boxes and between rows
    pub gutter: u32,
    pub margin: u32,
    /// Width of one display column of text
    pub char_width: u32,
    /// Horizontal padding on each side of the text
    pub text_padding: u32,
    pub markers: KeyMarkers,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: None,
            entity_width: 200,
            header_height: 30,
            row_height: 20,
            gutter: 20,
            margin: 10,
            char_width: 8,
            text_padding: 8,
            markers: KeyMarkers::default(),
        }
    }
}

impl LayoutConfig {
    /// Geometry tuned for the terminal preview: one text row per field,
    /// wider gutters for connectors and plain key markers.
    pub fn terminal() -> Self {
        Self {
            row_height: 10,
            gutter: 96,
            text_padding: 12,
            markers: KeyMarkers::plain(),
            ..Self::default()
        }
    }

    pub fn with_canvas_width(mut self, width: Option<u32>) -> Self {
        self.canvas_width = width;
        self
    }

    pub fn with_entity_width(mut self, width: u32) -> Self {
        self.entity_width = width;
        self
    }

    pub fn with_gutter(mut self, gutter: u32) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn with_markers(mut self, markers: KeyMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Row text for a field: `"{name}: {type}"` plus key markers
    pub fn field_label(&self, field: &Field) -> String {
        field.display_text(&self.markers.primary, &self.markers.foreign)
    }

    /// Box width for an entity: the configured minimum, widened for long text
    pub fn entity_box_width(&self, entity: &Entity) -> u32 {
        let labels: Vec<String> = entity.fields.iter().map(|f| self.field_label(f)).collect();
        let columns = max_display_width(
            std::iter::once(entity.name.as_str()).chain(labels.iter().map(String::as_str)),
        ) as u32;
        let text_width = columns * self.char_width + 2 * self.text_padding;
        self.entity_width.max(text_width)
    }

    /// Box height: header band plus one row per field
    pub fn entity_box_height(&self, entity: &Entity) -> u32 {
        self.header_height + entity.fields.len() as u32 * self.row_height
    }
}

/// Entity box placed on the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntity {
    /// Position in `Graph::entities`
    pub index: usize,
    pub name: String,
    pub bounds: Rect,
}

/// Layout result containing every placed entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErLayoutResult {
    pub entities: Vec<LayoutEntity>,
    pub width: u32,
    pub height: u32,
}

impl ErLayoutResult {
    /// Box of the last declaration named `name`
    pub fn bounds_of(&self, name: &str) -> Option<Rect> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| e.bounds)
    }
}

/// Row-major ER layout
pub struct ErLayoutAlgorithm {
    config: LayoutConfig,
}

impl ErLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place every entity without going through the trait
    pub fn place(&self, graph: &Graph) -> ErLayoutResult {
        let config = &self.config;
        if graph.entities.is_empty() {
            debug!("Empty graph, returning empty layout");
            return ErLayoutResult::default();
        }

        let mut entities = Vec::with_capacity(graph.entities.len());
        let mut x = config.margin;
        let mut y = config.margin;
        let mut row_height = 0;

        for (index, entity) in graph.entities.iter().enumerate() {
            let width = config.entity_box_width(entity);
            let height = config.entity_box_height(entity);

            let overflows = config
                .canvas_width
                .is_some_and(|canvas| x + width > canvas);
            if x > config.margin && overflows {
                x = config.margin;
                y += row_height + config.gutter;
                row_height = 0;
                trace!(index, y, "Wrapped to new row");
            }

            let bounds = Rect::new(x, y, width, height);
            trace!(entity = %entity.name, ?bounds, "Placed entity");
            entities.push(LayoutEntity {
                index,
                name: entity.name.clone(),
                bounds,
            });

            x += width + config.gutter;
            row_height = row_height.max(height);
        }

        let width = entities.iter().map(|e| e.bounds.right()).max().unwrap_or(0) + config.margin;
        let height = entities.iter().map(|e| e.bounds.bottom()).max().unwrap_or(0) + config.margin;

        ErLayoutResult {
            entities,
            width,
            height,
        }
    }
}

impl Default for ErLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<Graph> for ErLayoutAlgorithm {
    type Output = ErLayoutResult;

    fn layout(&self, database: &Graph) -> Result<Self::Output> {
        let layout_span = span!(
            Level::INFO,
            "layout_erd",
            entity_count = database.entity_count(),
            canvas_width = ?self.config.canvas_width
        );
        let _enter = layout_span.enter();

        let result = self.place(database);
        debug!(width = result.width, height = result.height, "Layout complete");
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "row-major"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn direction(&self) -> &'static str {
        "LR"
    }
}
