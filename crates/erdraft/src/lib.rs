//! erdraft - Mermaid ER diagrams to drawings
//!
//! A library for parsing Mermaid `erDiagram` text into an entity graph,
//! laying it out and rendering it as toolkit-independent draw primitives,
//! an SVG document or a terminal preview.
//!
//! # Quick Start
//!
//! ```rust
//! use erdraft::render_svg;
//!
//! let input = "erDiagram\nCUSTOMER {\n  int id PK\n}\nORDER {\n  int customer_id FK\n}\nCUSTOMER ||--o{ ORDER : places";
//! let svg = render_svg(input).unwrap();
//! assert!(svg.contains("CUSTOMER"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual stages:
//!
//! ```rust
//! use erdraft::prelude::*;
//!
//! let input = "erDiagram\nUSER {\n  int id PK\n  string email UNIQUE\n}";
//! validate(input).unwrap();
//!
//! // Parse into a graph
//! let parser = ErParser::new();
//! let mut graph = Graph::new();
//! parser.parse(input, &mut graph).unwrap();
//! assert_eq!(graph.entities[0].fields.len(), 2);
//!
//! // Lay out and render to primitives
//! let layout = ErLayoutAlgorithm::new().layout(&graph).unwrap();
//! let primitives = ErRenderer::new().render_layout(&graph, &layout);
//! assert!(!primitives.is_empty());
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;
pub use plugins::er::{
    to_mermaid, validate, validate_strict, ErLayoutResult, Graph, LayoutConfig, Theme,
};

use crate::plugins::er::{ErLayoutAlgorithm, ErParser, ErRenderer};
use crate::plugins::orchestrator::Orchestrator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, Database, Detector, DrawPrimitive, LayoutAlgorithm, Parser, Renderer,
        ValidationError,
    };
    pub use crate::plugins::er::{
        to_mermaid, validate, validate_strict, AsciiBackend, Cardinality, Entity, ErDetector,
        ErLayoutAlgorithm, ErParser, ErRenderer, Field, Graph, LayoutConfig, LineStyle,
        Multiplicity, Relation, SvgBackend, Theme,
    };
    pub use crate::plugins::orchestrator::{Orchestrator, RenderedDiagram};
}

/// Parse Mermaid ER text into a graph.
///
/// Malformed field and relation lines are dropped, so this only fails on
/// internal errors. Call [`validate`] first to reject non-ER input.
///
/// # Example
/// ```rust
/// let graph = erdraft::parse("erDiagram\nA ||--o{ B : has").unwrap();
/// assert_eq!(graph.relations.len(), 1);
/// assert!(graph.entities.is_empty());
/// ```
pub fn parse(input: &str) -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    ErParser::new().parse(input, &mut graph)?;
    Ok(graph)
}

/// Lay out a graph, wrapping rows at `canvas_width` when given
pub fn layout(graph: &Graph, canvas_width: Option<u32>) -> ErLayoutResult {
    let config = LayoutConfig::default().with_canvas_width(canvas_width);
    ErLayoutAlgorithm::with_config(config).place(graph)
}

/// Lay out and render a graph to draw primitives
///
/// # Example
/// ```rust
/// let graph = erdraft::parse("erDiagram\nA {\n  int id PK\n}").unwrap();
/// let primitives = erdraft::render(&graph, None);
/// // Body, header, border, title and one field row
/// assert_eq!(primitives.len(), 5);
/// ```
pub fn render(graph: &Graph, canvas_width: Option<u32>) -> Vec<DrawPrimitive> {
    let config = LayoutConfig::default().with_canvas_width(canvas_width);
    let renderer = ErRenderer::with_config(config);
    let layout = ErLayoutAlgorithm::with_config(renderer.config().clone()).place(graph);
    renderer.render_layout(graph, &layout)
}

/// Validate, parse and render ER text to an SVG document
pub fn render_svg(input: &str) -> anyhow::Result<String> {
    Orchestrator::new().process_svg(input)
}

/// Validate, parse and render ER text as a terminal preview
///
/// # Example
/// ```rust
/// use erdraft::{render_ascii, CharacterSet};
///
/// let preview = render_ascii("erDiagram\nUSER {\n  int id PK\n}", CharacterSet::Ascii).unwrap();
/// assert!(preview.contains("id: int PK"));
/// ```
pub fn render_ascii(input: &str, style: CharacterSet) -> anyhow::Result<String> {
    Orchestrator::terminal().process_ascii(input, style)
}
