//! Core renderer trait for diagram output

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// Turns a database into an output value: drawing primitives, an SVG
/// document, a terminal preview.
///
/// # Example
/// ```
/// use erdraft::core::Renderer;
/// use erdraft::plugins::er::{ErRenderer, Graph};
///
/// let graph = Graph::new();
/// let renderer = ErRenderer::new();
/// let primitives = renderer.render(&graph).unwrap();
/// assert!(primitives.is_empty());
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
