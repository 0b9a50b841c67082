//! Core layout trait for diagram positioning

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
///
/// Assigns every element of a database a position in a pixel coordinate
/// system. Layouts must be deterministic: the same database always yields the
/// same output.
///
/// # Example
/// ```
/// use erdraft::core::LayoutAlgorithm;
/// use erdraft::plugins::er::{ErLayoutAlgorithm, Graph};
///
/// let graph = Graph::new();
/// let layout = ErLayoutAlgorithm::new();
/// let result = layout.layout(&graph).unwrap();
/// assert!(result.entities.is_empty());
/// ```
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange elements in the database using this layout algorithm
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;

    /// Get the layout direction (LR, TB, etc.)
    fn direction(&self) -> &'static str;
}
