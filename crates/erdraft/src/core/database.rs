//! Core database trait for diagram model storage
//!
//! The ER plugin stores entities as nodes and relations as edges.

use anyhow::Result;

/// Core trait for diagram databases
///
/// A database is the parsed model a parser fills and a layout algorithm reads.
/// Node lookups by name follow the implementation's duplicate policy.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Append a node, keeping declaration order
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Append an edge, keeping declaration order
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by name
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in declaration order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in declaration order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}
