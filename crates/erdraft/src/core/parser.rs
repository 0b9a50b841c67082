//! Core parser trait for diagram markup

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// Converts diagram markup into the provided database. Implementations may be
/// lenient and skip lines they cannot understand; an `Err` is reserved for
/// failures unrelated to the content of individual lines.
///
/// # Example
/// ```
/// use erdraft::core::{Database, Parser};
/// use erdraft::plugins::er::{ErParser, Graph};
///
/// let parser = ErParser::new();
/// let mut graph = Graph::new();
/// parser.parse("erDiagram\nA ||--o{ B : has", &mut graph).unwrap();
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
