//! ER diagram parser
//!
//! Runs the line pipeline: preprocess, extract blocks, then apply the field
//! and relation grammars. Lines that do not match a grammar are dropped.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::blocks::{extract_blocks, Extraction};
use super::database::{Entity, Graph};
use super::detector::ErDetector;
use super::field_grammar::try_parse_field_line;
use super::preprocess::preprocess;
use super::relation_grammar::try_parse_relation_line;
use crate::core::{Database, Detector, Parser};

/// ER diagram parser
pub struct ErParser;

impl ErParser {
    pub fn new() -> Self {
        Self
    }

    /// Preprocess and group lines without applying the line grammars
    pub fn extract<'a>(&self, input: &'a str) -> Extraction<'a> {
        extract_blocks(&preprocess(input))
    }

    /// Apply the field and relation grammars to extracted blocks.
    ///
    /// Entities keep block-closing order and relations keep line order.
    pub fn assemble(&self, extraction: Extraction<'_>) -> Graph {
        let mut graph = Graph::new();
        let mut dropped = 0usize;

        for raw in extraction.entities {
            let mut entity = Entity::new(raw.name);
            for line in raw.field_lines {
                match try_parse_field_line(line.text, line.number) {
                    Ok(field) => entity.add_field(field),
                    Err(error) => {
                        dropped += 1;
                        debug!(entity = raw.name, %error, "Dropped field line");
                    }
                }
            }
            graph.add_entity(entity);
        }

        for line in extraction.relation_lines {
            match try_parse_relation_line(line.text, line.number) {
                Ok(relation) => graph.add_relation(relation),
                Err(error) => {
                    dropped += 1;
                    debug!(%error, "Dropped relation line");
                }
            }
        }

        if dropped > 0 {
            debug!(dropped_lines = dropped, "Lines dropped during assembly");
        }
        graph
    }

    /// Parse into a fresh graph
    pub fn parse_graph(&self, input: &str) -> Result<Graph> {
        let mut graph = Graph::new();
        self.parse(input, &mut graph)?;
        Ok(graph)
    }
}

impl Default for ErParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<Graph> for ErParser {
    fn parse(&self, input: &str, database: &mut Graph) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_erd", input_len = input.len());
        let _enter = parse_span.enter();

        trace!("Starting ER diagram parsing");

        let parsed = self.assemble(self.extract(input));
        for entity in parsed.entities {
            database.add_node(entity)?;
        }
        for relation in parsed.relations {
            database.add_edge(relation)?;
        }

        info!(
            entity_count = database.node_count(),
            relation_count = database.edge_count(),
            "ER diagram parsed"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "er"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        ErDetector::new().detect(input)
    }
}
