//! ER diagram plugin
//!
//! Implements Mermaid `erDiagram` parsing, validation, layout and rendering.
//!
//! Pipeline: [`preprocess`] → [`extract_blocks`] → field and relation
//! grammars → [`Graph`] → [`ErLayoutAlgorithm`] → [`ErRenderer`] →
//! [`DrawPrimitive`](crate::core::DrawPrimitive), painted by [`SvgBackend`]
//! or [`AsciiBackend`].

mod ascii;
mod blocks;
mod database;
mod detector;
mod field_grammar;
mod layout;
mod parser;
mod preprocess;
mod relation_grammar;
mod renderer;
mod serializer;
mod svg;
mod validator;

pub use ascii::AsciiBackend;
pub use blocks::{extract_blocks, Extraction, RawEntity};
pub use database::{
    Cardinality, Constraint, Entity, Field, Graph, LineStyle, Multiplicity, Relation,
};
pub use detector::ErDetector;
pub use field_grammar::{parse_field_line, try_parse_field_line};
pub use layout::{ErLayoutAlgorithm, ErLayoutResult, KeyMarkers, LayoutConfig, LayoutEntity};
pub use parser::ErParser;
pub use preprocess::{preprocess, SourceLine, ER_KEYWORD};
pub use relation_grammar::{parse_relation_line, try_parse_relation_line};
pub use renderer::{endpoint_glyph, ErRenderer, Theme};
pub use serializer::to_mermaid;
pub use svg::SvgBackend;
pub use validator::{validate, validate_strict};
