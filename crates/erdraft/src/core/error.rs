//! Core error types for ER diagram processing
//!
//! Two taxonomies live here. [`ValidationError`] is the user-facing pre-flight
//! verdict that stops a caller from rendering. [`DiagramError`] carries line
//! diagnostics from the grammars and validation failures raised mid-pipeline.

use thiserror::Error;

/// Structural defect found by the block extractor
///
/// Line numbers are 1-based and refer to the original input text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockDefect {
    #[error("Entity '{entity}' opened at line {line} is never closed")]
    UnterminatedBlock { entity: String, line: usize },

    #[error("Unmatched '}}' at line {line}")]
    UnmatchedClose { line: usize },

    #[error("Entity block opened at line {line} while '{entity}' was still open")]
    NestedBlock { entity: String, line: usize },

    #[error("Entity block at line {line} has no name")]
    UnnamedEntity { line: usize },
}

/// Pre-flight validation failure with a user-facing message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Diagram is empty")]
    Empty,

    #[error("Input is not an ER diagram (missing 'erDiagram' keyword)")]
    NotErdContent,

    #[error(transparent)]
    Structure(#[from] BlockDefect),

    #[error("Entity '{name}' is declared more than once")]
    DuplicateEntity { name: String },

    #[error("Relation {from} -> {to} refers to an undeclared entity")]
    DanglingRelation { from: String, to: String },
}

/// Internal failures raised by the parsing stages
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}")]
    ParseError { message: String, line: usize },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
        }
    }
}
