//! Diagram plugins
//!
//! The ER plugin implements the core traits for Mermaid `erDiagram` input.
//! The orchestrator chains its stages into one pipeline.

pub mod er;
pub mod orchestrator;

pub use er::*;
pub use orchestrator::*;
