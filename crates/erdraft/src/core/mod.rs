//! Core abstractions for diagram processing
//!
//! The pipeline traits (`Database`, `Parser`, `LayoutAlgorithm`, `Renderer`,
//! `Detector`) plus the shared pieces every stage uses: error types, drawing
//! primitives, text measurement, grammar helpers and the terminal canvas.

mod box_drawing;
mod canvas;
pub mod chumsky_utils;
mod database;
mod detector;
mod error;
mod layout;
pub mod logging;
mod parser;
mod renderer;
mod text;
mod types;

pub use box_drawing::*;
pub use canvas::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use layout::*;
pub use logging::{init_default_logging, init_logging, LogFormat};
pub use parser::*;
pub use renderer::*;
pub use text::*;
pub use types::*;
