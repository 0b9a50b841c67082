//! Pipeline orchestrator for ER diagrams
//!
//! The orchestrator manages the flow of data through every stage:
//! Validate → Parse → Graph → Layout → Render → Backend

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{CharacterSet, DiagramError, DrawPrimitive, LayoutAlgorithm, Parser};
use crate::plugins::er::{
    validate, AsciiBackend, ErLayoutAlgorithm, ErLayoutResult, ErParser, ErRenderer,
    Graph, LayoutConfig, SvgBackend, Theme,
};

/// Everything produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub graph: Graph,
    pub layout: ErLayoutResult,
    pub primitives: Vec<DrawPrimitive>,
}

/// Pipeline orchestrator that coordinates every stage
///
/// The orchestrator wires the validator, parser, layout and renderer
/// together so callers can run the full pipeline without handling each
/// trait manually.
pub struct Orchestrator {
    parser: ErParser,
    layout: ErLayoutAlgorithm,
    renderer: ErRenderer,
    svg: SvgBackend,
    skip_validation: bool,
}

impl Orchestrator {
    /// Create an orchestrator with the default layout
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create an orchestrator tuned for terminal previews
    pub fn terminal() -> Self {
        Self::with_config(LayoutConfig::terminal())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            parser: ErParser::new(),
            layout: ErLayoutAlgorithm::with_config(config.clone()),
            renderer: ErRenderer::with_config(config),
            svg: SvgBackend::default(),
            skip_validation: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.renderer = self.renderer.with_theme(theme);
        self
    }

    pub fn with_svg_backend(mut self, svg: SvgBackend) -> Self {
        self.svg = svg;
        self
    }

    /// Run the pipeline even when pre-flight validation fails
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    /// Validate, parse, lay out and render
    pub fn process(&self, input: &str) -> Result<RenderedDiagram> {
        let process_span = span!(Level::INFO, "process_erd", input_len = input.len());
        let _enter = process_span.enter();

        if self.skip_validation {
            debug!("Validation skipped");
        } else {
            validate(input).map_err(DiagramError::from)?;
        }

        let mut graph = Graph::new();
        self.parser.parse(input, &mut graph)?;

        let layout = self.layout.layout(&graph)?;
        let primitives = self.renderer.render_layout(&graph, &layout);

        info!(
            entity_count = graph.entity_count(),
            relation_count = graph.relation_count(),
            primitive_count = primitives.len(),
            "Pipeline completed"
        );

        Ok(RenderedDiagram {
            graph,
            layout,
            primitives,
        })
    }

    /// Run the pipeline and paint the result as an SVG document
    pub fn process_svg(&self, input: &str) -> Result<String> {
        let rendered = self.process(input)?;
        self.svg.render(&rendered.primitives)
    }

    /// Run the pipeline and paint the result as a character grid
    pub fn process_ascii(&self, input: &str, style: CharacterSet) -> Result<String> {
        let rendered = self.process(input)?;
        Ok(AsciiBackend::new(style).render(&rendered.primitives))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "erDiagram\nUSER {\n  int id PK\n}\nPOST {\n  int user_id FK\n}\nUSER ||--o{ POST : writes\n";

    #[test]
    fn test_process_rejects_other_diagram_kinds() {
        let error = Orchestrator::new()
            .process("graph TD\n  A --> B\n")
            .unwrap_err();
        assert!(error.to_string().contains("erDiagram"));

        let error = Orchestrator::new()
            .process_ascii("sequenceDiagram\n  A->>B: hi\n", CharacterSet::Ascii)
            .unwrap_err();
        assert!(error.to_string().contains("erDiagram"));
    }

    #[test]
    fn test_process_runs_every_stage() {
        let rendered = Orchestrator::new().process(INPUT).unwrap();
        assert_eq!(rendered.graph.entity_count(), 2);
        assert_eq!(rendered.layout.entities.len(), 2);
        assert!(rendered
            .primitives
            .iter()
            .any(|p| matches!(p, DrawPrimitive::Path { .. })));
    }

    #[test]
    fn test_process_rejects_invalid_input() {
        let error = Orchestrator::new().process("").unwrap_err();
        assert_eq!(error.to_string(), "Validation failed: Diagram is empty");

        let error = Orchestrator::new().process("USER {\n}\n").unwrap_err();
        assert!(error.to_string().contains("erDiagram"));
    }

    #[test]
    fn test_skip_validation() {
        let rendered = Orchestrator::new()
            .skip_validation(true)
            .process("USER {\n  int id\n}\n")
            .unwrap();
        assert_eq!(rendered.graph.entity_count(), 1);
    }

    #[test]
    fn test_process_svg() {
        let svg = Orchestrator::new().process_svg(INPUT).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("writes"));
    }

    #[test]
    fn test_process_ascii() {
        let out = Orchestrator::terminal()
            .process_ascii(INPUT, CharacterSet::Ascii)
            .unwrap();
        assert!(out.contains("USER"));
        assert!(out.contains("user_id: int FK"));
        assert!(out.is_ascii());
    }
}
