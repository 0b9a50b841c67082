//! ER diagram detector
//!
//! Identifies ER diagram content from input text.

use tracing::{debug, trace};

use super::database::{LineStyle, Multiplicity};
use super::preprocess::ER_KEYWORD;
use crate::core::Detector;

/// Detector for Mermaid ER diagram syntax
pub struct ErDetector;

impl ErDetector {
    pub fn new() -> Self {
        Self
    }

    /// True if the text holds `erDiagram` once all whitespace is removed
    pub fn has_keyword(input: &str) -> bool {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        compact.contains(ER_KEYWORD)
    }

    /// True if the text holds a cardinality cluster such as `||--o{`
    fn has_cardinality_cluster(input: &str) -> bool {
        let lefts = Multiplicity::ALL.map(Multiplicity::left_token);
        let rights = Multiplicity::ALL.map(Multiplicity::right_token);
        let connectors = [
            LineStyle::Identifying.connector(),
            LineStyle::NonIdentifying.connector(),
        ];

        lefts.iter().any(|left| {
            connectors.iter().any(|connector| {
                rights
                    .iter()
                    .any(|right| input.contains(&format!("{left}{connector}{right}")))
            })
        })
    }
}

impl Default for ErDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ErDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        trace!(input_len = input.len(), "ErDetector::confidence called");

        if Self::has_keyword(input) {
            return 1.0;
        }

        if Self::has_cardinality_cluster(input) {
            debug!("Detected ER content via cardinality notation");
            return 0.7;
        }

        0.0
    }

    fn diagram_type(&self) -> &'static str {
        "er"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec![ER_KEYWORD]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_keyword() {
        let detector = ErDetector::new();
        assert!(detector.detect("erDiagram\n    A ||--o{ B : has"));
        assert_eq!(detector.confidence("  erDiagram  "), 1.0);
    }

    #[test]
    fn test_keyword_is_whitespace_insensitive() {
        assert!(ErDetector::has_keyword("er Dia\ngram"));
        assert!(!ErDetector::has_keyword("erdiagram"));
    }

    #[test]
    fn test_detects_cardinality_without_keyword() {
        let detector = ErDetector::new();
        assert_eq!(detector.confidence("CUSTOMER ||--o{ ORDER"), 0.7);
        assert_eq!(detector.confidence("A }o..|{ B"), 0.7);
        assert!(detector.detect("A |o--o| B"));
    }

    #[test]
    fn test_rejects_other_diagrams() {
        let detector = ErDetector::new();
        assert_eq!(detector.confidence("graph TD; A-->B"), 0.0);
        assert!(!detector.detect("classDiagram\n    Animal <|-- Dog"));
        assert!(!detector.detect("sequenceDiagram\n    Alice->>Bob: Hi"));
        assert!(!detector.detect(""));
    }

    #[test]
    fn test_metadata() {
        let detector = ErDetector::new();
        assert_eq!(detector.diagram_type(), "er");
        assert_eq!(detector.patterns(), vec!["erDiagram"]);
    }
}
