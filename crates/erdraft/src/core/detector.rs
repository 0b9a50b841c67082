//! Core detector trait for diagram type identification

/// Core trait for diagram type detectors
///
/// Recognizes a diagram type from markup patterns without parsing it.
///
/// # Example
/// ```
/// use erdraft::core::Detector;
/// use erdraft::plugins::er::ErDetector;
///
/// let detector = ErDetector::new();
/// assert!(detector.detect("erDiagram\n    A ||--o{ B : has"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
