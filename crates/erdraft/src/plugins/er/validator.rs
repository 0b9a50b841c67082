//! Pre-flight validation
//!
//! [`validate`] checks only the gross shape of the input. [`validate_strict`]
//! additionally reports structural defects and referential problems.

use tracing::debug;

use super::detector::ErDetector;
use super::parser::ErParser;
use crate::core::ValidationError;

/// Check that the text is non-empty and carries the `erDiagram` marker
pub fn validate(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if !ErDetector::has_keyword(input) {
        return Err(ValidationError::NotErdContent);
    }
    Ok(())
}

/// [`validate`], then the first block defect, duplicate entity names and
/// relations to undeclared entities, in that order
pub fn validate_strict(input: &str) -> Result<(), ValidationError> {
    validate(input)?;

    let parser = ErParser::new();
    let extraction = parser.extract(input);
    if let Some(defect) = extraction.defects.first() {
        debug!(%defect, "Structural defect");
        return Err(defect.clone().into());
    }

    let graph = parser.assemble(extraction);

    if let Some(name) = graph.duplicate_entity_names().first() {
        return Err(ValidationError::DuplicateEntity {
            name: name.to_string(),
        });
    }

    if let Some(relation) = graph.dangling_relations().next() {
        return Err(ValidationError::DanglingRelation {
            from: relation.from.clone(),
            to: relation.to.clone(),
        });
    }

    Ok(())
}
