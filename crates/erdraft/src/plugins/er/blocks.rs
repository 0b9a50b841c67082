//! Entity block extraction
//!
//! Walks preprocessed lines with a two-state machine (outside a block, inside
//! an entity block) and groups raw field lines per entity. Lines outside any
//! block that carry a connector become relation candidates.

use tracing::{debug, span, trace, Level};

use super::preprocess::SourceLine;
use crate::core::BlockDefect;

const BLOCK_OPEN: char = '{';
const BLOCK_CLOSE: char = '}';
const CONNECTORS: [&str; 2] = ["--", ".."];

/// Entity block as written, before field parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntity<'a> {
    pub name: &'a str,
    /// Line of the opening brace
    pub line: usize,
    pub field_lines: Vec<SourceLine<'a>>,
}

/// Result of block extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Entities in block-closing order
    pub entities: Vec<RawEntity<'a>>,
    pub relation_lines: Vec<SourceLine<'a>>,
    /// Structural defects in source order
    pub defects: Vec<BlockDefect>,
}

enum State<'a> {
    Outside,
    /// `None` marks an anonymous block whose lines are consumed and discarded
    InsideEntity(Option<RawEntity<'a>>),
}

/// True if the line holds a relation connector
pub fn has_connector(text: &str) -> bool {
    CONNECTORS.iter().any(|c| text.contains(c))
}

/// Group preprocessed lines into entity blocks and relation candidates
pub fn extract_blocks<'a>(lines: &[SourceLine<'a>]) -> Extraction<'a> {
    let extract_span = span!(Level::DEBUG, "extract_blocks", line_count = lines.len());
    let _enter = extract_span.enter();

    let mut extraction = Extraction::default();
    let mut state = State::Outside;

    for line in lines {
        state = match state {
            State::Outside => step_outside(*line, &mut extraction),
            State::InsideEntity(open) => step_inside(open, *line, &mut extraction),
        };
    }

    if let State::InsideEntity(Some(entity)) = state {
        extraction.defects.push(BlockDefect::UnterminatedBlock {
            entity: entity.name.to_string(),
            line: entity.line,
        });
        debug!(entity = entity.name, "Unterminated block kept");
        extraction.entities.push(entity);
    } else if let State::InsideEntity(None) = state {
        trace!("Unterminated anonymous block discarded");
    }

    debug!(
        entity_count = extraction.entities.len(),
        relation_lines = extraction.relation_lines.len(),
        defect_count = extraction.defects.len(),
        "Blocks extracted"
    );
    extraction
}

fn step_outside<'a>(line: SourceLine<'a>, extraction: &mut Extraction<'a>) -> State<'a> {
    let text = line.text;

    // Cardinality tokens carry braces, so connectors win
    if has_connector(text) {
        trace!(line = line.number, "Relation candidate");
        extraction.relation_lines.push(line);
        return State::Outside;
    }

    if let Some(open_at) = text.find(BLOCK_OPEN) {
        return open_block(line, open_at, extraction);
    }

    if text.contains(BLOCK_CLOSE) {
        extraction
            .defects
            .push(BlockDefect::UnmatchedClose { line: line.number });
        debug!(line = line.number, "Unmatched closing brace");
        return State::Outside;
    }

    trace!(line = line.number, text, "Ignored line outside block");
    State::Outside
}

fn step_inside<'a>(
    mut open: Option<RawEntity<'a>>,
    line: SourceLine<'a>,
    extraction: &mut Extraction<'a>,
) -> State<'a> {
    let text = line.text;

    if !has_connector(text) {
        if let Some(open_at) = text.find(BLOCK_OPEN) {
            let entity = open.as_ref().map_or("", |e| e.name).to_string();
            extraction.defects.push(BlockDefect::NestedBlock {
                entity,
                line: line.number,
            });
            close_block(open, extraction);
            return open_block(line, open_at, extraction);
        }

        if let Some(close_at) = text.find(BLOCK_CLOSE) {
            // `int id }` keeps its field, as `A { int id }` does
            push_inner(open.as_mut(), line.number, &text[..close_at]);
            close_block(open, extraction);
            return State::Outside;
        }
    }

    if let Some(entity) = open.as_mut() {
        entity.field_lines.push(line);
    }
    State::InsideEntity(open)
}

fn open_block<'a>(
    line: SourceLine<'a>,
    open_at: usize,
    extraction: &mut Extraction<'a>,
) -> State<'a> {
    let name = line.text[..open_at].trim();
    let rest = &line.text[open_at + BLOCK_OPEN.len_utf8()..];

    let mut open = if name.is_empty() {
        extraction
            .defects
            .push(BlockDefect::UnnamedEntity { line: line.number });
        debug!(line = line.number, "Block without entity name");
        None
    } else {
        trace!(line = line.number, entity = name, "Block opened");
        Some(RawEntity {
            name,
            line: line.number,
            field_lines: Vec::new(),
        })
    };

    // `A { int id }` opens and closes on one line
    if let Some(close_at) = rest.find(BLOCK_CLOSE) {
        push_inner(open.as_mut(), line.number, &rest[..close_at]);
        close_block(open, extraction);
        return State::Outside;
    }

    State::InsideEntity(open)
}

/// Keep the text beside a closing brace as a field line
fn push_inner<'a>(open: Option<&mut RawEntity<'a>>, number: usize, inner: &'a str) {
    let inner = inner.trim();
    if let Some(entity) = open {
        if !inner.is_empty() {
            entity.field_lines.push(SourceLine::new(number, inner));
        }
    }
}

fn close_block<'a>(open: Option<RawEntity<'a>>, extraction: &mut Extraction<'a>) {
    if let Some(entity) = open {
        trace!(entity = entity.name, fields = entity.field_lines.len(), "Block closed");
        extraction.entities.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::er::preprocess::preprocess;

    fn extract(input: &str) -> Extraction<'_> {
        extract_blocks(&preprocess(input))
    }

    fn field_texts<'a>(entity: &RawEntity<'a>) -> Vec<&'a str> {
        entity.field_lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_single_block() {
        let result = extract("erDiagram\nUSER {\n  int id PK\n  string name\n}\n");
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].name, "USER");
        assert_eq!(result.entities[0].line, 2);
        assert_eq!(field_texts(&result.entities[0]), vec!["int id PK", "string name"]);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn test_relation_lines_outside_blocks() {
        let result = extract("A {\n}\nA ||--o{ B : has\nB }|..|| C\njust words\n");
        let relations: Vec<_> = result.relation_lines.iter().map(|l| l.text).collect();
        assert_eq!(relations, vec!["A ||--o{ B : has", "B }|..|| C"]);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn test_one_line_block() {
        let result = extract("A { }\nB { int id }");
        assert_eq!(result.entities.len(), 2);
        assert!(result.entities[0].field_lines.is_empty());
        assert_eq!(field_texts(&result.entities[1]), vec!["int id"]);
    }

    #[test]
    fn test_field_on_closing_line() {
        let result = extract("A {\n  int id\n  string name }\nB {\n  int id\n}\n");
        assert_eq!(field_texts(&result.entities[0]), vec!["int id", "string name"]);
        assert_eq!(result.entities[0].field_lines[1].number, 3);
        assert_eq!(field_texts(&result.entities[1]), vec!["int id"]);
        assert!(result.defects.is_empty());

        // Text after the brace is dropped
        let result = extract("A {\n  int id } trailing\n");
        assert_eq!(field_texts(&result.entities[0]), vec!["int id"]);
    }

    #[test]
    fn test_unterminated_block_is_kept() {
        let result = extract("A {\n  int id\n");
        assert_eq!(result.entities.len(), 1);
        assert_eq!(field_texts(&result.entities[0]), vec!["int id"]);
        assert_eq!(
            result.defects,
            vec![BlockDefect::UnterminatedBlock {
                entity: "A".to_string(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_unmatched_close() {
        let result = extract("A {\n}\n}\n");
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.defects, vec![BlockDefect::UnmatchedClose { line: 3 }]);
    }

    #[test]
    fn test_nested_block_closes_previous() {
        let result = extract("A {\n  int id\nB {\n  int id\n}\n");
        let names: Vec<_> = result.entities.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            result.defects,
            vec![BlockDefect::NestedBlock {
                entity: "A".to_string(),
                line: 3
            }]
        );
    }

    #[test]
    fn test_unnamed_block_is_consumed() {
        let result = extract("{\n  int id\n}\nB {\n}\n");
        let names: Vec<_> = result.entities.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["B"]);
        assert_eq!(result.defects, vec![BlockDefect::UnnamedEntity { line: 1 }]);
    }

    #[test]
    fn test_connector_inside_block_stays_in_block() {
        let result = extract("A {\n  A ||--o{ B\n  int id\n}\n");
        assert!(result.relation_lines.is_empty());
        assert_eq!(field_texts(&result.entities[0]), vec!["A ||--o{ B", "int id"]);
    }
}
