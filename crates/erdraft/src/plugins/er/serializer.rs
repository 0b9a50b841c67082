//! Canonical Mermaid serializer
//!
//! Writes a graph back out as `erDiagram` text that parses to the same graph.

use std::fmt::Write;

use super::database::{Entity, Field, Graph, Relation};
use super::preprocess::ER_KEYWORD;

const INDENT: &str = "    ";

/// Serialize a graph to canonical Mermaid ER text
pub fn to_mermaid(graph: &Graph) -> String {
    let mut output = String::new();
    output.push_str(ER_KEYWORD);
    output.push('\n');

    for entity in &graph.entities {
        write_entity(&mut output, entity);
    }
    for relation in &graph.relations {
        write_relation(&mut output, relation);
    }

    output
}

fn write_entity(output: &mut String, entity: &Entity) {
    let _ = writeln!(output, "{INDENT}{} {{", entity.name);
    for field in &entity.fields {
        output.push_str(INDENT);
        output.push_str(INDENT);
        output.push_str(&field_text(field));
        output.push('\n');
    }
    let _ = writeln!(output, "{INDENT}}}");
}

fn field_text(field: &Field) -> String {
    let mut parts = Vec::with_capacity(3 + field.constraints.len());
    parts.push(match &field.size {
        Some(size) => format!("{}({})", field.ty, size),
        None => field.ty.clone(),
    });
    parts.push(field.name.clone());
    if field.is_primary_key {
        parts.push("PK".to_string());
    }
    if field.is_foreign_key {
        parts.push("FK".to_string());
    }
    parts.extend(field.constraints.iter().map(|c| c.keyword().to_string()));
    parts.join(" ")
}

fn write_relation(output: &mut String, relation: &Relation) {
    let _ = write!(
        output,
        "{INDENT}{} {} {}",
        relation.from,
        relation.cardinality.notation(),
        relation.to
    );
    match &relation.label {
        // A quoted label cannot hold `"`, and the parser only produces such
        // labels from bare text, which is already trimmed
        Some(label) if label.contains('"') => {
            let _ = write!(output, " : {label}");
        }
        Some(label) => {
            let _ = write!(output, " : \"{label}\"");
        }
        None => {}
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::er::database::{Cardinality, Constraint, LineStyle, Multiplicity};
    use crate::plugins::er::ErParser;

    #[test]
    fn test_empty_graph() {
        assert_eq!(to_mermaid(&Graph::new()), "erDiagram\n");
    }

    #[test]
    fn test_canonical_text() {
        let mut graph = Graph::new();
        graph.add_entity(
            Entity::new("PRODUCT")
                .with_field(Field::new("int", "id").primary_key())
                .with_field(
                    Field::new("decimal", "price")
                        .with_size("10,2")
                        .with_constraint(Constraint::NotNull),
                ),
        );
        graph.add_relation(
            Relation::new(
                "PRODUCT",
                "LINE_ITEM",
                Cardinality::new(
                    Multiplicity::ZeroOrMany,
                    Multiplicity::ZeroOrOne,
                    LineStyle::NonIdentifying,
                ),
            )
            .with_label("listed in"),
        );

        let expected = "erDiagram\n    PRODUCT {\n        int id PK\n        decimal(10,2) price NOT NULL\n    }\n    PRODUCT }o..o| LINE_ITEM : \"listed in\"\n";
        assert_eq!(to_mermaid(&graph), expected);
    }

    #[test]
    fn test_reparses_to_same_graph() {
        let input = "erDiagram\nA {\n  int id PK, FK\n  varchar(32) code UNIQUE INDEX\n}\nB {\n}\nA |o--|{ B : owns\nB ||..|| A\n";
        let parser = ErParser::new();
        let graph = parser.parse_graph(input).unwrap();
        let reparsed = parser.parse_graph(&to_mermaid(&graph)).unwrap();
        assert_eq!(graph, reparsed);
    }

    #[test]
    fn test_label_with_quotes_is_written_bare() {
        let parser = ErParser::new();
        let graph = parser
            .parse_graph("erDiagram\nA {\n}\nB {\n}\nA ||--o{ B : say \"hi\"\n")
            .unwrap();
        assert_eq!(graph.relations[0].label.as_deref(), Some("say \"hi\""));

        let text = to_mermaid(&graph);
        assert!(text.ends_with("    A ||--o{ B : say \"hi\"\n"), "{text}");
        assert_eq!(parser.parse_graph(&text).unwrap(), graph);
    }
}
