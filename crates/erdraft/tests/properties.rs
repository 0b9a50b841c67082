//! Property tests for the parse, layout and serialize stages

use erdraft::prelude::*;
use erdraft::plugins::er::Constraint;
use proptest::prelude::*;

// -- Strategy helpers --

fn arb_entity_name() -> impl Strategy<Value = String> {
    "E_[A-Z0-9]{0,6}"
}

fn arb_multiplicity() -> impl Strategy<Value = Multiplicity> {
    prop::sample::select(Multiplicity::ALL.to_vec())
}

fn arb_line_style() -> impl Strategy<Value = LineStyle> {
    prop_oneof![Just(LineStyle::Identifying), Just(LineStyle::NonIdentifying)]
}

fn arb_field() -> impl Strategy<Value = Field> {
    (
        "[a-z]{1,8}",
        "[a-z][a-z0-9_]{0,8}",
        proptest::option::of("[1-9][0-9]{0,2}(,[0-9]{1,2})?"),
        any::<bool>(),
        any::<bool>(),
        prop::sample::subsequence(
            vec![
                Constraint::NotNull,
                Constraint::Unique,
                Constraint::Default,
                Constraint::Check,
                Constraint::Index,
            ],
            0..=5,
        ),
    )
        .prop_map(|(ty, name, size, pk, fk, constraints)| {
            let mut field = Field::new(ty, name);
            field.size = size;
            field.is_primary_key = pk;
            field.is_foreign_key = fk;
            field.constraints = constraints;
            field
        })
}

fn arb_entity() -> impl Strategy<Value = Entity> {
    (arb_entity_name(), prop::collection::vec(arb_field(), 0..6)).prop_map(|(name, fields)| {
        let mut entity = Entity::new(name);
        entity.fields = fields;
        entity
    })
}

/// Plain labels, plus labels carrying quotes that only bare text can hold
fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,5}( [a-z]{1,5})?",
        "[a-z]{1,5} \"[a-z]{1,5}\"( [a-z]{1,5})?",
    ]
}

fn arb_relation(names: Vec<String>) -> impl Strategy<Value = Relation> {
    (
        prop::sample::select(names.clone()),
        prop::sample::select(names),
        arb_multiplicity(),
        arb_multiplicity(),
        arb_line_style(),
        proptest::option::of(arb_label()),
    )
        .prop_map(|(from, to, left, right, line, label)| {
            let relation = Relation::new(from, to, Cardinality::new(left, right, line));
            match label {
                Some(label) => relation.with_label(label),
                None => relation,
            }
        })
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    prop::collection::vec(arb_entity(), 1..6).prop_flat_map(|entities| {
        let names: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();
        prop::collection::vec(arb_relation(names), 0..6).prop_map(move |relations| Graph {
            entities: entities.clone(),
            relations,
        })
    })
}

/// Lines that mix valid syntax with junk
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("erDiagram".to_string()),
        Just("}".to_string()),
        Just("%% comment".to_string()),
        arb_entity_name().prop_map(|name| format!("{name} {{")),
        "[a-z]{1,6} [a-z]{1,6}( PK)?",
        "E_[A-C] [|}o]{2}(--|\\.\\.)[|{o]{2} E_[A-C]( : [a-z]{1,4})?",
        "\\PC{0,24}",
    ]
}

proptest! {
    #[test]
    fn parse_is_idempotent(lines in prop::collection::vec(arb_line(), 0..24)) {
        let text = lines.join("\n");
        let first = erdraft::parse(&text).unwrap();
        let second = erdraft::parse(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn validate_never_panics(text in "\\PC{0,200}") {
        let _ = validate(&text);
        let _ = validate_strict(&text);
    }

    #[test]
    fn fields_keep_declaration_order(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 0..12)) {
        let mut text = String::from("erDiagram\nT {\n");
        for name in &names {
            text.push_str(&format!("  int {name}\n"));
        }
        text.push_str("}\n");

        let graph = erdraft::parse(&text).unwrap();
        let parsed: Vec<&str> = graph.entities[0].fields.iter().map(|f| f.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn layout_is_deterministic(graph in arb_graph(), width in proptest::option::of(0u32..2000)) {
        prop_assert_eq!(erdraft::layout(&graph, width), erdraft::layout(&graph, width));
    }

    #[test]
    fn entities_never_overlap(graph in arb_graph(), width in proptest::option::of(0u32..2000)) {
        let layout = erdraft::layout(&graph, width);
        prop_assert_eq!(layout.entities.len(), graph.entities.len());
        for (i, a) in layout.entities.iter().enumerate() {
            for b in &layout.entities[i + 1..] {
                prop_assert!(!a.bounds.intersects(&b.bounds), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn serializer_round_trips(graph in arb_graph()) {
        let text = to_mermaid(&graph);
        let reparsed = erdraft::parse(&text).unwrap();
        prop_assert_eq!(reparsed, graph);
    }
}
