//! Relation line grammar
//!
//! ```text
//! relation  := FROM WS? card connector card WS? TO (WS? ':' WS? label)? WS?
//! card      := one of the two-character tokens in `Multiplicity::TOKENS`
//! connector := '--' | '..'
//! label     := '"' [^"]* '"' | rest-of-line
//! ```

use chumsky::prelude::*;

use super::database::{Cardinality, LineStyle, Multiplicity, Relation};
use crate::core::chumsky_utils::{describe_errors, inline_whitespace, word, Extra};
use crate::core::DiagramError;

fn multiplicity<'src>() -> impl Parser<'src, &'src str, Multiplicity, Extra<'src>> + Clone {
    any()
        .then(any())
        .to_slice()
        .try_map(|token: &str, span| {
            Multiplicity::from_token(token)
                .ok_or_else(|| Rich::custom(span, format!("unknown cardinality '{token}'")))
        })
}

fn connector<'src>() -> impl Parser<'src, &'src str, LineStyle, Extra<'src>> + Clone {
    just("--")
        .to(LineStyle::Identifying)
        .or(just("..").to(LineStyle::NonIdentifying))
}

fn label<'src>() -> impl Parser<'src, &'src str, Option<String>, Extra<'src>> + Clone {
    let quoted = none_of('"')
        .repeated()
        .to_slice()
        .delimited_by(just('"'), just('"'))
        .then_ignore(inline_whitespace())
        .then_ignore(end());

    // Anything else up to the end of the line, unquoted
    let bare = any().repeated().to_slice().map(str::trim);

    inline_whitespace()
        .then(just(':'))
        .then(inline_whitespace())
        .ignore_then(quoted.or(bare))
        .map(|text: &str| (!text.is_empty()).then(|| text.to_string()))
}

/// Entity names are taken literally, so field keywords such as `INDEX` are
/// valid endpoints here.
fn entity_name<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    word().map(str::to_string)
}

fn relation_line<'src>() -> impl Parser<'src, &'src str, Relation, Extra<'src>> + Clone {
    let cardinality = multiplicity()
        .then(connector())
        .then(multiplicity())
        .map(|((from, line), to)| Cardinality::new(from, to, line));

    entity_name()
        .then_ignore(inline_whitespace())
        .then(cardinality)
        .then_ignore(inline_whitespace())
        .then(entity_name())
        .then(label().or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(|(((from, cardinality), to), label)| Relation {
            from,
            to,
            cardinality,
            label: label.flatten(),
        })
}

/// Parse one trimmed relation line, or `None` if it does not match end to end
pub fn parse_relation_line(text: &str) -> Option<Relation> {
    relation_line().parse(text).into_result().ok()
}

/// Parse one relation line, reporting why it was rejected
pub fn try_parse_relation_line(text: &str, line: usize) -> Result<Relation, DiagramError> {
    relation_line()
        .parse(text)
        .into_result()
        .map_err(|errors| DiagramError::parse_error(describe_errors(&errors), line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_label() {
        let relation = parse_relation_line(r#"CUSTOMER ||--o{ ORDER : "places""#).unwrap();
        assert_eq!(relation.from, "CUSTOMER");
        assert_eq!(relation.to, "ORDER");
        assert_eq!(relation.cardinality.from, Multiplicity::ExactlyOne);
        assert_eq!(relation.cardinality.to, Multiplicity::ZeroOrMany);
        assert_eq!(relation.cardinality.line, LineStyle::Identifying);
        assert_eq!(relation.label.as_deref(), Some("places"));
    }

    #[test]
    fn test_label_kept_verbatim_between_quotes() {
        let relation = parse_relation_line(r#"A ||--|| B : "  has : many ""#).unwrap();
        assert_eq!(relation.label.as_deref(), Some("  has : many "));
    }

    #[test]
    fn test_bare_label() {
        let relation = parse_relation_line("A }|..|| B : belongs to  ").unwrap();
        assert_eq!(relation.label.as_deref(), Some("belongs to"));
        assert_eq!(relation.cardinality.line, LineStyle::NonIdentifying);
        assert_eq!(relation.cardinality.from, Multiplicity::OneOrMany);
    }

    #[test]
    fn test_missing_or_empty_label() {
        assert_eq!(parse_relation_line("A ||--o{ B").unwrap().label, None);
        assert_eq!(parse_relation_line("A ||--o{ B :").unwrap().label, None);
        assert_eq!(parse_relation_line(r#"A ||--o{ B : """#).unwrap().label, None);
    }

    #[test]
    fn test_whitespace_around_cluster_is_optional() {
        let relation = parse_relation_line("A||--o{B").unwrap();
        assert_eq!(relation.from, "A");
        assert_eq!(relation.to, "B");
    }

    #[test]
    fn test_mirrored_tokens_on_either_side() {
        let relation = parse_relation_line("A o{--}o B").unwrap();
        assert_eq!(relation.cardinality.from, Multiplicity::ZeroOrMany);
        assert_eq!(relation.cardinality.to, Multiplicity::ZeroOrMany);
    }

    #[test]
    fn test_keyword_named_entities() {
        let relation = parse_relation_line("INDEX ||--o{ CHECK : uses").unwrap();
        assert_eq!(relation.from, "INDEX");
        assert_eq!(relation.to, "CHECK");

        let relation = parse_relation_line("DEFAULT }|..|| NULL").unwrap();
        assert_eq!(relation.from, "DEFAULT");
        assert_eq!(relation.to, "NULL");
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(parse_relation_line("A --> B").is_none());
        assert!(parse_relation_line("A ||-o{ B").is_none());
        assert!(parse_relation_line("A ||--o{").is_none());
        assert!(parse_relation_line("||--o{ B").is_none());
        assert!(parse_relation_line("A xx--o{ B").is_none());
        assert!(parse_relation_line("A ||--o{ B extra").is_none());
    }

    #[test]
    fn test_try_parse_reports_reason() {
        let error = try_parse_relation_line("A xx--o{ B", 4).unwrap_err();
        assert!(error.to_string().contains("line 4"));
    }
}
