//! Field line grammar
//!
//! ```text
//! field     := TYPE size? WS NAME (sep modifier)*
//! size      := '(' digits (',' digits)* ')'
//! sep       := WS? ',' WS? | WS
//! modifier  := 'PK' | 'FK' | 'NOT' WS 'NULL' | 'UNIQUE' | 'DEFAULT' | 'CHECK' | 'INDEX'
//! ```
//!
//! `TYPE` and `NAME` are identifiers and may not be reserved words, so a
//! line such as `PK id` never yields a field.

use chumsky::prelude::*;

use super::database::{Constraint, Field};
use crate::core::chumsky_utils::{
    describe_errors, identifier, inline_whitespace, inline_whitespace_required, keyword, Extra,
};
use crate::core::DiagramError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    PrimaryKey,
    ForeignKey,
    Constraint(Constraint),
}

fn size<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let digits = any()
        .filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1);

    digits
        .separated_by(just(','))
        .at_least(1)
        .to_slice()
        .delimited_by(just('('), just(')'))
        .map(|s: &str| s.to_string())
}

fn modifier<'src>() -> impl Parser<'src, &'src str, Modifier, Extra<'src>> + Clone {
    choice((
        keyword("PK").to(Modifier::PrimaryKey),
        keyword("FK").to(Modifier::ForeignKey),
        keyword("NOT")
            .then(inline_whitespace_required())
            .then(keyword("NULL"))
            .to(Modifier::Constraint(Constraint::NotNull)),
        keyword("UNIQUE").to(Modifier::Constraint(Constraint::Unique)),
        keyword("DEFAULT").to(Modifier::Constraint(Constraint::Default)),
        keyword("CHECK").to(Modifier::Constraint(Constraint::Check)),
        keyword("INDEX").to(Modifier::Constraint(Constraint::Index)),
    ))
}

fn separator<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    inline_whitespace()
        .then(just(','))
        .then(inline_whitespace())
        .ignored()
        .or(inline_whitespace_required())
}

fn field_line<'src>() -> impl Parser<'src, &'src str, Field, Extra<'src>> + Clone {
    identifier()
        .then(size().or_not())
        .then_ignore(inline_whitespace_required())
        .then(identifier())
        .then(
            separator()
                .ignore_then(modifier())
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(|(((ty, size), name), modifiers)| {
            let mut field = Field::new(ty, name);
            field.size = size;
            for modifier in modifiers {
                match modifier {
                    Modifier::PrimaryKey => field.is_primary_key = true,
                    Modifier::ForeignKey => field.is_foreign_key = true,
                    Modifier::Constraint(c) => field.add_constraint(c),
                }
            }
            field
        })
}

/// Parse one trimmed field line, or `None` if it does not match end to end
pub fn parse_field_line(text: &str) -> Option<Field> {
    field_line().parse(text).into_result().ok()
}

/// Parse one field line, reporting why it was rejected
pub fn try_parse_field_line(text: &str, line: usize) -> Result<Field, DiagramError> {
    field_line()
        .parse(text)
        .into_result()
        .map_err(|errors| DiagramError::parse_error(describe_errors(&errors), line))
}
