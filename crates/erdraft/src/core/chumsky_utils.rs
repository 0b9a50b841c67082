//! Shared chumsky parser utilities for line grammars
//!
//! Every ER grammar works on a single preprocessed line, so these helpers never
//! consume newlines.

use chumsky::prelude::*;

/// Parser extras used by all line grammars: rich errors for diagnostics
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Words that can never be used as a type or field name
pub const RESERVED_WORDS: &[&str] = &[
    "PK", "FK", "NOT", "NULL", "UNIQUE", "DEFAULT", "CHECK", "INDEX",
];

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone
{
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a word token: a letter or underscore followed by letters, digits or
/// underscores.
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
}

/// Parse an identifier: a [`word`] that is not one of [`RESERVED_WORDS`].
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    word()
        .filter(|s: &&str| !RESERVED_WORDS.contains(s))
        .map(|s: &str| s.to_string())
}

/// Parse a keyword that must not run into the next word character.
pub fn keyword<'src>(
    kw: &'static str,
) -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    word().filter(move |s: &&str| *s == kw)
}

/// Render chumsky errors as one human-readable line
pub fn describe_errors(errors: &[Rich<'_, char>]) -> String {
    errors
        .iter()
        .map(|e| format!("{} at column {}", e.reason(), e.span().start + 1))
        .collect::<Vec<_>>()
        .join("; ")
}
