//! Line preprocessing
//!
//! Splits raw diagram text into trimmed, meaningful lines. Comments, blank
//! lines and the `erDiagram` keyword line are removed.

use tracing::trace;

/// Keyword that marks ER diagram content
pub const ER_KEYWORD: &str = "erDiagram";

const COMMENT_PREFIX: &str = "%%";

/// A trimmed source line with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// Preprocess raw text into the lines the block extractor consumes.
///
/// `\r\n`, `\n` and a bare `\r` all end a line.
pub fn preprocess(input: &str) -> Vec<SourceLine<'_>> {
    input
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with(COMMENT_PREFIX) || text == ER_KEYWORD {
                return None;
            }
            Some(SourceLine::new(index + 1, text))
        })
        .inspect(|line| trace!(line = line.number, text = line.text, "Kept line"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        preprocess(input).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(preprocess("").is_empty());
        assert!(preprocess("   \n\t\n").is_empty());
    }

    #[test]
    fn test_strips_keyword_comments_and_blanks() {
        let input = "erDiagram\n%% users\n\n  USER {\n    int id PK\n  }\n";
        assert_eq!(texts(input), vec!["USER {", "int id PK", "}"]);
    }

    #[test]
    fn test_keyword_only_removed_on_exact_match() {
        assert_eq!(texts("erDiagram TD"), vec!["erDiagram TD"]);
        assert_eq!(texts("  erDiagram  "), Vec::<&str>::new());
    }

    #[test]
    fn test_comment_must_start_line() {
        assert_eq!(texts("A ||--o{ B %% note"), vec!["A ||--o{ B %% note"]);
        assert!(texts("   %% indented comment").is_empty());
    }

    #[test]
    fn test_line_numbers_follow_source() {
        let windows = preprocess("erDiagram\r\n\r\nA {\r}\r\n");
        assert_eq!(windows, vec![SourceLine::new(3, "A {"), SourceLine::new(4, "}")]);

        let unix = preprocess("erDiagram\n\nA {\n}");
        assert_eq!(unix[0], SourceLine::new(3, "A {"));
        assert_eq!(unix[1], SourceLine::new(4, "}"));
    }
}
