//! Terminal colorization for ER previews
//!
//! Applies ANSI escape codes to the terminal preview using crossterm.

use crossterm::style::{Color, Stylize};

/// Characters that make up connector runs, used to spot glyphs next to them
const CONNECTOR_CHARS: &[char] = &['─', '╌', '│', '╎', '-', '.', ':'];

/// Colorize a terminal preview using ANSI escape codes
///
/// - Box-drawing corners, edges and connector runs: Cyan
/// - Cardinality glyphs: Yellow
/// - Entity names and fields: Default (terminal color)
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        let chars: Vec<char> = line.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
            let next = chars.get(i + 1).copied();
            let colored = match c {
                '┌' | '┐' | '└' | '┘' | '├' | '┤' | '┬' | '┴' | '┼' | '─' | '│' | '╌' | '╎' => {
                    c.to_string().with(Color::Cyan).to_string()
                }
                '+' | '-' | '|' | '.' | ':' if is_box_char_context(line, c) => {
                    c.to_string().with(Color::Cyan).to_string()
                }
                '{' | '}' => c.to_string().with(Color::Yellow).to_string(),
                'o' | '^' | 'v' if touches_connector(prev, next) => {
                    c.to_string().with(Color::Yellow).to_string()
                }
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    // Remove trailing newline to match input format
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

fn touches_connector(prev: Option<char>, next: Option<char>) -> bool {
    [prev, next]
        .into_iter()
        .flatten()
        .any(|c| CONNECTOR_CHARS.contains(&c) || c == '|' || c == '{' || c == '}')
}

/// Check if a character is likely part of box drawing vs text content
fn is_box_char_context(line: &str, c: char) -> bool {
    match c {
        '+' => line.contains("+-") || line.contains("-+") || line.contains("+|"),
        '-' => line.contains("---") || line.contains("+-") || line.contains("-+"),
        '.' => line.contains("..."),
        ':' => !line.contains(": "),
        '|' => {
            let trimmed = line.trim_start();
            trimmed.starts_with('|') || trimmed.starts_with('+') || line.contains(" |")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in text.chars() {
            match (in_escape, c) {
                (false, '\x1b') => in_escape = true,
                (true, 'm') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_colorize_preserves_content() {
        let input = "┌────────┐\n│ USER   │\n├────────┤\n│ id: int│\n└────────┘";
        let output = colorize_output(input);

        assert!(output.contains("\x1b["));
        assert_eq!(strip_ansi(&output), input);
    }

    #[test]
    fn test_colorize_glyphs() {
        let input = "┤|──────o{├";
        let output = colorize_output(input);
        assert!(output.contains(&'{'.to_string().with(Color::Yellow).to_string()));
        assert!(output.contains(&'o'.to_string().with(Color::Yellow).to_string()));
        assert_eq!(strip_ansi(&output), input);
    }

    #[test]
    fn test_field_text_is_not_colored() {
        let output = colorize_output("| order_no: int |");
        let plain_o = "order_no";
        assert!(output.contains(plain_o));
    }

    #[test]
    fn test_no_trailing_newline() {
        let output = colorize_output("USER");
        assert!(!output.ends_with('\n'));
    }
}
