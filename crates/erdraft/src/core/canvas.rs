//! Character grid used by the terminal preview backend

use super::box_drawing::BoxChars;
use super::text::{char_cells, display_width};

/// Placeholder for the cell covered by the right half of a wide glyph
const WIDE_TAIL: char = '\0';

/// Growable character grid
///
/// Writes outside the current bounds grow the grid instead of failing, so
/// callers never need to size it up front. A wide glyph takes two cells, the
/// second holding a placeholder that is skipped on output.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<char>>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![' '; width.max(1)]; height.max(1)],
        }
    }

    /// Grow the grid to at least `min_width` x `min_height`
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, ' ');
            }
            self.width = min_width;
        }
        while self.grid.len() < min_height {
            self.grid.push(vec![' '; self.width.max(1)]);
        }
        self.height = self.height.max(min_height);
    }

    pub fn set_char(&mut self, x: usize, y: usize, c: char) {
        self.ensure_size(x + 1, y + 1);
        self.grid[y][x] = c;
    }

    pub fn get_char(&self, x: usize, y: usize) -> char {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(' ')
    }

    /// Left-aligned text starting at `x`
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        let mut column = x;
        for c in text.chars() {
            let cells = char_cells(c);
            self.set_char(column, y, c);
            for tail in 1..cells {
                self.set_char(column + tail, y, WIDE_TAIL);
            }
            column += cells;
        }
    }

    /// Text centered on column `center_x`
    pub fn draw_text_centered(&mut self, center_x: usize, y: usize, text: &str) {
        let start_x = center_x.saturating_sub(display_width(text) / 2);
        self.draw_text(start_x, y, text);
    }

    pub fn draw_horizontal_line(&mut self, x: usize, y: usize, length: usize, c: char) {
        for i in 0..length {
            self.set_char(x + i, y, c);
        }
    }

    /// Outline a box whose corners sit on the given inclusive cells.
    ///
    /// Junction characters already on the vertical edges are kept, so a
    /// separator may be drawn before its surrounding box.
    pub fn draw_box(&mut self, left: usize, top: usize, right: usize, bottom: usize, chars: &BoxChars) {
        if right <= left || bottom <= top {
            return;
        }
        self.draw_horizontal_line(left + 1, top, right - left - 1, chars.horizontal);
        self.draw_horizontal_line(left + 1, bottom, right - left - 1, chars.horizontal);
        for y in top + 1..bottom {
            for x in [left, right] {
                if !chars.is_junction(self.get_char(x, y)) {
                    self.set_char(x, y, chars.vertical);
                }
            }
        }
        self.set_char(left, top, chars.top_left);
        self.set_char(right, top, chars.top_right);
        self.set_char(left, bottom, chars.bottom_left);
        self.set_char(right, bottom, chars.bottom_right);
    }

    /// Horizontal separator from `left` to `right` with T-junction ends
    pub fn draw_separator(&mut self, left: usize, right: usize, y: usize, chars: &BoxChars) {
        if right <= left {
            return;
        }
        self.set_char(left, y, chars.t_right);
        self.draw_horizontal_line(left + 1, y, right - left - 1, chars.horizontal);
        self.set_char(right, y, chars.t_left);
    }
}

impl std::fmt::Display for AsciiCanvas {
    /// Trailing spaces, blank border rows and common indentation are removed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|c| **c != WIDE_TAIL)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();

        let first = rows.iter().position(|row| !row.is_empty());
        let last = rows.iter().rposition(|row| !row.is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Ok(());
        };
        let rows = &rows[first..=last];

        let indent = rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().take_while(|c| *c == ' ').count())
            .min()
            .unwrap_or(0);

        let trimmed: Vec<String> = rows
            .iter()
            .map(|row| row.chars().skip(indent).collect())
            .collect();
        write!(f, "{}", trimmed.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas() {
        let canvas = AsciiCanvas::new(10, 5);
        assert_eq!(canvas.width, 10);
        assert_eq!(canvas.height, 5);
    }

    #[test]
    fn test_set_and_get_char() {
        let mut canvas = AsciiCanvas::new(10, 10);
        canvas.set_char(5, 3, 'X');
        assert_eq!(canvas.get_char(5, 3), 'X');
        assert_eq!(canvas.get_char(0, 0), ' ');
        assert_eq!(canvas.get_char(50, 50), ' ');
    }

    #[test]
    fn test_auto_expand() {
        let mut canvas = AsciiCanvas::new(5, 5);
        canvas.set_char(10, 10, 'X');
        assert!(canvas.width >= 11);
        assert!(canvas.height >= 11);
        assert_eq!(canvas.get_char(10, 10), 'X');
    }

    #[test]
    fn test_draw_text_centered() {
        let mut canvas = AsciiCanvas::new(20, 5);
        canvas.draw_text_centered(10, 1, "Hi");
        assert_eq!(canvas.get_char(9, 1), 'H');
        assert_eq!(canvas.get_char(10, 1), 'i');
    }

    #[test]
    fn test_draw_box_keeps_separator() {
        let chars = BoxChars::unicode();
        let mut canvas = AsciiCanvas::new(1, 1);
        canvas.draw_separator(0, 6, 2, &chars);
        canvas.draw_box(0, 0, 6, 4, &chars);
        canvas.draw_text(2, 1, "AB");

        let expected = "┌─────┐\n│ AB  │\n├─────┤\n│     │\n└─────┘";
        assert_eq!(canvas.to_string(), expected);
    }

    #[test]
    fn test_wide_text_takes_two_cells() {
        let chars = BoxChars::ascii();
        let mut canvas = AsciiCanvas::new(1, 1);
        canvas.draw_box(0, 0, 7, 2, &chars);
        canvas.draw_text(2, 1, "名前");
        assert_eq!(canvas.get_char(4, 1), '前');
        assert_eq!(canvas.get_char(6, 1), ' ');

        let rows: Vec<String> = canvas.to_string().lines().map(str::to_string).collect();
        assert_eq!(rows[1], "| 名前 |");
        assert!(rows.iter().all(|row| display_width(row) == 8));
    }

    #[test]
    fn test_display_trims_whitespace() {
        let mut canvas = AsciiCanvas::new(20, 10);
        canvas.draw_text(5, 3, "Test");
        assert_eq!(canvas.to_string(), "Test");
    }

    #[test]
    fn test_empty_canvas_displays_nothing() {
        assert_eq!(AsciiCanvas::new(4, 4).to_string(), "");
    }
}
