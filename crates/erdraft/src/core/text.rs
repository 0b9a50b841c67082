//! Shared text measurement utilities
//!
//! Widths are measured in terminal display columns, so wide glyphs such as
//! CJK characters and emoji count as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in columns.
///
/// # Example
/// ```
/// use erdraft::core::display_width;
///
/// assert_eq!(display_width("id: int"), 7);
/// assert_eq!(display_width("名前"), 4);
/// ```
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Grid cells taken by one character: two for wide glyphs, otherwise one
pub fn char_cells(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0).max(1)
}

/// Widest line among `lines`, in columns. Zero for an empty iterator.
pub fn max_display_width<'a>(lines: impl IntoIterator<Item = &'a str>) -> usize {
    lines.into_iter().map(display_width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width("CUSTOMER"), 8);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_wide_characters() {
        // Japanese characters are typically 2 columns wide
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width("id: int 🔑"), 10);
    }

    #[test]
    fn test_char_cells() {
        assert_eq!(char_cells('a'), 1);
        assert_eq!(char_cells('名'), 2);
        assert_eq!(char_cells('\u{0301}'), 1);
    }

    #[test]
    fn test_max_display_width() {
        assert_eq!(max_display_width(["a", "abc", "ab"]), 3);
        assert_eq!(max_display_width(Vec::<&str>::new()), 0);
    }
}
