//! Box and connector characters for the terminal preview
//!
//! Both tables come in an ASCII and a Unicode flavour selected by
//! [`CharacterSet`].

use super::CharacterSet;

/// Box drawing characters for entity outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// T-junction pointing right (left end of the header separator)
    pub t_right: char,
    /// T-junction pointing left (right end of the header separator)
    pub t_left: char,
}

impl BoxChars {
    pub fn for_style(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self::unicode(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            t_right: '+',
            t_left: '+',
        }
    }

    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            t_right: '├',
            t_left: '┤',
        }
    }

    /// True for characters that belong to a box edge junction and must
    /// survive later edge drawing.
    pub fn is_junction(&self, c: char) -> bool {
        c == self.t_right || c == self.t_left
    }

    /// Corner character joining the two given directions of travel
    pub fn corner(&self, left: bool, right: bool, up: bool, down: bool) -> char {
        match (left, right, up, down) {
            (false, true, false, true) => self.top_left,
            (true, false, false, true) => self.top_right,
            (false, true, true, false) => self.bottom_left,
            (true, false, true, false) => self.bottom_right,
            (_, _, true, _) | (_, _, _, true) => self.vertical,
            _ => self.horizontal,
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Line characters for relation connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorChars {
    pub horizontal: char,
    pub vertical: char,
    pub horizontal_dashed: char,
    pub vertical_dashed: char,
    pub corners: BoxChars,
}

impl ConnectorChars {
    pub fn for_style(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self {
                horizontal: '-',
                vertical: '|',
                horizontal_dashed: '.',
                vertical_dashed: ':',
                corners: BoxChars::ascii(),
            },
            CharacterSet::Unicode => Self {
                horizontal: '─',
                vertical: '│',
                horizontal_dashed: '╌',
                vertical_dashed: '╎',
                corners: BoxChars::unicode(),
            },
        }
    }

    pub fn horizontal(&self, dashed: bool) -> char {
        if dashed {
            self.horizontal_dashed
        } else {
            self.horizontal
        }
    }

    pub fn vertical(&self, dashed: bool) -> char {
        if dashed {
            self.vertical_dashed
        } else {
            self.vertical
        }
    }
}

impl Default for ConnectorChars {
    fn default() -> Self {
        Self::for_style(CharacterSet::Unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_chars_ascii() {
        let chars = BoxChars::for_style(CharacterSet::Ascii);
        assert_eq!(chars.top_left, '+');
        assert_eq!(chars.horizontal, '-');
    }

    #[test]
    fn test_box_chars_unicode() {
        let chars = BoxChars::for_style(CharacterSet::Unicode);
        assert_eq!(chars.top_left, '┌');
        assert_eq!(chars.t_right, '├');
        assert!(chars.is_junction('┤'));
        assert!(!chars.is_junction('│'));
    }

    #[test]
    fn test_corner_selection() {
        let chars = BoxChars::unicode();
        // Travelling right then turning down joins left and down
        assert_eq!(chars.corner(true, false, false, true), '┐');
        assert_eq!(chars.corner(false, true, true, false), '└');
        assert_eq!(chars.corner(true, false, true, false), '┘');
        assert_eq!(chars.corner(false, true, false, true), '┌');
    }

    #[test]
    fn test_connector_dashes() {
        let ascii = ConnectorChars::for_style(CharacterSet::Ascii);
        assert_eq!(ascii.horizontal(false), '-');
        assert_eq!(ascii.horizontal(true), '.');
        let unicode = ConnectorChars::default();
        assert_eq!(unicode.vertical(true), '╎');
    }
}
