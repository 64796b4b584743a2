//! 1-based (line, column) tracking, updated once per grapheme cluster
//! surrendered to the consumer.

use crate::charstream::grapheme::Grapheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: u64,
    pub column: u64,
}

impl Position {
    pub fn start() -> Position {
        Position { line: 1, column: 1 }
    }

    /// Apply the position-update rule for a single surrendered cluster.
    /// `tab_width` must be `>= 1` (enforced by [`crate::charstream::config::StreamConfig`]).
    pub(crate) fn advance(&mut self, g: Grapheme, tab_width: u32) {
        match g {
            Grapheme::Crlf | Grapheme::Single('\n') | Grapheme::Single('\r') => {
                self.line += 1;
                self.column = 1;
            }
            Grapheme::Single('\t') => {
                let base = self.column - 1;
                let width = tab_width as u64;
                let rounded = if base % width == 0 { base } else { (base / width + 1) * width };
                self.column = rounded + 1;
            }
            Grapheme::Single(_) => {
                self.column += 1;
            }
        }
    }
}
