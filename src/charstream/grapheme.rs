//! Grapheme-cluster coalescing: a lone code unit is its own cluster, but a
//! CR immediately followed by LF is coalesced into a single `"\r\n"`
//! cluster (spec's only multi-code-point cluster). A CR at the very end of
//! a decoded chunk is held back ("hanging CR") until the next chunk's
//! first code unit is known, so the boundary between two producer reads
//! never leaks a split CRLF to the consumer.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grapheme {
    Single(char),
    Crlf,
}

impl Grapheme {
    pub fn write_to(&self, out: &mut String) {
        match self {
            Grapheme::Crlf => out.push_str("\r\n"),
            Grapheme::Single(c) => out.push(*c),
        }
    }
}

impl fmt::Display for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grapheme::Crlf => write!(f, "\r\n"),
            Grapheme::Single(c) => write!(f, "{}", c),
        }
    }
}

/// Coalesces a sequence of decoded `char`s into [`Grapheme`]s, carrying a
/// hanging CR across calls to [`Coalescer::push`].
#[derive(Default)]
pub(crate) struct Coalescer {
    hanging_cr: bool,
}

impl Coalescer {
    pub(crate) fn new() -> Coalescer {
        Coalescer { hanging_cr: false }
    }

    /// Consume one chunk's worth of decoded code units, appending completed
    /// graphemes to `out`. A trailing CR is remembered rather than emitted.
    pub(crate) fn push(&mut self, chars: &[char], out: &mut Vec<Grapheme>) {
        let mut iter = chars.iter().copied().peekable();
        if self.hanging_cr {
            match iter.peek() {
                Some('\n') => {
                    iter.next();
                    out.push(Grapheme::Crlf);
                }
                _ => out.push(Grapheme::Single('\r')),
            }
            self.hanging_cr = false;
        }
        while let Some(c) = iter.next() {
            if c == '\r' {
                match iter.peek() {
                    Some('\n') => {
                        iter.next();
                        out.push(Grapheme::Crlf);
                    }
                    Some(_) => out.push(Grapheme::Single('\r')),
                    None => self.hanging_cr = true,
                }
            } else {
                out.push(Grapheme::Single(c));
            }
        }
    }

    /// Called once the source and transducer are fully drained. A hanging
    /// CR with no following LF becomes a standalone `"\r"`.
    pub(crate) fn finish(&mut self, out: &mut Vec<Grapheme>) {
        if self.hanging_cr {
            out.push(Grapheme::Single('\r'));
            self.hanging_cr = false;
        }
    }
}
