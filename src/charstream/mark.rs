//! Mark/rewind support. Setting a mark starts recording every grapheme the
//! consumer reads past that point; resetting replays them instead of
//! re-reading the source, so a mark never requires the producer to keep
//! bytes around once they've been decoded.

use std::collections::VecDeque;

use crate::charstream::grapheme::Grapheme;
use crate::charstream::position::Position;

struct Mark {
    position: Position,
    replay: VecDeque<(Position, Grapheme)>,
}

#[derive(Default)]
pub(crate) struct MarkStack {
    marks: Vec<Mark>,
}

impl MarkStack {
    pub(crate) fn new() -> MarkStack {
        MarkStack { marks: Vec::new() }
    }

    pub(crate) fn depth(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Push a new mark at `position`. Until it is reset, cleared, or
    /// replaced, every grapheme surrendered to the consumer is also
    /// recorded against it (and every mark below it, via [`MarkStack::record`]).
    pub(crate) fn set(&mut self, position: Position) {
        self.marks.push(Mark { position, replay: VecDeque::new() });
    }

    /// Record a grapheme the consumer just read, against every active mark.
    pub(crate) fn record(&mut self, position_before: Position, g: Grapheme) {
        for mark in &mut self.marks {
            mark.replay.push_back((position_before, g));
        }
    }

    /// Pop the top mark and hand back its recorded replay queue plus the
    /// position it was set at, so the stream can rewind the consumer's view
    /// without touching the producer.
    pub(crate) fn reset(&mut self) -> Option<(Position, VecDeque<(Position, Grapheme)>)> {
        self.marks.pop().map(|m| (m.position, m.replay))
    }

    /// Discard the top mark without rewinding.
    pub(crate) fn clear(&mut self) -> bool {
        self.marks.pop().is_some()
    }

    /// Discard the top mark and immediately set a fresh one at `position`
    /// (typically the stream's current position), in one step.
    pub(crate) fn update(&mut self, position: Position) -> bool {
        let had = self.marks.pop().is_some();
        self.marks.push(Mark { position, replay: VecDeque::new() });
        had
    }

    /// Reset the top mark, then immediately set a fresh mark at the
    /// position it was reset to, so the same ground can be replayed again.
    pub(crate) fn reset_keep(&mut self) -> Option<(Position, VecDeque<(Position, Grapheme)>)> {
        let popped = self.reset();
        if let Some((position, _)) = &popped {
            self.marks.push(Mark { position: *position, replay: VecDeque::new() });
        }
        popped
    }

    /// Back up the top mark by up to `n` graphemes, returning the graphemes
    /// removed from its tail (to be replayed next, most-recent first is
    /// reversed back into consumption order by the caller) and how many were
    /// actually available.
    pub(crate) fn backup(&mut self, n: usize) -> Vec<(Position, Grapheme)> {
        match self.marks.last_mut() {
            None => Vec::new(),
            Some(mark) => {
                let take = n.min(mark.replay.len());
                let mut backed_up = Vec::with_capacity(take);
                for _ in 0..take {
                    if let Some(entry) = mark.replay.pop_back() {
                        backed_up.push(entry);
                    }
                }
                backed_up.reverse();
                backed_up
            }
        }
    }
}

#[cfg(test)]
#[path = "mark_test.rs"]
mod mark_test;
