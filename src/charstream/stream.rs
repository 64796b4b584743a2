//! The public streaming character decoder: a consumer-facing handle over a
//! background producer thread, bounded buffer, and mark/rewind support.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::charstream::config::StreamConfig;
use crate::charstream::grapheme::Grapheme;
use crate::charstream::mark::MarkStack;
use crate::charstream::position::Position;
use crate::charstream::producer;
use crate::charstream::shared::Inner;
use crate::charstream::source::ByteSource;
use crate::charstream::transducer::{Transducer, TransducerOption, Utf8Transducer};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    NotOpen,
    Open,
    Closed,
    Error,
    AtEnd,
}

/// A pull-based, decoded character stream backed by a background producer
/// thread. Not `Clone`: there is exactly one consumer per stream.
pub struct DecodingCharStream {
    inner: Arc<Inner>,
    producer_thread: Option<JoinHandle<()>>,
    position: Position,
    tab_width: u32,
    mark_stack: MarkStack,
    closed: bool,
    /// Queued for replay after a `backup`; consumed before the shared
    /// buffer is touched again.
    pushback: VecDeque<(Position, Grapheme)>,
}

impl DecodingCharStream {
    /// Opens a stream over `source`, decoding with a transducer built by
    /// `build_transducer` on the producer thread (see [`producer::run`]
    /// for why construction happens there rather than here).
    pub fn open<S, T, F>(source: S, build_transducer: F, config: StreamConfig) -> DecodingCharStream
    where
        S: ByteSource + 'static,
        T: Transducer + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let inner = Arc::new(Inner::new(config.get_read_ahead_high_water()));
        let thread_inner = Arc::clone(&inner);
        let byte_chunk_size = config.get_byte_chunk_size();
        let auto_close = config.get_auto_close();
        let handle = std::thread::Builder::new()
            .name("charstream-producer".to_string())
            .spawn(move || producer::run(source, build_transducer, thread_inner, byte_chunk_size, auto_close))
            .expect("failed to spawn producer thread");

        DecodingCharStream {
            inner,
            producer_thread: Some(handle),
            position: Position::start(),
            tab_width: config.get_tab_width(),
            mark_stack: MarkStack::new(),
            closed: false,
            pushback: VecDeque::new(),
        }
    }

    /// Convenience entry point decoding a `"UTF-8"`/`"ASCII"` source with
    /// the built-in [`Utf8Transducer`].
    pub fn open_text<S>(source: S, source_encoding: &str, config: StreamConfig) -> DecodingCharStream
    where
        S: ByteSource + 'static,
    {
        let encoding = source_encoding.to_string();
        let option: TransducerOption = config.get_transducer_option();
        DecodingCharStream::open(source, move || Utf8Transducer::try_new(&encoding, option), config)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn status(&self) -> Status {
        if self.closed {
            return Status::Closed;
        }
        let guard = self.inner.state.lock().unwrap();
        if guard.error.is_some() {
            return Status::Error;
        }
        if self.pushback.is_empty() && guard.buffer.is_empty() && guard.producer_finished {
            return Status::AtEnd;
        }
        Status::Open
    }

    pub fn is_at_end(&self) -> bool {
        self.status() == Status::AtEnd
    }

    pub fn has_characters_available(&self) -> bool {
        if !self.pushback.is_empty() {
            return true;
        }
        let guard = self.inner.state.lock().unwrap();
        !guard.buffer.is_empty()
    }

    /// Blocks until a grapheme is available, the producer finishes, or an
    /// error is recorded. Reading on a `Closed` (or not-yet-`Open`) stream
    /// returns no characters rather than an error.
    pub fn read_one(&mut self) -> Result<Option<Grapheme>> {
        if self.closed {
            return Ok(None);
        }

        let g = if let Some((_, g)) = self.pushback.pop_front() {
            g
        } else {
            let mut guard = self.inner.state.lock().unwrap();
            loop {
                if let Some(g) = guard.buffer.pop_front() {
                    drop(guard);
                    self.inner.notify_producer();
                    break g;
                }
                if let Some(err) = guard.error.take() {
                    return Err(err);
                }
                if guard.producer_finished {
                    return Ok(None);
                }
                guard = self.inner.not_empty.wait(guard).unwrap();
            }
        };

        let position_before = self.position;
        self.mark_stack.record(position_before, g);
        self.position.advance(g, self.tab_width);
        Ok(Some(g))
    }

    /// Reads up to `max_count` graphemes into `sink`, stopping early at
    /// end-of-stream. Returns how many graphemes were appended.
    pub fn read_many(&mut self, sink: &mut String, max_count: usize) -> Result<usize> {
        let mut n = 0;
        while n < max_count {
            match self.read_one()? {
                Some(g) => {
                    g.write_to(sink);
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    /// Cancels the stream: signals the producer thread (even if it's
    /// blocked waiting for buffer space to free up) and waits for it to
    /// exit before returning. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.cancel();
        if let Some(handle) = self.producer_thread.take() {
            let _ = handle.join();
        }
        Ok(())
    }

    pub fn set_mark(&mut self) {
        self.mark_stack.set(self.position);
    }

    /// Rewinds to the position the top mark was set at, replaying every
    /// grapheme consumed since. Returns `false` if there was no active mark.
    pub fn reset_mark(&mut self) -> bool {
        match self.mark_stack.reset() {
            Some((position, replay)) => {
                self.position = position;
                for entry in replay.into_iter().rev() {
                    self.pushback.push_front(entry);
                }
                true
            }
            None => false,
        }
    }

    pub fn clear_mark(&mut self) -> bool {
        self.mark_stack.clear()
    }

    pub fn update_mark(&mut self) -> bool {
        self.mark_stack.update(self.position)
    }

    /// Resets to the top mark, then immediately re-marks the rewound
    /// position so the same ground can be replayed again later.
    pub fn reset_mark_keep(&mut self) -> bool {
        match self.mark_stack.reset_keep() {
            Some((position, replay)) => {
                self.position = position;
                for entry in replay.into_iter().rev() {
                    self.pushback.push_front(entry);
                }
                true
            }
            None => false,
        }
    }

    /// Backs the top mark up by up to `n` graphemes, returning how many
    /// were actually available to back up.
    pub fn mark_backup(&mut self, n: usize) -> usize {
        let backed = self.mark_stack.backup(n);
        let count = backed.len();
        if let Some((position, _)) = backed.first() {
            self.position = *position;
        }
        for entry in backed.into_iter().rev() {
            self.pushback.push_front(entry);
        }
        count
    }

    pub fn mark_depth(&self) -> usize {
        self.mark_stack.depth()
    }
}

impl fmt::Debug for DecodingCharStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodingCharStream")
            .field("status", &self.status())
            .field("position", &self.position)
            .field("mark_depth", &self.mark_stack.depth())
            .finish()
    }
}

impl Drop for DecodingCharStream {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;
