//! State shared between the producer thread and the consumer-facing
//! `DecodingCharStream`: one mutex-protected buffer of decoded graphemes,
//! guarded by two condition variables (§5's "single shared monitor").

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::charstream::grapheme::Grapheme;
use crate::error::Error;

pub(crate) struct Shared {
    pub(crate) buffer: VecDeque<Grapheme>,
    /// Set once the producer has drained the source, flushed the
    /// transducer, and coalesced the final hanging CR (if any).
    pub(crate) producer_finished: bool,
    pub(crate) error: Option<Error>,
    /// Set by `DecodingCharStream::close`. The producer's only blocking
    /// wait (for buffer space) checks this on every wakeup so a close
    /// issued while the buffer is at the high-water mark can't deadlock
    /// waiting for a consumer read that will never come.
    pub(crate) closed: bool,
}

impl Shared {
    fn new() -> Shared {
        Shared { buffer: VecDeque::new(), producer_finished: false, error: None, closed: false }
    }
}

/// Owns the monitor the producer and consumer contend on. The consumer
/// waits on `not_empty` for graphemes (or completion/error); the producer
/// waits on `space_available` when the buffer has reached the configured
/// high-water mark.
pub(crate) struct Inner {
    pub(crate) state: Mutex<Shared>,
    pub(crate) not_empty: Condvar,
    pub(crate) space_available: Condvar,
    pub(crate) high_water: usize,
}

impl Inner {
    pub(crate) fn new(high_water: usize) -> Inner {
        Inner { state: Mutex::new(Shared::new()), not_empty: Condvar::new(), space_available: Condvar::new(), high_water }
    }

    /// Called by the producer after appending to the buffer or recording
    /// completion/error.
    pub(crate) fn notify_consumer(&self) {
        self.not_empty.notify_all();
    }

    /// Called by the consumer after draining graphemes out of the buffer.
    pub(crate) fn notify_producer(&self) {
        self.space_available.notify_all();
    }

    /// The cancellation signal: marks the stream closed and broadcasts
    /// both condvars so the producer, wherever it is blocked, wakes up
    /// and observes it.
    pub(crate) fn cancel(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.closed = true;
        drop(guard);
        self.not_empty.notify_all();
        self.space_available.notify_all();
    }
}
