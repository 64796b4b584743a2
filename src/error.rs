//! Error types shared by [`crate::ordtree`] and [`crate::charstream`].
//!
//! Following the taxonomy in the top-level design: programming errors
//! (out-of-range index, missing rotation child, missing sibling) are never
//! returned across a public API boundary — they are constructed only to
//! feed a `panic!`, so that the panic message is uniform. Recoverable
//! errors (source I/O failure, unknown encoding) are returned from
//! `DecodingCharStream` methods.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// `getByPosition`/`removeAtPosition` called with `i >= len`.
    IndexOutOfBounds { index: usize, len: usize },
    /// A rotation was requested toward a child that doesn't exist.
    /// Indicates corruption of the red-black invariants.
    RotationMissingChild,
    /// Delete fix-up could not find a sibling. Indicates corruption.
    SiblingMissing,
    /// An invariant check performed by `validate()` failed.
    InvalidState(String),

    /// The byte source failed to produce bytes.
    SourceRead(String),
    /// The transducer could not be constructed for the requested encoding.
    UnknownEncoding(String),
    /// A read was attempted on a stream that is `Closed` or `NotOpen`.
    Closed,
    /// The background producer thread panicked or could not be joined.
    ProducerLost,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds, len is {}", index, len)
            }
            Error::RotationMissingChild => {
                write!(f, "rotation requested toward a missing child")
            }
            Error::SiblingMissing => write!(f, "delete fix-up found no sibling"),
            Error::InvalidState(msg) => write!(f, "invalid tree state: {}", msg),
            Error::SourceRead(msg) => write!(f, "byte source read failed: {}", msg),
            Error::UnknownEncoding(name) => write!(f, "unknown source encoding: {}", name),
            Error::Closed => write!(f, "stream is closed"),
            Error::ProducerLost => write!(f, "producer thread terminated unexpectedly"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::SourceRead(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
