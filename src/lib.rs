//! `ordkit` provides two tightly focused building blocks for systems code:
//!
//! - [`ordtree::OrderStatRBTree`], an ordered `(key, value)` map backed by a
//!   red-black tree where every node carries a subtree-size count, giving
//!   O(log n) positional (rank) access on top of the usual keyed
//!   operations.
//! - [`charstream::DecodingCharStream`], a background-decoding character
//!   stream: bytes in a named source encoding go in, Unicode grapheme
//!   clusters (with CRLF coalesced into one cluster) come out, with
//!   mark/rewind support and line/column tracking.
//!
//! The two do not depend on each other; they share only [`error::Error`].

mod error;

pub mod charstream;
pub mod ordtree;

pub use crate::error::{Error, Result};
