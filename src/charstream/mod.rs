//! A streaming character decoder: a background producer thread reads bytes
//! from a [`ByteSource`], decodes them through a [`Transducer`], coalesces
//! CRLF pairs, and tracks line/column position, while the consumer pulls
//! decoded [`Grapheme`]s one at a time (with mark/rewind support) from a
//! bounded buffer.

mod config;
mod grapheme;
mod mark;
mod position;
mod producer;
mod shared;
mod source;
mod stream;
mod transducer;

pub use config::StreamConfig;
pub use grapheme::Grapheme;
pub use position::Position;
pub use source::{ByteSource, ReaderByteSource, SourceStatus};
pub use stream::{DecodingCharStream, Status};
pub use transducer::{
    ConvertOutcome, ConvertStatus, FlushOutcome, FlushStatus, Transducer, TransducerOption, Utf8Transducer,
};
