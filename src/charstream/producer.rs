//! The background thread that pulls bytes from a [`ByteSource`], decodes
//! them through a [`Transducer`], coalesces the result into [`Grapheme`]s,
//! and publishes them into the shared buffer.

use std::sync::Arc;

use crate::charstream::grapheme::Coalescer;
use crate::charstream::shared::Inner;
use crate::charstream::source::ByteSource;
use crate::charstream::transducer::{ConvertStatus, FlushStatus, Transducer};
use crate::error::Error;

fn bytes_to_chars(decoded: &[u8]) -> Vec<char> {
    decoded
        .chunks_exact(4)
        .map(|c| {
            let cp = u32::from_ne_bytes([c[0], c[1], c[2], c[3]]);
            char::from_u32(cp).unwrap_or('\u{FFFD}')
        })
        .collect()
}

fn fail(inner: &Inner, err: Error) {
    log::error!(target: "charstream::producer", "terminating: {}", err);
    let mut guard = inner.state.lock().unwrap();
    guard.error = Some(err);
    guard.producer_finished = true;
    drop(guard);
    inner.notify_consumer();
}

fn finish(inner: &Inner, coalescer: &mut Coalescer, graphemes: &mut Vec<crate::charstream::grapheme::Grapheme>) {
    coalescer.finish(graphemes);
    let mut guard = inner.state.lock().unwrap();
    guard.buffer.extend(graphemes.drain(..));
    guard.producer_finished = true;
    drop(guard);
    inner.notify_consumer();
}

/// Runs until the source is exhausted, an unrecoverable error occurs, or
/// the stream is closed. Intended to be the body of the dedicated
/// producer thread spawned by `DecodingCharStream::open`. `build_transducer`
/// runs here, on the producer thread, so an unknown-encoding failure
/// surfaces to the consumer the same way any other producer-side error
/// does: on its next read, not from `open()` itself.
pub(crate) fn run<S, T, F>(
    mut source: S,
    build_transducer: F,
    inner: Arc<Inner>,
    byte_chunk_size: usize,
    auto_close: bool,
) where
    S: ByteSource,
    T: Transducer,
    F: FnOnce() -> Result<T, Error>,
{
    if let Err(e) = source.open() {
        fail(&inner, e);
        return;
    }
    let mut transducer = match build_transducer() {
        Ok(t) => t,
        Err(e) => {
            fail(&inner, e);
            return;
        }
    };
    log::debug!(target: "charstream::producer", "source opened, chunk size {}", byte_chunk_size);

    let mut raw = vec![0u8; byte_chunk_size];
    let mut leftover: Vec<u8> = Vec::new();
    let mut decode_buf = vec![0u8; byte_chunk_size * 4];
    let mut coalescer = Coalescer::new();
    let mut graphemes = Vec::new();

    loop {
        {
            let mut guard = inner.state.lock().unwrap();
            while guard.buffer.len() >= inner.high_water && !guard.closed {
                guard = inner.space_available.wait(guard).unwrap();
            }
            if guard.closed {
                log::debug!(target: "charstream::producer", "stream closed, producer exiting");
                drop(guard);
                if auto_close {
                    let _ = source.close();
                }
                return;
            }
        }

        let n = match source.read(&mut raw) {
            Ok(n) => n,
            Err(e) => {
                fail(&inner, e);
                return;
            }
        };

        if n == 0 {
            log::trace!(target: "charstream::producer", "source exhausted");
            let flush_outcome = transducer.flush(&mut decode_buf);
            if flush_outcome.status == FlushStatus::Error {
                fail(&inner, Error::InvalidState("transducer flush failed".to_string()));
                return;
            }
            let flushed = bytes_to_chars(&decode_buf[..flush_outcome.bytes_produced]);
            coalescer.push(&flushed, &mut graphemes);

            if !leftover.is_empty() {
                log::debug!(
                    target: "charstream::producer",
                    "{} trailing byte(s) never formed a complete sequence, emitting U+FFFD",
                    leftover.len()
                );
                coalescer.push(&['\u{FFFD}'], &mut graphemes);
            }

            finish(&inner, &mut coalescer, &mut graphemes);
            if auto_close {
                let _ = source.close();
            }
            return;
        }

        leftover.extend_from_slice(&raw[..n]);

        loop {
            let outcome = transducer.convert(&leftover, &mut decode_buf);
            let produced = bytes_to_chars(&decode_buf[..outcome.bytes_produced]);
            coalescer.push(&produced, &mut graphemes);
            leftover.drain(..outcome.bytes_consumed);

            match outcome.status {
                ConvertStatus::Complete => break,
                ConvertStatus::IncompleteTrailing => break,
                ConvertStatus::OutputFull => continue,
                ConvertStatus::InvalidSequence => {
                    fail(&inner, Error::InvalidState("invalid byte sequence in source encoding".to_string()));
                    return;
                }
                ConvertStatus::Error => {
                    fail(&inner, Error::InvalidState("transducer reported an internal error".to_string()));
                    return;
                }
            }
        }

        if !graphemes.is_empty() {
            let mut guard = inner.state.lock().unwrap();
            guard.buffer.extend(graphemes.drain(..));
            drop(guard);
            inner.notify_consumer();
        }
    }
}
