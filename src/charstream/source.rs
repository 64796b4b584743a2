//! The byte source contract the producer thread pulls from, plus a
//! reference adapter over anything implementing `std::io::Read`.

use std::io::Read;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceStatus {
    NotOpen,
    Open,
    Exhausted,
    Closed,
}

/// A source of raw bytes the producer thread drives to completion. Only
/// the producer thread ever calls into it, so implementors don't need to
/// be `Sync`, only `Send`.
pub trait ByteSource: Send {
    fn open(&mut self) -> Result<(), Error>;

    /// Read up to `buf.len()` bytes, returning how many were read. `Ok(0)`
    /// means end of source.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    fn close(&mut self) -> Result<(), Error>;

    fn status(&self) -> SourceStatus;

    fn has_bytes_available(&self) -> bool {
        matches!(self.status(), SourceStatus::Open)
    }
}

/// Adapts any `Read + Send` into a [`ByteSource`]. This is the reference
/// implementation used for files, sockets, and in-memory buffers alike.
pub struct ReaderByteSource<R: Read + Send> {
    reader: Option<R>,
    status: SourceStatus,
}

impl<R: Read + Send> ReaderByteSource<R> {
    pub fn new(reader: R) -> ReaderByteSource<R> {
        ReaderByteSource { reader: Some(reader), status: SourceStatus::NotOpen }
    }
}

impl<R: Read + Send> ByteSource for ReaderByteSource<R> {
    fn open(&mut self) -> Result<(), Error> {
        if self.reader.is_none() {
            return Err(Error::InvalidState("byte source has no reader to open".to_string()));
        }
        self.status = SourceStatus::Open;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| Error::InvalidState("byte source read after close".to_string()))?;
        let n = reader.read(buf).map_err(|e| Error::SourceRead(e.to_string()))?;
        if n == 0 {
            self.status = SourceStatus::Exhausted;
        }
        Ok(n)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.reader = None;
        self.status = SourceStatus::Closed;
        Ok(())
    }

    fn status(&self) -> SourceStatus {
        self.status
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
