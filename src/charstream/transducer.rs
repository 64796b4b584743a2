//! The encoding transducer contract (§6's external collaborator) plus one
//! concrete, dependency-free implementation (`Utf8Transducer`) so the
//! stream is usable and testable without `iconv` FFI.

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertStatus {
    Complete,
    IncompleteTrailing,
    InvalidSequence,
    OutputFull,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub status: ConvertStatus,
    pub bytes_consumed: usize,
    pub bytes_produced: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushStatus {
    Complete,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushOutcome {
    pub status: FlushStatus,
    pub bytes_produced: usize,
}

/// How the transducer should handle a byte sequence that cannot be decoded
/// in the source encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransducerOption {
    None,
    IgnoreInvalid,
    Transliterate,
}

/// An opaque byte-to-byte encoding converter. `output` always receives
/// whole UTF-32 code units (4 bytes each, native byte order).
pub trait Transducer: Send {
    fn convert(&mut self, input: &[u8], output: &mut [u8]) -> ConvertOutcome;
    fn flush(&mut self, output: &mut [u8]) -> FlushOutcome;
}

/// Reference transducer for `"UTF-8"`/`"ASCII"` source encodings. Real
/// multi-byte/stateful encodings are expected to be adapted from `iconv`
/// or an equivalent out-of-process library; that FFI boundary is out of
/// scope here (§1), so this crate ships only the encoding it needs to be
/// self-testing.
pub struct Utf8Transducer {
    option: TransducerOption,
}

impl Utf8Transducer {
    pub fn try_new(source_encoding: &str, option: TransducerOption) -> Result<Utf8Transducer, Error> {
        match source_encoding.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" | "ASCII" | "US-ASCII" => Ok(Utf8Transducer { option }),
            other => Err(Error::UnknownEncoding(other.to_string())),
        }
    }

    fn emit(out: &mut [u8], out_pos: &mut usize, code_point: u32) -> bool {
        if *out_pos + 4 > out.len() {
            return false;
        }
        out[*out_pos..*out_pos + 4].copy_from_slice(&code_point.to_ne_bytes());
        *out_pos += 4;
        true
    }
}

impl Transducer for Utf8Transducer {
    fn convert(&mut self, input: &[u8], output: &mut [u8]) -> ConvertOutcome {
        let mut in_pos = 0usize;
        let mut out_pos = 0usize;

        loop {
            if in_pos >= input.len() {
                return ConvertOutcome {
                    status: ConvertStatus::Complete,
                    bytes_consumed: in_pos,
                    bytes_produced: out_pos,
                };
            }

            match std::str::from_utf8(&input[in_pos..]) {
                Ok(valid) => {
                    for c in valid.chars() {
                        if !Utf8Transducer::emit(output, &mut out_pos, c as u32) {
                            return ConvertOutcome {
                                status: ConvertStatus::OutputFull,
                                bytes_consumed: in_pos,
                                bytes_produced: out_pos,
                            };
                        }
                        in_pos += c.len_utf8();
                    }
                    return ConvertOutcome {
                        status: ConvertStatus::Complete,
                        bytes_consumed: in_pos,
                        bytes_produced: out_pos,
                    };
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    let valid_str = std::str::from_utf8(&input[in_pos..in_pos + valid_up_to])
                        .expect("byte range validated by std::str::from_utf8's error report");
                    for c in valid_str.chars() {
                        if !Utf8Transducer::emit(output, &mut out_pos, c as u32) {
                            return ConvertOutcome {
                                status: ConvertStatus::OutputFull,
                                bytes_consumed: in_pos,
                                bytes_produced: out_pos,
                            };
                        }
                        in_pos += c.len_utf8();
                    }

                    match e.error_len() {
                        None => {
                            // Trailing bytes don't yet form a complete
                            // sequence; leave them unconsumed for the
                            // next chunk.
                            return ConvertOutcome {
                                status: ConvertStatus::IncompleteTrailing,
                                bytes_consumed: in_pos,
                                bytes_produced: out_pos,
                            };
                        }
                        Some(bad_len) => match self.option {
                            TransducerOption::None => {
                                return ConvertOutcome {
                                    status: ConvertStatus::InvalidSequence,
                                    bytes_consumed: in_pos,
                                    bytes_produced: out_pos,
                                };
                            }
                            TransducerOption::IgnoreInvalid => {
                                in_pos += bad_len;
                                continue;
                            }
                            TransducerOption::Transliterate => {
                                if !Utf8Transducer::emit(output, &mut out_pos, 0xFFFD) {
                                    return ConvertOutcome {
                                        status: ConvertStatus::OutputFull,
                                        bytes_consumed: in_pos,
                                        bytes_produced: out_pos,
                                    };
                                }
                                in_pos += bad_len;
                                continue;
                            }
                        },
                    }
                }
            }
        }
    }

    fn flush(&mut self, _output: &mut [u8]) -> FlushOutcome {
        // UTF-8 is stateless: nothing to flush.
        FlushOutcome { status: FlushStatus::Complete, bytes_produced: 0 }
    }
}

#[cfg(test)]
#[path = "transducer_test.rs"]
mod transducer_test;
