//! Error types for SEG-Y decoding and encoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegyError {
    #[error("malformed file: {section} needs {expected} bytes, got {actual}")]
    MalformedFile {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("trace {trace}: unsupported sample format code {code}")]
    UnsupportedFormat { trace: usize, code: u16 },

    #[error("header field at offset {offset} (width {width}) exceeds {len}-byte block")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("cannot write a trace with no samples")]
    EmptyInput,

    #[error("{0} samples do not fit the 16-bit samples-per-trace field")]
    TooManySamples(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SegyError>;
