//! Pure Rust SEG-Y reader and writer.
//!
//! Parses the 3200-byte EBCDIC textual header, the 400-byte binary file
//! header and the trace records that follow, decoding 4-byte IEEE and IBM
//! hexadecimal floating-point samples. Writes single-trace files in IEEE
//! float format.
//!
//! # Writing and reading back a trace
//!
//! ```
//! use segy_rs::{decode, encode, FormatCode};
//!
//! let bytes = encode(&[0.0, 1.5, -3.0], 2000).unwrap();
//! let file = decode(&bytes).unwrap();
//!
//! assert_eq!(file.format(), FormatCode::IeeeFloat32);
//! assert_eq!(file.trace_count(), 1);
//! assert_eq!(file.traces[0].samples, vec![0.0, 1.5, -3.0]);
//! assert_eq!(file.traces[0].sample_interval, 2000);
//! ```
//!
//! # Streaming traces
//!
//! ```
//! use segy_rs::{encode, TraceReader};
//!
//! let bytes = encode(&[1.0; 16], 4000).unwrap();
//! let reader = TraceReader::new(&bytes[..]).unwrap();
//!
//! for trace in reader {
//!     let trace = trace.unwrap();
//!     assert_eq!(trace.sample_count, 16);
//! }
//! ```
//!
//! # Strict reading
//!
//! Traces in unsupported sample formats are zero-filled and reported through
//! [`SegyFile::warnings`] by default. Reject them instead with:
//!
//! ```
//! use segy_rs::{read, encode, ReadOptions, UnsupportedPolicy};
//!
//! let options = ReadOptions::new().with_unsupported_policy(UnsupportedPolicy::Reject);
//! let bytes = encode(&[1.0], 1000).unwrap();
//! let file = read(&bytes[..], options).unwrap();
//! assert!(file.is_complete());
//! ```

pub mod decode;
pub mod ebcdic;
pub mod encode;
pub mod error;
pub mod header;
pub mod ibm;
pub mod reader;
pub mod record;
pub mod types;

pub use error::{Result, SegyError};
pub use header::{BinaryHeader, HeaderBlock, TextualHeader, TraceHeader, resolve};
pub use reader::{ReadOptions, TraceReader};
pub use record::{ReadWarning, SegyFile, Trace, TraceStatus};
pub use types::{FormatCode, UnsupportedPolicy};

pub use decode::{decode, open, open_with, read};
pub use encode::{SegyWriter, WriterOptions, create, encode, encode_with};
