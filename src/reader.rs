//! Streaming trace reader.
//!
//! [`TraceReader`] reads the textual and binary file headers up front, then
//! yields one [`Trace`] per call to `next()`. A trailing fragment shorter than
//! a trace header ends iteration without error. To read again from the start,
//! open a new reader on the source.

use std::io::{self, ErrorKind, Read};

use tracing::{debug, warn};

use crate::header::{BinaryHeader, TextualHeader, TraceHeader};
use crate::ibm;
use crate::record::{Trace, TraceStatus};
use crate::types::{
    BINARY_HEADER_LEN, FormatCode, SAMPLE_LEN, TEXTUAL_HEADER_LEN, TRACE_HEADER_LEN,
    UnsupportedPolicy,
};
use crate::{Result, SegyError};

/// Options controlling how traces are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    unsupported: UnsupportedPolicy,
}

impl ReadOptions {
    /// Lenient defaults: unsupported formats are zero-filled with a warning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set what happens to traces whose sample format cannot be decoded.
    pub fn with_unsupported_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    pub fn unsupported_policy(&self) -> UnsupportedPolicy {
        self.unsupported
    }
}

/// Sample decode path selected from the file's format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleDecoder {
    IeeeFloat,
    IbmFloat,
    Unsupported(FormatCode),
}

impl SampleDecoder {
    fn for_format(format: FormatCode) -> Self {
        match format {
            FormatCode::IeeeFloat32 => Self::IeeeFloat,
            FormatCode::IbmFloat32 => Self::IbmFloat,
            FormatCode::Int32
            | FormatCode::Int16
            | FormatCode::FixedPointGain
            | FormatCode::Int8
            | FormatCode::Unknown(_) => Self::Unsupported(format),
        }
    }
}

/// Iterator over the traces of a SEG-Y stream.
///
/// # Example
///
/// ```
/// use segy_rs::{encode, TraceReader};
///
/// let data = encode(&[1.0, 2.0, 3.0], 1000).unwrap();
/// let mut reader = TraceReader::new(&data[..]).unwrap();
/// assert_eq!(reader.binary_header().sample_interval(), 1000);
///
/// let trace = reader.next().unwrap().unwrap();
/// assert_eq!(trace.samples, vec![1.0, 2.0, 3.0]);
/// assert!(reader.next().is_none());
/// ```
pub struct TraceReader<R> {
    source: R,
    options: ReadOptions,
    textual_header: TextualHeader,
    binary_header: BinaryHeader,
    decoder: SampleDecoder,
    next_index: usize,
    finished: bool,
}

impl<R: Read> TraceReader<R> {
    /// Read the file headers with default options.
    pub fn new(source: R) -> Result<Self> {
        Self::with_options(source, ReadOptions::default())
    }

    /// Read the file headers. Fails with [`SegyError::MalformedFile`] if
    /// either fixed header is cut short.
    pub fn with_options(mut source: R, options: ReadOptions) -> Result<Self> {
        let mut text = [0u8; TEXTUAL_HEADER_LEN];
        let n = read_up_to(&mut source, &mut text)?;
        let textual_header = TextualHeader::from_bytes(&text[..n])?;

        let mut binary = [0u8; BINARY_HEADER_LEN];
        let n = read_up_to(&mut source, &mut binary)?;
        let binary_header = BinaryHeader::from_bytes(&binary[..n])?;

        let format = binary_header.format_code();
        if let FormatCode::Unknown(code) = format {
            warn!(code, "unknown data sample format code");
        }
        if binary_header.extended_header_count() > 0 {
            warn!(
                count = binary_header.extended_header_count(),
                "extended textual headers are not supported and will be read as trace data"
            );
        }
        debug!(
            sample_interval = binary_header.sample_interval(),
            samples_per_trace = binary_header.samples_per_trace(),
            format = format.to_code(),
            "read binary file header"
        );

        Ok(Self {
            source,
            options,
            textual_header,
            binary_header,
            decoder: SampleDecoder::for_format(format),
            next_index: 0,
            finished: false,
        })
    }

    pub fn textual_header(&self) -> &TextualHeader {
        &self.textual_header
    }

    pub fn binary_header(&self) -> &BinaryHeader {
        &self.binary_header
    }

    /// Give back the file headers, dropping the source.
    pub fn into_headers(self) -> (TextualHeader, BinaryHeader) {
        (self.textual_header, self.binary_header)
    }

    fn read_trace(&mut self) -> Result<Option<Trace>> {
        let mut raw = [0u8; TRACE_HEADER_LEN];
        let n = read_up_to(&mut self.source, &mut raw)?;
        if n < TRACE_HEADER_LEN {
            if n > 0 {
                debug!(bytes = n, "ignoring trailing fragment shorter than a trace header");
            }
            return Ok(None);
        }
        let header = TraceHeader::from_bytes(&raw)?;

        let index = self.next_index;
        self.next_index += 1;
        let sample_count = header.resolved_sample_count(&self.binary_header);
        let sample_interval = header.resolved_sample_interval(&self.binary_header);
        let payload_len = sample_count * SAMPLE_LEN;

        let (samples, status) = match self.decoder {
            SampleDecoder::IeeeFloat => {
                let payload = self.read_payload(payload_len)?;
                (decode_ieee(&payload), TraceStatus::Decoded)
            }
            SampleDecoder::IbmFloat => {
                let payload = self.read_payload(payload_len)?;
                (decode_ibm(&payload), TraceStatus::Decoded)
            }
            SampleDecoder::Unsupported(format) => {
                if self.options.unsupported == UnsupportedPolicy::Reject {
                    return Err(SegyError::UnsupportedFormat {
                        trace: index,
                        code: format.to_code(),
                    });
                }
                self.skip_payload(payload_len)?;
                warn!(
                    trace = index,
                    code = format.to_code(),
                    format = format.description(),
                    "unsupported data format, samples zero-filled"
                );
                (vec![0.0; sample_count], TraceStatus::ZeroFilled(format))
            }
        };

        Ok(Some(Trace {
            index,
            header,
            sample_count,
            sample_interval,
            samples,
            status,
        }))
    }

    fn read_payload(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; len];
        let n = read_up_to(&mut self.source, &mut payload)?;
        if n < len {
            return Err(truncated_trace(len, n));
        }
        Ok(payload)
    }

    fn skip_payload(&mut self, len: usize) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.source).take(len as u64), &mut io::sink())?;
        if skipped < len as u64 {
            return Err(truncated_trace(len, skipped as usize));
        }
        Ok(())
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = Result<Trace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_trace() {
            Ok(Some(trace)) => Some(Ok(trace)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                // Stop after the first structural error
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn truncated_trace(expected: usize, actual: usize) -> SegyError {
    SegyError::MalformedFile {
        section: "trace data",
        expected,
        actual,
    }
}

/// Fill `buf` from `source`, stopping early only at end of stream.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn decode_ieee(payload: &[u8]) -> Vec<f64> {
    payload
        .chunks_exact(SAMPLE_LEN)
        .map(|b| f64::from(f32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        .collect()
}

fn decode_ibm(payload: &[u8]) -> Vec<f64> {
    payload
        .chunks_exact(SAMPLE_LEN)
        .map(|b| ibm::ibm_to_f64([b[0], b[1], b[2], b[3]]))
        .collect()
}
