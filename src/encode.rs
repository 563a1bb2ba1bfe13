//! Write single-trace SEG-Y files from IEEE float samples.
//!
//! The writer always emits data sample format 5 (4-byte IEEE float),
//! revision 1.0, fixed-length traces and no extended textual headers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::header::{BinaryHeader, HeaderBlock, TextualHeader, TraceHeader};
use crate::types::FormatCode;
use crate::{Result, SegyError};

/// SEG-Y revision 1.0 as stored in the binary file header.
pub const REVISION_1: u16 = 0x0100;

const DEFAULT_LABEL: &str = "C01 CONVERTED FROM TEXT FILE";

/// Options for the generated textual header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Leading text of the first card image.
    pub label: String,
    /// Appended to the label when set. Never taken from the system clock.
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            timestamp: None,
        }
    }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The single line written to the textual header.
    pub fn header_line(&self) -> String {
        match self.timestamp {
            Some(ts) => format!("{} {}", self.label, ts.format("%Y-%m-%d %H:%M:%S")),
            None => self.label.clone(),
        }
    }
}

/// Streaming SEG-Y writer over any [`Write`] sink.
pub struct SegyWriter<W: Write> {
    writer: BufWriter<W>,
    options: WriterOptions,
}

impl<W: Write> SegyWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, WriterOptions::default())
    }

    pub fn with_options(writer: W, options: WriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Write the file headers followed by one trace of `samples`.
    ///
    /// Nothing is written if `samples` is empty or too long for the
    /// 16-bit sample count fields.
    pub fn write_trace(mut self, samples: &[f32], sample_interval_us: u16) -> Result<()> {
        let count = sample_count(samples)?;

        let textual = TextualHeader::from_text(&self.options.header_line());
        self.writer.write_all(textual.as_bytes())?;
        self.writer
            .write_all(build_binary_header(count, sample_interval_us).as_bytes())?;
        self.writer
            .write_all(build_trace_header(count, sample_interval_us).as_bytes())?;
        for sample in samples {
            self.writer.write_all(&sample.to_be_bytes())?;
        }
        self.writer.flush()?;

        debug!(samples = count, sample_interval_us, "wrote SEG-Y trace");
        Ok(())
    }
}

/// Encode `samples` as a complete single-trace SEG-Y file.
///
/// # Example
///
/// ```
/// use segy_rs::{decode, encode};
///
/// let bytes = encode(&[0.5, -1.25, 2.0], 2000).unwrap();
/// assert_eq!(bytes.len(), 3200 + 400 + 240 + 3 * 4);
///
/// let file = decode(&bytes).unwrap();
/// assert_eq!(file.traces[0].samples, vec![0.5, -1.25, 2.0]);
/// assert_eq!(file.traces[0].sample_interval, 2000);
/// ```
pub fn encode(samples: &[f32], sample_interval_us: u16) -> Result<Vec<u8>> {
    encode_with(samples, sample_interval_us, WriterOptions::default())
}

pub fn encode_with(
    samples: &[f32],
    sample_interval_us: u16,
    options: WriterOptions,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    SegyWriter::with_options(&mut buf, options).write_trace(samples, sample_interval_us)?;
    Ok(buf)
}

/// Write a single-trace SEG-Y file to `path`.
///
/// The file is not created when the samples are rejected.
pub fn create<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_interval_us: u16,
    options: WriterOptions,
) -> Result<()> {
    sample_count(samples)?;
    let file = File::create(path.as_ref())?;
    SegyWriter::with_options(file, options).write_trace(samples, sample_interval_us)
}

fn sample_count(samples: &[f32]) -> Result<u16> {
    if samples.is_empty() {
        return Err(SegyError::EmptyInput);
    }
    u16::try_from(samples.len()).map_err(|_| SegyError::TooManySamples(samples.len()))
}

fn build_binary_header(count: u16, sample_interval_us: u16) -> BinaryHeader {
    let mut header = BinaryHeader::new();
    header.set_sample_interval(sample_interval_us);
    header.set_samples_per_trace(count);
    header.set_format_code(FormatCode::IeeeFloat32);
    header.set_revision(REVISION_1);
    header.set_fixed_length_traces(true);
    header.set_extended_header_count(0);
    header
}

fn build_trace_header(count: u16, sample_interval_us: u16) -> TraceHeader {
    let mut header = TraceHeader::new();
    header.set_samples_in_trace(count);
    header.set_sample_interval(sample_interval_us);
    header
}
