//! Decoded SEG-Y data: [`Trace`] and the batch result [`SegyFile`].

use std::fmt;

use crate::header::{BinaryHeader, TextualHeader, TraceHeader};
use crate::types::FormatCode;

/// Whether a trace's samples were actually decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStatus {
    Decoded,
    /// Samples were skipped and zero-filled because the format is not supported.
    ZeroFilled(FormatCode),
}

/// Non-fatal condition observed while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadWarning {
    UnsupportedFormat { trace: usize, format: FormatCode },
}

impl fmt::Display for ReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { trace, format } => {
                write!(f, "trace {trace}: unsupported data format {format}, zero-filled")
            }
        }
    }
}

/// One decoded trace with the header it was read from.
///
/// `sample_count` and `sample_interval` are already resolved against the
/// binary file header.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Zero-based position in the file.
    pub index: usize,
    pub header: TraceHeader,
    pub sample_count: usize,
    /// Sample interval in microseconds.
    pub sample_interval: u16,
    pub samples: Vec<f64>,
    pub status: TraceStatus,
}

impl Trace {
    pub fn is_decoded(&self) -> bool {
        self.status == TraceStatus::Decoded
    }

    pub fn warning(&self) -> Option<ReadWarning> {
        match self.status {
            TraceStatus::Decoded => None,
            TraceStatus::ZeroFilled(format) => Some(ReadWarning::UnsupportedFormat {
                trace: self.index,
                format,
            }),
        }
    }

    /// Time of each sample in milliseconds, starting at zero.
    pub fn times_ms(&self) -> Vec<f64> {
        let step = f64::from(self.sample_interval) / 1000.0;
        (0..self.samples.len()).map(|i| i as f64 * step).collect()
    }
}

/// A fully read SEG-Y file. All samples are held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SegyFile {
    pub textual_header: TextualHeader,
    pub binary_header: BinaryHeader,
    /// Traces in file order.
    pub traces: Vec<Trace>,
}

impl SegyFile {
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    pub fn format(&self) -> FormatCode {
        self.binary_header.format_code()
    }

    /// Warnings for every trace that was zero-filled.
    pub fn warnings(&self) -> Vec<ReadWarning> {
        self.traces.iter().filter_map(Trace::warning).collect()
    }

    /// `true` when every trace was decoded.
    pub fn is_complete(&self) -> bool {
        self.traces.iter().all(Trace::is_decoded)
    }
}

impl fmt::Display for SegyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (samples, interval) = match self.traces.first() {
            Some(trace) => (trace.sample_count, trace.sample_interval),
            None => (
                usize::from(self.binary_header.samples_per_trace()),
                self.binary_header.sample_interval(),
            ),
        };
        write!(
            f,
            "{} traces | {} samples/trace | {} us | {}",
            self.trace_count(),
            samples,
            interval,
            self.format(),
        )
    }
}
