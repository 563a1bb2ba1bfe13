//! Fixed-layout SEG-Y header blocks.
//!
//! [`TextualHeader`] (3200 bytes), [`BinaryHeader`] (400 bytes) and
//! [`TraceHeader`] (240 bytes) keep their raw bytes as the source of truth
//! and expose big-endian 16-bit fields at fixed offsets. Offsets are relative
//! to the start of each block.

use std::fmt;

use crate::ebcdic;
use crate::types::{BINARY_HEADER_LEN, FormatCode, TEXTUAL_HEADER_LEN, TRACE_HEADER_LEN};
use crate::{Result, SegyError};

// Binary file header offsets.
const BIN_SAMPLE_INTERVAL: usize = 16;
const BIN_SAMPLES_PER_TRACE: usize = 20;
const BIN_FORMAT_CODE: usize = 24;
const BIN_REVISION: usize = 300;
const BIN_FIXED_LENGTH: usize = 302;
const BIN_EXTENDED_HEADERS: usize = 304;

// Trace header offsets.
const TRACE_SAMPLE_COUNT: usize = 114;
const TRACE_SAMPLE_INTERVAL: usize = 116;

/// Resolve a per-trace header value against the file-wide one.
///
/// Zero in a trace header means "inherit from the binary file header".
pub fn resolve(trace_value: u16, file_value: u16) -> u16 {
    if trace_value != 0 {
        trace_value
    } else {
        file_value
    }
}

/// Bounds-checked big-endian access to a fixed-size header block.
pub trait HeaderBlock {
    fn as_bytes(&self) -> &[u8];
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Read the big-endian `u16` at `offset`.
    fn u16_at(&self, offset: usize) -> Result<u16> {
        let bytes = self.as_bytes();
        let field = checked_range(offset, 2, bytes.len())?;
        Ok(u16::from_be_bytes([bytes[field], bytes[field + 1]]))
    }

    /// Write `value` as a big-endian `u16` at `offset`.
    fn set_u16_at(&mut self, offset: usize, value: u16) -> Result<()> {
        let bytes = self.as_bytes_mut();
        let field = checked_range(offset, 2, bytes.len())?;
        bytes[field..field + 2].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

fn checked_range(offset: usize, width: usize, len: usize) -> Result<usize> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset),
        _ => Err(SegyError::OutOfRange { offset, width, len }),
    }
}

/// Copy the leading `N` bytes of `data` into a block, or report how short it is.
fn fixed_block<const N: usize>(data: &[u8], section: &'static str) -> Result<[u8; N]> {
    data.get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(SegyError::MalformedFile {
            section,
            expected: N,
            actual: data.len(),
        })
}

fn be_u16<const N: usize>(bytes: &[u8; N], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn put_be_u16<const N: usize>(bytes: &mut [u8; N], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

/// The 3200-byte textual header, kept in its legacy-encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextualHeader {
    bytes: [u8; TEXTUAL_HEADER_LEN],
}

impl TextualHeader {
    /// A header of EBCDIC spaces.
    pub fn blank() -> Self {
        Self {
            bytes: [ebcdic::EBCDIC_SPACE; TEXTUAL_HEADER_LEN],
        }
    }

    /// Encode `text` into the first card image of a blank header.
    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: ebcdic::encode(text),
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            bytes: fixed_block(data, "textual header")?,
        })
    }

    /// Decode all 3200 bytes into a flat string.
    pub fn text(&self) -> String {
        ebcdic::decode(&self.bytes)
    }

    /// Decode into 40 card image lines of 80 characters.
    pub fn lines(&self) -> Vec<String> {
        ebcdic::split_lines(&self.text())
    }
}

impl HeaderBlock for TextualHeader {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// The 400-byte binary file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHeader {
    bytes: [u8; BINARY_HEADER_LEN],
}

impl BinaryHeader {
    /// An all-zero header.
    pub fn new() -> Self {
        Self {
            bytes: [0; BINARY_HEADER_LEN],
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            bytes: fixed_block(data, "binary file header")?,
        })
    }

    /// Sample interval in microseconds.
    pub fn sample_interval(&self) -> u16 {
        be_u16(&self.bytes, BIN_SAMPLE_INTERVAL)
    }

    pub fn samples_per_trace(&self) -> u16 {
        be_u16(&self.bytes, BIN_SAMPLES_PER_TRACE)
    }

    pub fn format_code(&self) -> FormatCode {
        FormatCode::from_code(be_u16(&self.bytes, BIN_FORMAT_CODE))
    }

    /// SEG-Y revision, `0x0100` for revision 1.0.
    pub fn revision(&self) -> u16 {
        be_u16(&self.bytes, BIN_REVISION)
    }

    /// Non-zero when every trace has the same number of samples.
    pub fn fixed_length_traces(&self) -> bool {
        be_u16(&self.bytes, BIN_FIXED_LENGTH) != 0
    }

    pub fn extended_header_count(&self) -> u16 {
        be_u16(&self.bytes, BIN_EXTENDED_HEADERS)
    }

    pub fn set_sample_interval(&mut self, micros: u16) {
        put_be_u16(&mut self.bytes, BIN_SAMPLE_INTERVAL, micros);
    }

    pub fn set_samples_per_trace(&mut self, count: u16) {
        put_be_u16(&mut self.bytes, BIN_SAMPLES_PER_TRACE, count);
    }

    pub fn set_format_code(&mut self, format: FormatCode) {
        put_be_u16(&mut self.bytes, BIN_FORMAT_CODE, format.to_code());
    }

    pub fn set_revision(&mut self, revision: u16) {
        put_be_u16(&mut self.bytes, BIN_REVISION, revision);
    }

    pub fn set_fixed_length_traces(&mut self, fixed: bool) {
        put_be_u16(&mut self.bytes, BIN_FIXED_LENGTH, u16::from(fixed));
    }

    pub fn set_extended_header_count(&mut self, count: u16) {
        put_be_u16(&mut self.bytes, BIN_EXTENDED_HEADERS, count);
    }
}

impl Default for BinaryHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderBlock for BinaryHeader {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl fmt::Display for BinaryHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} us | {} samples/trace | {} | rev {:#06X}",
            self.sample_interval(),
            self.samples_per_trace(),
            self.format_code(),
            self.revision(),
        )
    }
}

/// The 240-byte header preceding each trace's samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceHeader {
    bytes: [u8; TRACE_HEADER_LEN],
}

impl TraceHeader {
    /// An all-zero header, which inherits count and interval from the file.
    pub fn new() -> Self {
        Self {
            bytes: [0; TRACE_HEADER_LEN],
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            bytes: fixed_block(data, "trace header")?,
        })
    }

    /// Raw samples-in-this-trace field; zero means inherit.
    pub fn samples_in_trace(&self) -> u16 {
        be_u16(&self.bytes, TRACE_SAMPLE_COUNT)
    }

    /// Raw sample interval field in microseconds; zero means inherit.
    pub fn sample_interval(&self) -> u16 {
        be_u16(&self.bytes, TRACE_SAMPLE_INTERVAL)
    }

    pub fn set_samples_in_trace(&mut self, count: u16) {
        put_be_u16(&mut self.bytes, TRACE_SAMPLE_COUNT, count);
    }

    pub fn set_sample_interval(&mut self, micros: u16) {
        put_be_u16(&mut self.bytes, TRACE_SAMPLE_INTERVAL, micros);
    }

    pub fn resolved_sample_count(&self, file: &BinaryHeader) -> usize {
        resolve(self.samples_in_trace(), file.samples_per_trace()) as usize
    }

    pub fn resolved_sample_interval(&self, file: &BinaryHeader) -> u16 {
        resolve(self.sample_interval(), file.sample_interval())
    }
}

impl Default for TraceHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderBlock for TraceHeader {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve(0, 500), 500);
        assert_eq!(resolve(250, 500), 250);
        assert_eq!(resolve(0, 0), 0);
    }

    #[test]
    fn test_binary_field_offsets() {
        let mut raw = [0u8; BINARY_HEADER_LEN];
        raw[16..18].copy_from_slice(&2000u16.to_be_bytes());
        raw[20..22].copy_from_slice(&1501u16.to_be_bytes());
        raw[24..26].copy_from_slice(&1u16.to_be_bytes());
        raw[300..302].copy_from_slice(&0x0100u16.to_be_bytes());
        raw[302..304].copy_from_slice(&1u16.to_be_bytes());
        raw[304..306].copy_from_slice(&2u16.to_be_bytes());

        let header = BinaryHeader::from_bytes(&raw).unwrap();
        assert_eq!(header.sample_interval(), 2000);
        assert_eq!(header.samples_per_trace(), 1501);
        assert_eq!(header.format_code(), FormatCode::IbmFloat32);
        assert_eq!(header.revision(), 0x0100);
        assert!(header.fixed_length_traces());
        assert_eq!(header.extended_header_count(), 2);
    }

    #[test]
    fn test_binary_setters_write_big_endian() {
        let mut header = BinaryHeader::new();
        header.set_sample_interval(0x1234);
        header.set_format_code(FormatCode::IeeeFloat32);
        header.set_fixed_length_traces(true);
        let bytes = header.as_bytes();
        assert_eq!(&bytes[16..18], &[0x12, 0x34]);
        assert_eq!(&bytes[24..26], &[0x00, 0x05]);
        assert_eq!(&bytes[302..304], &[0x00, 0x01]);
    }

    #[test]
    fn test_generic_accessor_bounds() {
        let mut header = TraceHeader::new();
        header.set_u16_at(238, 7).unwrap();
        assert_eq!(header.u16_at(238).unwrap(), 7);

        let err = header.u16_at(239).unwrap_err();
        assert!(matches!(
            err,
            SegyError::OutOfRange {
                offset: 239,
                width: 2,
                len: 240
            }
        ));
        assert!(header.set_u16_at(usize::MAX, 1).is_err());
        assert!(BinaryHeader::new().u16_at(400).is_err());
    }

    #[test]
    fn test_short_blocks_are_malformed() {
        let err = BinaryHeader::from_bytes(&[0u8; 399]).unwrap_err();
        assert!(matches!(
            err,
            SegyError::MalformedFile {
                expected: 400,
                actual: 399,
                ..
            }
        ));
        assert!(TextualHeader::from_bytes(&[0x40; 10]).is_err());
        assert!(TraceHeader::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_trace_header_inherits_zero_fields() {
        let mut file = BinaryHeader::new();
        file.set_samples_per_trace(1000);
        file.set_sample_interval(4000);

        let mut trace = TraceHeader::new();
        assert_eq!(trace.resolved_sample_count(&file), 1000);
        assert_eq!(trace.resolved_sample_interval(&file), 4000);

        trace.set_samples_in_trace(12);
        trace.set_sample_interval(250);
        assert_eq!(trace.resolved_sample_count(&file), 12);
        assert_eq!(trace.resolved_sample_interval(&file), 250);
        assert_eq!(&trace.as_bytes()[114..118], &[0, 12, 0, 250]);
    }

    #[test]
    fn test_textual_header_lines() {
        let header = TextualHeader::from_text("C01 LINE ONE");
        let lines = header.lines();
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[0].trim_end(), "C01 LINE ONE");
        assert!(lines[1..].iter().all(|l| l.trim().is_empty()));
        assert_eq!(TextualHeader::blank().text().len(), 3200);
    }
}
