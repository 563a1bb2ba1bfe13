//! Read a whole SEG-Y file into memory.
//!
//! [`decode()`] parses a byte slice, [`read()`] any [`Read`] source and
//! [`open()`] a file on disk. All three materialize every trace; use
//! [`TraceReader`] directly to stream large files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::reader::{ReadOptions, TraceReader};
use crate::record::SegyFile;

/// Decode a complete SEG-Y file held in memory, with default options.
pub fn decode(data: &[u8]) -> Result<SegyFile> {
    read(data, ReadOptions::default())
}

/// Read every trace from `source`.
///
/// Any structural error discards the traces read so far.
pub fn read<R: Read>(source: R, options: ReadOptions) -> Result<SegyFile> {
    let mut reader = TraceReader::with_options(source, options)?;
    let traces = reader.by_ref().collect::<Result<Vec<_>>>()?;
    let (textual_header, binary_header) = reader.into_headers();

    let zero_filled = traces.iter().filter(|t| !t.is_decoded()).count();
    debug!(traces = traces.len(), zero_filled, "read complete");

    Ok(SegyFile {
        textual_header,
        binary_header,
        traces,
    })
}

/// Open and read a SEG-Y file with default options.
pub fn open<P: AsRef<Path>>(path: P) -> Result<SegyFile> {
    open_with(path, ReadOptions::default())
}

pub fn open_with<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<SegyFile> {
    let file = File::open(path.as_ref())?;
    read(BufReader::new(file), options)
}
