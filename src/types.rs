//! Shared types: [`FormatCode`], [`UnsupportedPolicy`], and the fixed
//! block sizes of the SEG-Y layout.

use std::fmt;

/// Size of the textual (card-image) file header.
pub const TEXTUAL_HEADER_LEN: usize = 3200;
/// Size of the binary file header.
pub const BINARY_HEADER_LEN: usize = 400;
/// Size of each trace header.
pub const TRACE_HEADER_LEN: usize = 240;
/// Width of one sample slot as skipped or written by the codec.
pub const SAMPLE_LEN: usize = 4;

/// Data sample format code from the binary file header (bytes 24-25).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    /// 4-byte IBM hexadecimal floating-point (code 1).
    IbmFloat32,
    /// 4-byte two's complement integer (code 2).
    Int32,
    /// 2-byte two's complement integer (code 3).
    Int16,
    /// 4-byte fixed-point with gain (code 4).
    FixedPointGain,
    /// 4-byte IEEE floating-point (code 5).
    IeeeFloat32,
    /// 1-byte two's complement integer (code 8).
    Int8,
    /// Any code outside the documented set.
    Unknown(u16),
}

impl FormatCode {
    /// Convert a raw header value to a `FormatCode`. Never fails; codes
    /// outside the documented set become [`FormatCode::Unknown`].
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::IbmFloat32,
            2 => Self::Int32,
            3 => Self::Int16,
            4 => Self::FixedPointGain,
            5 => Self::IeeeFloat32,
            8 => Self::Int8,
            other => Self::Unknown(other),
        }
    }

    /// Convert to the raw header value.
    pub fn to_code(self) -> u16 {
        match self {
            Self::IbmFloat32 => 1,
            Self::Int32 => 2,
            Self::Int16 => 3,
            Self::FixedPointGain => 4,
            Self::IeeeFloat32 => 5,
            Self::Int8 => 8,
            Self::Unknown(code) => code,
        }
    }

    /// Nominal on-disk width of one sample, `None` for unknown codes.
    pub fn bytes_per_sample(self) -> Option<usize> {
        match self {
            Self::IbmFloat32 | Self::Int32 | Self::FixedPointGain | Self::IeeeFloat32 => Some(4),
            Self::Int16 => Some(2),
            Self::Int8 => Some(1),
            Self::Unknown(_) => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::IbmFloat32 => "4-byte IBM floating-point",
            Self::Int32 => "4-byte two's complement integer",
            Self::Int16 => "2-byte two's complement integer",
            Self::FixedPointGain => "4-byte fixed-point with gain",
            Self::IeeeFloat32 => "4-byte IEEE floating-point",
            Self::Int8 => "1-byte two's complement integer",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Whether the codec decodes samples of this format.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::IbmFloat32 | Self::IeeeFloat32)
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.to_code())
    }
}

/// What the reader does with a trace whose format it cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Skip the sample bytes, yield zero-filled samples and record a warning.
    #[default]
    ZeroFill,
    /// Fail the read with [`SegyError::UnsupportedFormat`](crate::SegyError::UnsupportedFormat).
    Reject,
}
