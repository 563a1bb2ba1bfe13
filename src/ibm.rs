//! IBM System/360 hexadecimal floating-point conversion.
//!
//! A 32-bit IBM float is one sign bit, a 7-bit base-16 exponent biased by 64
//! and a 24-bit fraction: `value = (-1)^sign * fraction / 2^24 * 16^(exp - 64)`.
//! Reinterpreting the bytes as IEEE-754 gives wrong values for every nonzero
//! input, so the fields are unpacked explicitly.

const SIGN_MASK: u32 = 0x8000_0000;
const FRACTION_MASK: u32 = 0x00FF_FFFF;
const EXPONENT_BIAS: i32 = 64;
const FRACTION_SCALE: f64 = (1u32 << 24) as f64;

/// Largest magnitude representable as an IBM float.
pub const IBM_MAX: f64 = (FRACTION_MASK as f64 / FRACTION_SCALE) * 7.237_005_577_332_262e75;

/// Decode 4 big-endian bytes of IBM float into an `f64`.
///
/// A zero fraction decodes to exactly `0.0` whatever the sign and exponent.
pub fn ibm_to_f64(bytes: [u8; 4]) -> f64 {
    let bits = u32::from_be_bytes(bytes);
    let fraction = bits & FRACTION_MASK;
    if fraction == 0 {
        return 0.0;
    }
    let exponent = ((bits >> 24) & 0x7F) as i32 - EXPONENT_BIAS;
    let magnitude = fraction as f64 / FRACTION_SCALE * 16f64.powi(exponent);
    if bits & SIGN_MASK != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Decode 4 big-endian bytes of IBM float into an `f32`.
///
/// Magnitudes beyond the `f32` range saturate to infinity, very small ones
/// flush towards zero.
pub fn ibm_to_f32(bytes: [u8; 4]) -> f32 {
    ibm_to_f64(bytes) as f32
}

/// Encode an `f64` as 4 big-endian bytes of IBM float.
///
/// The fraction is rounded to 24 bits. Out-of-range magnitudes saturate to
/// the largest IBM value, values below the smallest normalized IBM value
/// become zero, and NaN encodes as zero.
pub fn f64_to_ibm(value: f64) -> [u8; 4] {
    if value == 0.0 || value.is_nan() {
        return [0; 4];
    }
    let sign = if value < 0.0 { SIGN_MASK } else { 0 };
    let mut magnitude = value.abs();
    if magnitude.is_infinite() {
        return (sign | 0x7FFF_FFFF).to_be_bytes();
    }

    // Normalize to 1/16 <= magnitude < 1.
    let mut exponent: i32 = 0;
    while magnitude >= 1.0 {
        magnitude /= 16.0;
        exponent += 1;
    }
    while magnitude < 1.0 / 16.0 {
        magnitude *= 16.0;
        exponent -= 1;
    }

    let mut fraction = (magnitude * FRACTION_SCALE).round() as u32;
    if fraction > FRACTION_MASK {
        fraction >>= 4;
        exponent += 1;
    }

    let biased = exponent + EXPONENT_BIAS;
    if biased > 0x7F {
        return (sign | 0x7FFF_FFFF).to_be_bytes();
    }
    if biased < 0 {
        return [0; 4];
    }
    (sign | ((biased as u32) << 24) | fraction).to_be_bytes()
}
