//! Legacy EBCDIC text conversion for the 3200-byte textual header.
//!
//! Only a small subset is mapped: space, digits, letters, hyphen and colon.
//! Decoding covers every byte of the header and renders anything outside the
//! subset as `.`; encoding only touches the first card image (80 columns),
//! leaving the rest of the block at the EBCDIC space fill.

use crate::types::TEXTUAL_HEADER_LEN;

/// EBCDIC space, also the fill byte of a freshly encoded header.
pub const EBCDIC_SPACE: u8 = 0x40;

/// Characters per card image line.
pub const LINE_LEN: usize = 80;

/// Number of card image lines in a textual header.
pub const LINE_COUNT: usize = TEXTUAL_HEADER_LEN / LINE_LEN;

/// Number of leading characters `encode` will write.
const ENCODE_LIMIT: usize = LINE_LEN;

/// Byte -> ASCII lookup for the supported subset, `.` elsewhere.
const DECODE_TABLE: [u8; 256] = {
    let mut table = [b'.'; 256];
    table[0x40] = b' ';
    table[0x60] = b'-';
    table[0x7A] = b':';
    // a-z
    let mut b = 0x81;
    while b <= 0x9A {
        table[b] = (b - 32) as u8;
        b += 1;
    }
    // A-Z
    b = 0xC1;
    while b <= 0xDA {
        table[b] = (b - 128) as u8;
        b += 1;
    }
    // 0-9
    b = 0xF0;
    while b <= 0xF9 {
        table[b] = (b - 0xF0) as u8 + b'0';
        b += 1;
    }
    table
};

/// Decode a single EBCDIC byte.
pub fn decode_byte(byte: u8) -> char {
    DECODE_TABLE[byte as usize] as char
}

/// Decode every byte of `bytes` into a flat string, one char per byte.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| decode_byte(b)).collect()
}

/// Encode a single character, `None` if it is outside the supported subset.
/// Lowercase letters fold onto the uppercase codes.
pub fn encode_char(ch: char) -> Option<u8> {
    match ch {
        ' ' => Some(EBCDIC_SPACE),
        '0'..='9' => Some(ch as u8 - b'0' + 0xF0),
        'A'..='Z' => Some(ch as u8 + 128),
        'a'..='z' => Some(ch as u8 - 32 + 128),
        '-' => Some(0x60),
        ':' => Some(0x7A),
        _ => None,
    }
}

/// Overwrite the leading bytes of `dest` with the encoded form of `text`.
///
/// At most the first 80 characters are considered. Unsupported characters
/// leave the destination byte untouched.
pub fn encode_into(dest: &mut [u8], text: &str) {
    for (slot, ch) in dest.iter_mut().zip(text.chars().take(ENCODE_LIMIT)) {
        if let Some(byte) = encode_char(ch) {
            *slot = byte;
        }
    }
}

/// Encode `text` into a full space-filled textual header block.
pub fn encode(text: &str) -> [u8; TEXTUAL_HEADER_LEN] {
    let mut block = [EBCDIC_SPACE; TEXTUAL_HEADER_LEN];
    encode_into(&mut block, text);
    block
}

/// Split a decoded header into 80-character card image lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(LINE_LEN)
        .map(|line| line.iter().collect())
        .collect()
}
