//! Conversion between host text and engine byte buffers.
//!
//! Two representations exist, both keyed to UTF-16 code units because that
//! is what the surface this crate replaces marshalled:
//!
//! - **binary**: one code unit per byte, low 8 bits. A binary string is a
//!   `String` whose chars are all `U+0000..=U+00FF`; it round-trips
//!   arbitrary byte payloads losslessly, embedded zero bytes included.
//! - **utf8**: 1/2/3 bytes per code unit by magnitude. Supplementary-plane
//!   characters travel as their surrogate pair, one 3-byte sequence per
//!   half, and are recombined on decode. 4-byte sequences are not part of
//!   the format.
//!
//! The decoder stops at the first zero byte or at the end of the region,
//! whichever comes first.

use crate::arena::{Region, ScratchArena};

/// A byte sequence that is not decodable text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("unsupported lead byte 0x{byte:02x} at offset {offset}")]
    UnsupportedLeadByte { byte: u8, offset: usize },

    #[error("invalid continuation byte 0x{byte:02x} at offset {offset}")]
    InvalidContinuation { byte: u8, offset: usize },

    #[error("truncated multi-byte sequence at offset {offset}")]
    TruncatedSequence { offset: usize },

    #[error("unpaired surrogate in decoded text")]
    UnpairedSurrogate,
}

/// Encode text as one byte per UTF-16 code unit, keeping the low 8 bits.
///
/// Lossless for binary strings; code units above `0xFF` are truncated, so
/// callers must only pass text produced by [`decode_binary`] or built from
/// `U+00..U+FF` chars.
pub fn encode_binary<'a>(arena: &'a ScratchArena, text: &str) -> Region<'a> {
    let mut region = arena.alloc(text.encode_utf16().count());
    for (slot, unit) in region.iter_mut().zip(text.encode_utf16()) {
        *slot = unit as u8;
    }
    region
}

/// Decode a byte buffer as a binary string, one char per byte value.
pub fn decode_binary(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn utf8_unit_len(unit: u16) -> usize {
    if unit <= 0x7f {
        1
    } else if unit <= 0x7ff {
        2
    } else {
        3
    }
}

/// Encode text as UTF-8, 1/2/3 bytes per UTF-16 code unit.
pub fn encode_utf8<'a>(arena: &'a ScratchArena, text: &str) -> Region<'a> {
    let len = text.encode_utf16().map(utf8_unit_len).sum();
    let mut region = arena.alloc(len);
    let mut at = 0;
    for unit in text.encode_utf16() {
        match utf8_unit_len(unit) {
            1 => {
                region[at] = unit as u8;
                at += 1;
            }
            2 => {
                region[at] = 0xc0 | (unit >> 6) as u8;
                region[at + 1] = 0x80 | (unit & 0x3f) as u8;
                at += 2;
            }
            _ => {
                region[at] = 0xe0 | (unit >> 12) as u8;
                region[at + 1] = 0x80 | ((unit >> 6) & 0x3f) as u8;
                region[at + 2] = 0x80 | (unit & 0x3f) as u8;
                at += 3;
            }
        }
    }
    region
}

fn continuation(bytes: &[u8], offset: usize) -> Result<u16, CodecError> {
    match bytes.get(offset) {
        None => Err(CodecError::TruncatedSequence { offset }),
        Some(&b) if b & 0xc0 == 0x80 => Ok(u16::from(b & 0x3f)),
        Some(&b) => Err(CodecError::InvalidContinuation { byte: b, offset }),
    }
}

/// Decode a UTF-8 byte buffer, stopping at the first zero byte.
///
/// Surrogate pairs split across two 3-byte sequences are recombined; an
/// unpaired half is rejected.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, CodecError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut at = 0;
    while at < bytes.len() {
        let lead = bytes[at];
        if lead == 0 {
            break;
        }
        if lead & 0x80 == 0 {
            units.push(u16::from(lead));
            at += 1;
        } else if lead & 0xe0 == 0xc0 {
            let low = continuation(bytes, at + 1)?;
            units.push((u16::from(lead & 0x1f) << 6) | low);
            at += 2;
        } else if lead & 0xf0 == 0xe0 {
            let mid = continuation(bytes, at + 1)?;
            let low = continuation(bytes, at + 2)?;
            units.push((u16::from(lead & 0x0f) << 12) | (mid << 6) | low);
            at += 3;
        } else {
            return Err(CodecError::UnsupportedLeadByte {
                byte: lead,
                offset: at,
            });
        }
    }
    String::from_utf16(&units).map_err(|_| CodecError::UnpairedSurrogate)
}
