//! Utility Functions Module
//!
//! Common helpers used throughout the ECHONET Lite property codec: fixed-width
//! big-endian integer conversions for EDT payloads and the uppercase hex text
//! form used for raw value display.
//!
//! # Example
//!
//! ```
//! use echonet_rs::util::*;
//!
//! let bytes = encode_unsigned_be(0x0130, 2).unwrap();
//! assert_eq!(bytes, vec![0x01, 0x30]);
//! assert_eq!(decode_unsigned_be(&bytes), Some(0x0130));
//! ```

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Largest EDT integer width handled by the conversion helpers
pub const MAX_INT_WIDTH: usize = 4;

/// Encode an unsigned integer as `width` big-endian bytes.
///
/// Only the low `width` bytes of `value` are written; higher bytes are
/// discarded, which also yields the two's-complement encoding when callers
/// pass a negative value cast to `u32`. Returns `None` for a width outside
/// 1..=4.
pub fn encode_unsigned_be(value: u32, width: usize) -> Option<Vec<u8>> {
    if width == 0 || width > MAX_INT_WIDTH {
        return None;
    }

    let mut bytes = Vec::with_capacity(width);
    for i in 0..width {
        let shift = ((width - 1 - i) * 8) as u32;
        bytes.push((value >> shift) as u8);
    }

    Some(bytes)
}

/// Decode 1-4 big-endian bytes as an unsigned integer.
pub fn decode_unsigned_be(data: &[u8]) -> Option<u32> {
    if data.is_empty() || data.len() > MAX_INT_WIDTH {
        return None;
    }

    let mut value: u32 = 0;
    for &byte in data {
        value = (value << 8) | byte as u32;
    }

    Some(value)
}

/// Decode 1-4 big-endian bytes as a sign-extended signed integer.
pub fn decode_signed_be(data: &[u8]) -> Option<i32> {
    if data.is_empty() || data.len() > MAX_INT_WIDTH {
        return None;
    }

    let mut value: i32 = if data[0] & 0x80 != 0 { -1 } else { 0 };
    for &byte in data {
        value = (value << 8) | byte as i32;
    }

    Some(value)
}

/// Render bytes as uppercase hex text, the form used for raw EDT display
pub fn hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn test_unsigned_roundtrip() {
        for width in 1..=4 {
            let encoded = encode_unsigned_be(0x42, width).unwrap();
            assert_eq!(encoded.len(), width);
            assert_eq!(decode_unsigned_be(&encoded), Some(0x42));
        }
    }

    #[test]
    fn test_unsigned_truncates_high_bytes() {
        assert_eq!(encode_unsigned_be(0x0130, 1).unwrap(), vec![0x30]);
        assert_eq!(encode_unsigned_be(0x0001_0000, 2).unwrap(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_invalid_widths() {
        assert_eq!(encode_unsigned_be(1, 0), None);
        assert_eq!(encode_unsigned_be(1, 5), None);
        assert_eq!(decode_unsigned_be(&[]), None);
        assert_eq!(decode_unsigned_be(&[0; 5]), None);
    }

    #[test]
    fn test_signed_sign_extension() {
        assert_eq!(decode_signed_be(&[0xFF]), Some(-1));
        assert_eq!(decode_signed_be(&[0x81]), Some(-127));
        assert_eq!(decode_signed_be(&[0x7D]), Some(125));
        assert_eq!(decode_signed_be(&[0xFF, 0xFB]), Some(-5));
        assert_eq!(decode_signed_be(&[0x00, 0xFF]), Some(255));
    }

    #[test]
    fn test_signed_roundtrip_via_truncation() {
        // -5 stored in one byte is the two's-complement 0xFB
        let encoded = encode_unsigned_be(-5i32 as u32, 1).unwrap();
        assert_eq!(encoded, vec![0xFB]);
        assert_eq!(decode_signed_be(&encoded), Some(-5));
    }

    #[test]
    fn test_hex_upper() {
        assert_eq!(hex_upper(&[0x30]), "30");
        assert_eq!(hex_upper(&[0xDE, 0xAD, 0x01]), "DEAD01");
        assert_eq!(hex_upper(&[]), "");
    }
}
