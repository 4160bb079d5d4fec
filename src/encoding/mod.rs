//! ECHONET Lite Encoding/Decoding Module
//!
//! This module provides the wire-level codecs of the property model: the
//! base64 text form in which EDT payloads travel, and the two property-map
//! encodings devices use to advertise which property codes they expose.
//!
//! # Overview
//!
//! The encoding module is responsible for:
//! - Converting EDT payloads to/from their base64 text form
//! - Decoding property maps (direct-list and bitmap formats)
//! - Encoding property maps back to their wire form
//! - The well-known map-bearing property codes
//!
//! # Property map wire format
//!
//! A property map is the set of property codes (0x80-0xFF) a device exposes
//! for one purpose. The first byte is the declared element count `n`:
//!
//! 1. `n < 16`: the following `n` bytes are the property codes themselves.
//! 2. `n >= 16`: the following 16 bytes are a 128-bit bitmap. Bit `j` of
//!    byte `i` represents code `0x80 + i + (j << 4)`: the low nibble of the
//!    code selects the byte, the high nibble (minus 8) selects the bit.
//!
//! # Example
//!
//! ```
//! use echonet_rs::encoding::PropertyMap;
//! use echonet_rs::object::Epc;
//!
//! let map = PropertyMap::decode(&[0x02, 0x80, 0x9E]).unwrap();
//! assert!(map.contains(Epc(0x80)));
//! assert_eq!(map.len(), 2);
//! ```

use core::fmt;

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(feature = "std")]
use std::collections::BTreeSet;

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeSet, string::String, vec, vec::Vec};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::object::Epc;

/// Result type for encoding operations
pub type Result<T> = core::result::Result<T, EncodingError>;

/// Errors that can occur during encoding/decoding operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Property map payload is empty or too short for its declared format
    MalformedMap,
    /// EDT text is not valid base64
    InvalidEdt,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::MalformedMap => write!(f, "Malformed property map"),
            EncodingError::InvalidEdt => write!(f, "Invalid EDT text encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for EncodingError {}

/// Encode an EDT payload as the base64 text form used on the wire
pub fn encode_edt(edt: &[u8]) -> String {
    BASE64.encode(edt)
}

/// Decode the base64 text form of an EDT payload
pub fn decode_edt(text: &str) -> Result<Vec<u8>> {
    BASE64.decode(text).map_err(|_| EncodingError::InvalidEdt)
}

/// Element count at which the bitmap format replaces the direct list
pub const PROPERTY_MAP_LIST_MAX: usize = 16;

/// Length in bytes of the bitmap that follows the count byte
pub const PROPERTY_MAP_BITMAP_LEN: usize = 16;

/// The three well-known map-bearing properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Properties announced on status change (EPC 0x9D)
    StatusAnnouncement,
    /// Properties accepting writes (EPC 0x9E)
    Set,
    /// Properties accepting reads (EPC 0x9F)
    Get,
}

impl MapKind {
    /// The property code carrying this map on a device
    pub fn epc(&self) -> Epc {
        match self {
            MapKind::StatusAnnouncement => Epc::STATUS_ANNOUNCEMENT_MAP,
            MapKind::Set => Epc::SET_PROPERTY_MAP,
            MapKind::Get => Epc::GET_PROPERTY_MAP,
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKind::StatusAnnouncement => write!(f, "Status announcement property map"),
            MapKind::Set => write!(f, "Set property map"),
            MapKind::Get => write!(f, "Get property map"),
        }
    }
}

/// A decoded property map: a sorted, deduplicated set of property codes
///
/// Decoded fresh from each incoming property update and replaced wholesale,
/// never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    codes: BTreeSet<Epc>,
}

impl PropertyMap {
    /// Create an empty property map
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a property map from its wire form.
    ///
    /// An empty buffer fails with [`EncodingError::MalformedMap`]. In the
    /// direct-list format a declared count larger than the remaining bytes is
    /// tolerated (devices report oversized counts during truncated reads) and
    /// the codes actually present are returned. In the bitmap format fewer
    /// than 16 trailing bytes is a hard failure; extra trailing bytes are
    /// ignored.
    pub fn decode(data: &[u8]) -> Result<PropertyMap> {
        let (&count, rest) = data.split_first().ok_or(EncodingError::MalformedMap)?;
        let declared = count as usize;
        let mut codes = BTreeSet::new();

        if declared < PROPERTY_MAP_LIST_MAX {
            let available = rest.len().min(declared);
            if available < declared {
                log::debug!(
                    "property map declares {} codes but carries {}; keeping what is present",
                    declared,
                    available
                );
            }
            for &code in &rest[..available] {
                codes.insert(Epc(code));
            }
        } else {
            if rest.len() < PROPERTY_MAP_BITMAP_LEN {
                return Err(EncodingError::MalformedMap);
            }
            for (i, &byte) in rest[..PROPERTY_MAP_BITMAP_LEN].iter().enumerate() {
                for j in 0..8u8 {
                    if byte & (1 << j) != 0 {
                        codes.insert(Epc(0x80 + i as u8 + (j << 4)));
                    }
                }
            }
        }

        Ok(PropertyMap { codes })
    }

    /// Decode a property map from the base64 text form of its EDT
    pub fn decode_edt_text(text: &str) -> Result<PropertyMap> {
        PropertyMap::decode(&decode_edt(text)?)
    }

    /// Encode the map to its wire form.
    ///
    /// Fewer than 16 codes produce the direct list; 16 or more produce the
    /// count byte followed by the 128-bit bitmap. Codes outside the standard
    /// range cannot be represented in the bitmap and are skipped with a
    /// warning.
    pub fn encode(&self) -> Vec<u8> {
        if self.codes.len() < PROPERTY_MAP_LIST_MAX {
            let mut out = Vec::with_capacity(1 + self.codes.len());
            out.push(self.codes.len() as u8);
            for epc in &self.codes {
                out.push(epc.0);
            }
            return out;
        }

        let mut out = vec![0u8; 1 + PROPERTY_MAP_BITMAP_LEN];
        out[0] = self.codes.len() as u8;
        for epc in &self.codes {
            if !epc.is_standard() {
                log::warn!("property code {} is below 0x80 and has no bitmap slot", epc);
                continue;
            }
            out[1 + (epc.0 & 0x0F) as usize] |= 1 << ((epc.0 >> 4) - 8);
        }
        out
    }

    /// Check whether a property code is present
    pub fn contains(&self, epc: Epc) -> bool {
        self.codes.contains(&epc)
    }

    /// Add a property code
    pub fn insert(&mut self, epc: Epc) {
        self.codes.insert(epc);
    }

    /// Remove a property code
    pub fn remove(&mut self, epc: Epc) {
        self.codes.remove(&epc);
    }

    /// Number of property codes in the map
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate the codes in canonical (ascending) order
    pub fn iter(&self) -> impl Iterator<Item = Epc> + '_ {
        self.codes.iter().copied()
    }

    /// The codes as a sorted vector
    pub fn epcs(&self) -> Vec<Epc> {
        self.codes.iter().copied().collect()
    }
}

impl FromIterator<Epc> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = Epc>>(iter: I) -> Self {
        PropertyMap {
            codes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PropertyMap {
    /// Codes in canonical text order, e.g. `[80, 9D, 9E, 9F]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, epc) in self.codes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", epc)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    #[test]
    fn test_decode_empty_is_malformed() {
        assert_eq!(PropertyMap::decode(&[]), Err(EncodingError::MalformedMap));
    }

    #[test]
    fn test_decode_direct_list() {
        let map = PropertyMap::decode(&[0x03, 0x80, 0x9E, 0x80]).unwrap();
        assert_eq!(map.epcs(), [Epc(0x80), Epc(0x9E)]);
    }

    #[test]
    fn test_decode_direct_list_tolerates_truncation() {
        // Count claims five codes but only two follow
        let map = PropertyMap::decode(&[0x05, 0x80, 0x81]).unwrap();
        assert_eq!(map.epcs(), [Epc(0x80), Epc(0x81)]);
    }

    #[test]
    fn test_decode_bitmap_boundary_bits() {
        let mut data = [0u8; 17];
        data[0] = 20;
        data[1] = 0x01; // byte 0 bit 0 -> 0x80
        data[2] = 0x01; // byte 1 bit 0 -> 0x81
        let map = PropertyMap::decode(&data).unwrap();
        assert_eq!(map.epcs(), [Epc(0x80), Epc(0x81)]);

        let mut data = [0u8; 17];
        data[0] = 16;
        data[1] = 0x02; // byte 0 bit 1 -> 0x90
        data[16] = 0x80; // byte 15 bit 7 -> 0xFF
        let map = PropertyMap::decode(&data).unwrap();
        assert_eq!(map.epcs(), [Epc(0x90), Epc(0xFF)]);
    }

    #[test]
    fn test_decode_bitmap_short_payload_is_malformed() {
        let mut data = vec![20u8];
        data.extend_from_slice(&[0xFF; 15]);
        assert_eq!(PropertyMap::decode(&data), Err(EncodingError::MalformedMap));
    }

    #[test]
    fn test_decode_bitmap_ignores_trailing_bytes() {
        let mut data = vec![16u8];
        data.extend_from_slice(&[0x01; 16]);
        data.push(0xAA);
        let map = PropertyMap::decode(&data).unwrap();
        assert_eq!(map.len(), 16);
    }

    #[test]
    fn test_encode_direct_list_is_sorted() {
        let map: PropertyMap = [Epc(0x9E), Epc(0x80), Epc(0x88)].into_iter().collect();
        assert_eq!(map.encode(), vec![0x03, 0x80, 0x88, 0x9E]);
    }

    #[test]
    fn test_encode_decode_roundtrip_bitmap() {
        let map: PropertyMap = (0x80..0x80 + 20).map(Epc).collect();
        let encoded = map.encode();
        assert_eq!(encoded.len(), 1 + PROPERTY_MAP_BITMAP_LEN);
        assert_eq!(encoded[0], 20);
        assert_eq!(PropertyMap::decode(&encoded).unwrap(), map);
    }

    #[test]
    fn test_edt_text_roundtrip() {
        let edt = [0x02u8, 0x80, 0x9E];
        let text = encode_edt(&edt);
        assert_eq!(decode_edt(&text).unwrap(), edt);
        let map = PropertyMap::decode_edt_text(&text).unwrap();
        assert!(map.contains(Epc(0x9E)));
    }

    #[test]
    fn test_decode_edt_rejects_bad_text() {
        assert_eq!(decode_edt("not base64!"), Err(EncodingError::InvalidEdt));
    }

    #[test]
    fn test_map_kind_codes() {
        assert_eq!(MapKind::StatusAnnouncement.epc(), Epc(0x9D));
        assert_eq!(MapKind::Set.epc(), Epc(0x9E));
        assert_eq!(MapKind::Get.epc(), Epc(0x9F));
    }

    #[test]
    fn test_display() {
        let map: PropertyMap = [Epc(0x9E), Epc(0x80)].into_iter().collect();
        assert_eq!(map.to_string(), "[80, 9E]");
    }
}
