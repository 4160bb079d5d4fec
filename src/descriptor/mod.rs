//! Property Descriptors
//!
//! This module defines the capability declaration attached to a property
//! code: how its EDT payload maps to symbolic names (aliases), numbers, or
//! strings, and which of those directions support writing. Descriptors are
//! loaded from the property-description catalog and are immutable afterwards.
//!
//! # Overview
//!
//! A descriptor declares zero or more of:
//!
//! - **Aliases**: symbolic names bound to exact EDT byte patterns, used to
//!   present enumerated values ("on", "cooling") as readable text, with an
//!   optional translation table for the alternate locale.
//! - **Numeric range**: minimum, maximum, storage offset, unit and encoded
//!   length for number-valued properties.
//! - **String form**: length constraints for free-form UTF-8 properties.
//!
//! The declared set doubles as the property's write capability: a property
//! with no alias table, no numeric range and no string support cannot be
//! written at all, regardless of what the device's set-property map says.
//!
//! # Examples
//!
//! ```
//! use echonet_rs::descriptor::PropertyDescriptor;
//!
//! let mut desc = PropertyDescriptor::new("Operation status");
//! desc.add_alias("on", [0x30]);
//! desc.add_alias("off", [0x31]);
//!
//! assert_eq!(desc.alias_for_edt(&[0x30]), Some("on"));
//! assert_eq!(desc.edt_for_alias("off").unwrap(), &[0x31]);
//! assert!(desc.is_writable());
//! ```

use core::fmt;

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use bitflags::bitflags;

use crate::util;

/// Result type for alias lookups
pub type Result<T> = core::result::Result<T, AliasError>;

/// Errors that can occur when resolving aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    /// Requested alias is absent from the descriptor
    UnknownAlias(String),
}

impl fmt::Display for AliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasError::UnknownAlias(name) => write!(f, "Unknown alias: {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl Error for AliasError {}

bitflags! {
    /// The capability set a descriptor declares for a property
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropertyCapabilities: u8 {
        /// Free-form string writes are accepted
        const STRING_SETTABLE = 0b0000_0001;
        /// A numeric range descriptor is declared
        const NUMERIC = 0b0000_0010;
        /// A named alias set is declared
        const ALIASED = 0b0000_0100;
    }
}

/// Exact byte-for-byte comparison between an alias pattern and an EDT payload.
///
/// Aliases are matched by value, never by position; callers that hold the
/// pattern in its base64 text form must decode it first and treat a decode
/// failure as a non-match rather than an error.
pub fn alias_matches(pattern: &[u8], edt: &[u8]) -> bool {
    pattern == edt
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(feature = "serde")]
fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Numeric range declaration for a number-valued property
///
/// `offset` is the value stored in the EDT when the logical value is zero; it
/// is applied by the EDT-level codec below and never by display formatting,
/// which treats a transmitted number as already user-facing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct NumberDesc {
    pub min: i32,
    pub max: i32,
    pub offset: i32,
    /// Unit suffix (e.g. "°C", "%", "W"); empty when the value is unitless
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub unit: String,
    /// Encoded length in bytes; zero means the default of one
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_zero"))]
    pub edt_len: usize,
}

impl NumberDesc {
    /// The encoded length, with zero meaning one byte
    pub fn effective_edt_len(&self) -> usize {
        if self.edt_len == 0 {
            1
        } else {
            self.edt_len
        }
    }

    /// Decode an EDT payload into the logical value and unit.
    ///
    /// The payload must have exactly the declared length; the stored offset
    /// is subtracted and the result range-checked. Ranges with a negative
    /// minimum are decoded as signed two's complement.
    pub fn to_int(&self, edt: &[u8]) -> Option<(i32, &str)> {
        if edt.len() != self.effective_edt_len() {
            return None;
        }

        let stored = if self.min >= 0 {
            util::decode_unsigned_be(edt)? as i64
        } else {
            util::decode_signed_be(edt)? as i64
        };
        let value = stored - self.offset as i64;

        if value >= self.min as i64 && value <= self.max as i64 {
            Some((value as i32, self.unit.as_str()))
        } else {
            None
        }
    }

    /// Encode a logical value into its EDT payload, or `None` if out of range
    pub fn from_int(&self, value: i32) -> Option<Vec<u8>> {
        if value < self.min || value > self.max {
            return None;
        }
        let stored = value as i64 + self.offset as i64;
        util::encode_unsigned_be(stored as u32, self.effective_edt_len())
    }

    /// Render an EDT payload as `"{number}{unit}"`
    pub fn to_text(&self, edt: &[u8]) -> Option<String> {
        self.to_int(edt)
            .map(|(value, unit)| format!("{}{}", value, unit))
    }

    /// Parse `"{number}{unit}"` (unit optional) back into an EDT payload
    pub fn from_text(&self, text: &str) -> Option<Vec<u8>> {
        let digits = text.strip_suffix(self.unit.as_str()).unwrap_or(text);
        let value: i32 = digits.parse().ok()?;
        self.from_int(value)
    }
}

/// Length constraints for a free-form UTF-8 string property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringDesc {
    /// Shorter strings are padded with NUL bytes up to this length
    #[cfg_attr(
        feature = "serde",
        serde(rename = "minEDTLen", default, skip_serializing_if = "is_zero")
    )]
    pub min_edt_len: usize,
    /// Longest accepted EDT; zero means unlimited
    #[cfg_attr(
        feature = "serde",
        serde(rename = "maxEDTLen", default, skip_serializing_if = "is_zero")
    )]
    pub max_edt_len: usize,
}

impl StringDesc {
    /// Decode an EDT payload into text.
    ///
    /// Payloads at or below the declared minimum length are cut at the first
    /// NUL byte (padding); invalid UTF-8 is replaced rather than rejected.
    pub fn to_text(&self, edt: &[u8]) -> Option<String> {
        let mut bytes = edt;
        if self.min_edt_len > 0 && edt.len() <= self.min_edt_len {
            if let Some(nul) = bytes.iter().position(|&b| b == 0) {
                bytes = &bytes[..nul];
            }
        }
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Encode text into an EDT payload, NUL-padding up to the minimum length
    pub fn from_text(&self, text: &str) -> Option<Vec<u8>> {
        if text.is_empty() {
            return None;
        }
        let edt = text.as_bytes();
        if edt.len() < self.min_edt_len {
            let mut padded = vec![0u8; self.min_edt_len];
            padded[..edt.len()].copy_from_slice(edt);
            return Some(padded);
        }
        if self.max_edt_len > 0 && edt.len() > self.max_edt_len {
            return None;
        }
        Some(edt.to_vec())
    }
}

/// Capability declaration for one property code
///
/// Field names mirror the catalog wire shape: `stringSettable`, `numberDesc`,
/// `stringDesc`, `aliases` (name to base64 pattern), `aliasTranslations`
/// (name to alternate-locale text).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PropertyDescriptor {
    /// Human-readable property name (default locale)
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Whether free-form string writes are accepted
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub string_settable: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub number_desc: Option<NumberDesc>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub string_desc: Option<StringDesc>,
    /// Symbolic names bound to exact EDT byte patterns
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "BTreeMap::is_empty",
            with = "alias_patterns"
        )
    )]
    pub aliases: BTreeMap<String, Vec<u8>>,
    /// Alias name to display text for the alternate locale
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub alias_translations: BTreeMap<String, String>,
}

impl PropertyDescriptor {
    /// Create a descriptor with a description and no capabilities
    pub fn new(description: impl Into<String>) -> Self {
        PropertyDescriptor {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Add an alias binding a symbolic name to an EDT byte pattern
    pub fn add_alias(&mut self, name: impl Into<String>, pattern: impl Into<Vec<u8>>) {
        self.aliases.insert(name.into(), pattern.into());
    }

    /// Add an alternate-locale translation for an alias name
    pub fn add_translation(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.alias_translations.insert(name.into(), text.into());
    }

    /// The declared capability set
    pub fn capabilities(&self) -> PropertyCapabilities {
        let mut caps = PropertyCapabilities::empty();
        if self.string_settable {
            caps |= PropertyCapabilities::STRING_SETTABLE;
        }
        if self.number_desc.is_some() {
            caps |= PropertyCapabilities::NUMERIC;
        }
        if !self.aliases.is_empty() {
            caps |= PropertyCapabilities::ALIASED;
        }
        caps
    }

    /// Whether the property declares any write capability at all
    pub fn is_writable(&self) -> bool {
        !self.capabilities().is_empty()
    }

    /// The EDT byte pattern bound to an alias name
    pub fn edt_for_alias(&self, name: &str) -> Result<&[u8]> {
        self.aliases
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AliasError::UnknownAlias(name.to_string()))
    }

    /// The first alias whose pattern matches the EDT payload exactly
    pub fn alias_for_edt(&self, edt: &[u8]) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, pattern)| alias_matches(pattern, edt))
            .map(|(name, _)| name.as_str())
    }

    /// Render an EDT payload as text: aliases first, then the numeric codec,
    /// then the string codec. `None` when no declared form applies.
    pub fn decode_text(&self, edt: &[u8]) -> Option<String> {
        if let Some(name) = self.alias_for_edt(edt) {
            return Some(name.to_string());
        }
        if let Some(number) = &self.number_desc {
            if let Some(text) = number.to_text(edt) {
                return Some(text);
            }
        }
        if let Some(string) = &self.string_desc {
            return string.to_text(edt);
        }
        None
    }

    /// Encode user text into an EDT payload, trying aliases, then the numeric
    /// codec, then the string codec
    pub fn edt_for_text(&self, text: &str) -> Option<Vec<u8>> {
        if let Ok(pattern) = self.edt_for_alias(text) {
            return Some(pattern.to_vec());
        }
        if let Some(number) = &self.number_desc {
            if let Some(edt) = number.from_text(text) {
                return Some(edt);
            }
        }
        if let Some(string) = &self.string_desc {
            if let Some(edt) = string.from_text(text) {
                return Some(edt);
            }
        }
        None
    }
}

/// Serde adapter storing alias patterns as base64 text, the catalog wire form
#[cfg(feature = "serde")]
mod alias_patterns {
    #[cfg(not(feature = "std"))]
    use alloc::{
        collections::BTreeMap,
        string::String,
        vec::Vec,
    };
    #[cfg(feature = "std")]
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (name, pattern) in map {
            out.serialize_entry(name, &crate::encoding::encode_edt(pattern))?;
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        let text = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for (name, pattern) in text {
            let bytes = crate::encoding::decode_edt(&pattern).map_err(D::Error::custom)?;
            map.insert(name, bytes);
        }
        Ok(map)
    }
}
