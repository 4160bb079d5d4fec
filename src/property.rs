//! Property Values and Display Formatting
//!
//! This module defines the typed property value, the decoded form of a raw
//! EDT payload, and the formatter that turns one into a human-presentable
//! string using the property's descriptor and the active locale.
//!
//! A value carries at most one of a symbolic string or a number, plus the
//! opaque EDT bytes as a fallback representation. The constructors enforce
//! that invariant; a value with only EDT bytes is the raw/unresolved state,
//! rendered as [`UNRESOLVED_SENTINEL`] and paired with a hex view in the UI.

use core::fmt;

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::descriptor::PropertyDescriptor;
use crate::encoding;
use crate::util;

/// Marker string returned when a value resolves to neither a symbolic name
/// nor a number; the UI pairs it with a hex view rather than an error
pub const UNRESOLVED_SENTINEL: &str = "(unresolved)";

/// The two-value locale signal gating alias translation
///
/// Only formatting consults it; decoding and settability never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Default,
    Alternate,
}

/// Errors that can occur constructing a typed value from its wire shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The wire value populated both the string and the number field
    Conflicting,
    /// The EDT field is not valid base64
    InvalidEdt,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::Conflicting => {
                write!(f, "Wire value carries both a string and a number")
            }
            ValueError::InvalidEdt => write!(f, "Invalid EDT text encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for ValueError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ValueRepr {
    Text(String),
    Number(i32),
}

/// Typed property value: at most one of a symbolic string or a number, plus
/// optional opaque EDT bytes as the fallback representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyValue {
    repr: Option<ValueRepr>,
    edt: Option<Vec<u8>>,
}

impl PropertyValue {
    /// A symbolic string value
    pub fn text(value: impl Into<String>) -> Self {
        PropertyValue {
            repr: Some(ValueRepr::Text(value.into())),
            edt: None,
        }
    }

    /// A numeric value
    pub fn number(value: i32) -> Self {
        PropertyValue {
            repr: Some(ValueRepr::Number(value)),
            edt: None,
        }
    }

    /// An unresolved value carrying only its raw EDT bytes
    pub fn raw(edt: impl Into<Vec<u8>>) -> Self {
        PropertyValue {
            repr: None,
            edt: Some(edt.into()),
        }
    }

    /// A symbolic string value that keeps its raw EDT bytes
    pub fn text_with_edt(value: impl Into<String>, edt: impl Into<Vec<u8>>) -> Self {
        PropertyValue {
            repr: Some(ValueRepr::Text(value.into())),
            edt: Some(edt.into()),
        }
    }

    /// A numeric value that keeps its raw EDT bytes
    pub fn number_with_edt(value: i32, edt: impl Into<Vec<u8>>) -> Self {
        PropertyValue {
            repr: Some(ValueRepr::Number(value)),
            edt: Some(edt.into()),
        }
    }

    /// The symbolic string, if this value carries one
    pub fn as_text(&self) -> Option<&str> {
        match &self.repr {
            Some(ValueRepr::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The number, if this value carries one
    pub fn as_number(&self) -> Option<i32> {
        match self.repr {
            Some(ValueRepr::Number(value)) => Some(value),
            _ => None,
        }
    }

    /// The raw EDT bytes, if present
    pub fn edt(&self) -> Option<&[u8]> {
        self.edt.as_deref()
    }

    /// True when the value carries neither a string nor a number
    pub fn is_raw(&self) -> bool {
        self.repr.is_none()
    }
}

/// The wire shape of an encoded value: `{ string?, number?, EDT? }`
///
/// At most one of `string`/`number` is populated by the transport; `EDT` is
/// the base64 text of the raw payload and may co-occur with either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedValue {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub string: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub number: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "EDT", default, skip_serializing_if = "Option::is_none")
    )]
    pub edt: Option<String>,
}

impl TryFrom<EncodedValue> for PropertyValue {
    type Error = ValueError;

    fn try_from(value: EncodedValue) -> Result<Self, ValueError> {
        let edt = match &value.edt {
            Some(text) => {
                Some(encoding::decode_edt(text).map_err(|_| ValueError::InvalidEdt)?)
            }
            None => None,
        };

        let repr = match (value.string, value.number) {
            (Some(_), Some(_)) => return Err(ValueError::Conflicting),
            (Some(text), None) => Some(ValueRepr::Text(text)),
            (None, Some(number)) => Some(ValueRepr::Number(number)),
            (None, None) => None,
        };

        Ok(PropertyValue { repr, edt })
    }
}

impl From<&PropertyValue> for EncodedValue {
    fn from(value: &PropertyValue) -> Self {
        EncodedValue {
            string: value.as_text().map(ToString::to_string),
            number: value.as_number(),
            edt: value.edt().map(encoding::encode_edt),
        }
    }
}

fn translate<'a>(descriptor: &'a PropertyDescriptor, name: &'a str, locale: Locale) -> &'a str {
    match locale {
        Locale::Alternate => descriptor
            .alias_translations
            .get(name)
            .map(String::as_str)
            .unwrap_or(name),
        Locale::Default => name,
    }
}

/// Render a typed value as a display string.
///
/// Resolution order, first match wins:
///
/// 1. A symbolic string, translated when the locale is alternate and the
///    descriptor has a translation for it.
/// 2. A number, suffixed with the descriptor's unit (empty when the
///    descriptor declares no numeric range). No offset scaling is applied
///    here; the transmitted number is already user-facing.
/// 3. EDT bytes matched against the descriptor's alias patterns; the first
///    matching alias name, translated as in step 1.
/// 4. [`UNRESOLVED_SENTINEL`].
pub fn format_value(
    value: &PropertyValue,
    descriptor: &PropertyDescriptor,
    locale: Locale,
) -> String {
    if let Some(text) = value.as_text() {
        return translate(descriptor, text, locale).to_string();
    }

    if let Some(number) = value.as_number() {
        let unit = descriptor
            .number_desc
            .as_ref()
            .map(|desc| desc.unit.as_str())
            .unwrap_or("");
        return format!("{}{}", number, unit);
    }

    if let Some(edt) = value.edt() {
        if let Some(name) = descriptor.alias_for_edt(edt) {
            return translate(descriptor, name, locale).to_string();
        }
    }

    UNRESOLVED_SENTINEL.to_string()
}

/// True when only a hex/binary view is meaningful for the value: it carries
/// EDT bytes and [`format_value`] yields the unresolved sentinel.
///
/// Purely derived from its inputs; never cached.
pub fn needs_hex_view(
    value: &PropertyValue,
    descriptor: &PropertyDescriptor,
    locale: Locale,
) -> bool {
    value.edt().is_some() && format_value(value, descriptor, locale) == UNRESOLVED_SENTINEL
}

/// Uppercase hex rendering of the raw EDT bytes, for the hex view
pub fn hex_view(value: &PropertyValue) -> Option<String> {
    value.edt().map(util::hex_upper)
}

/// Decode a raw EDT payload into a typed value using a descriptor.
///
/// Aliases are tried first, then the numeric codec (which applies the stored
/// offset), then the string codec. The EDT bytes are always retained as the
/// fallback representation.
pub fn decode_value(descriptor: &PropertyDescriptor, edt: &[u8]) -> PropertyValue {
    if let Some(name) = descriptor.alias_for_edt(edt) {
        return PropertyValue::text_with_edt(name, edt);
    }

    if let Some(number_desc) = &descriptor.number_desc {
        if let Some((number, _)) = number_desc.to_int(edt) {
            return PropertyValue::number_with_edt(number, edt);
        }
    }

    if let Some(string_desc) = &descriptor.string_desc {
        if let Some(text) = string_desc.to_text(edt) {
            return PropertyValue::text_with_edt(text, edt);
        }
    }

    PropertyValue::raw(edt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::NumberDesc;

    fn status_descriptor() -> PropertyDescriptor {
        let mut desc = PropertyDescriptor::new("Operation status");
        desc.add_alias("on", [0x30]);
        desc.add_alias("off", [0x31]);
        desc.add_translation("on", "オン");
        desc.add_translation("off", "オフ");
        desc
    }

    fn temperature_descriptor() -> PropertyDescriptor {
        PropertyDescriptor {
            number_desc: Some(NumberDesc {
                min: 0,
                max: 50,
                offset: 0,
                unit: "°C".to_string(),
                edt_len: 0,
            }),
            ..PropertyDescriptor::new("Temperature setting")
        }
    }

    #[test]
    fn test_constructors_enforce_single_repr() {
        let text = PropertyValue::text("on");
        assert_eq!(text.as_text(), Some("on"));
        assert_eq!(text.as_number(), None);

        let number = PropertyValue::number(24);
        assert_eq!(number.as_number(), Some(24));
        assert_eq!(number.as_text(), None);

        let raw = PropertyValue::raw([0xDE, 0xAD]);
        assert!(raw.is_raw());
        assert_eq!(raw.edt(), Some(&[0xDE, 0xAD][..]));
    }

    #[test]
    fn test_format_number_with_unit() {
        let value = PropertyValue::number(24);
        assert_eq!(
            format_value(&value, &temperature_descriptor(), Locale::Default),
            "24°C"
        );
    }

    #[test]
    fn test_format_number_without_number_desc() {
        let value = PropertyValue::number(7);
        let desc = PropertyDescriptor::new("Counter");
        assert_eq!(format_value(&value, &desc, Locale::Default), "7");
    }

    #[test]
    fn test_format_string_translation() {
        let desc = status_descriptor();
        let value = PropertyValue::text("on");
        assert_eq!(format_value(&value, &desc, Locale::Alternate), "オン");
        assert_eq!(format_value(&value, &desc, Locale::Default), "on");
    }

    #[test]
    fn test_format_untranslated_string_passes_through() {
        let desc = status_descriptor();
        let value = PropertyValue::text("standby");
        assert_eq!(format_value(&value, &desc, Locale::Alternate), "standby");
    }

    #[test]
    fn test_format_resolves_edt_through_aliases() {
        let desc = status_descriptor();
        let value = PropertyValue::raw([0x30]);
        assert_eq!(format_value(&value, &desc, Locale::Default), "on");
        assert_eq!(format_value(&value, &desc, Locale::Alternate), "オン");
        assert!(!needs_hex_view(&value, &desc, Locale::Default));
    }

    #[test]
    fn test_format_unmatched_edt_is_unresolved() {
        let desc = status_descriptor();
        let value = PropertyValue::raw([0x99]);
        assert_eq!(
            format_value(&value, &desc, Locale::Default),
            UNRESOLVED_SENTINEL
        );
        assert!(needs_hex_view(&value, &desc, Locale::Default));
        assert_eq!(hex_view(&value).unwrap(), "99");
    }

    #[test]
    fn test_no_hex_view_without_edt() {
        let desc = PropertyDescriptor::new("Empty");
        let value = PropertyValue::default();
        assert_eq!(
            format_value(&value, &desc, Locale::Default),
            UNRESOLVED_SENTINEL
        );
        assert!(!needs_hex_view(&value, &desc, Locale::Default));
        assert_eq!(hex_view(&value), None);
    }

    #[test]
    fn test_decode_value_prefers_alias() {
        let mut desc = temperature_descriptor();
        desc.add_alias("unknown", [0xFD]);

        let value = decode_value(&desc, &[0xFD]);
        assert_eq!(value.as_text(), Some("unknown"));
        assert_eq!(value.edt(), Some(&[0xFD][..]));

        let value = decode_value(&desc, &[24]);
        assert_eq!(value.as_number(), Some(24));

        let value = decode_value(&desc, &[99]);
        assert!(value.is_raw());
        assert_eq!(value.edt(), Some(&[99][..]));
    }

    #[test]
    fn test_wire_conversion_roundtrip() {
        let wire = EncodedValue {
            string: Some("on".to_string()),
            number: None,
            edt: Some(encoding::encode_edt(&[0x30])),
        };
        let value = PropertyValue::try_from(wire.clone()).unwrap();
        assert_eq!(value.as_text(), Some("on"));
        assert_eq!(value.edt(), Some(&[0x30][..]));
        assert_eq!(EncodedValue::from(&value), wire);
    }

    #[test]
    fn test_wire_conversion_rejects_conflicts() {
        let wire = EncodedValue {
            string: Some("on".to_string()),
            number: Some(1),
            edt: None,
        };
        assert_eq!(PropertyValue::try_from(wire), Err(ValueError::Conflicting));
    }

    #[test]
    fn test_wire_conversion_rejects_bad_edt() {
        let wire = EncodedValue {
            string: None,
            number: None,
            edt: Some("!!".to_string()),
        };
        assert_eq!(PropertyValue::try_from(wire), Err(ValueError::InvalidEdt));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_shape_serde() {
        let wire = EncodedValue {
            string: None,
            number: Some(24),
            edt: Some("GA==".to_string()),
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["number"], 24);
        assert_eq!(json["EDT"], "GA==");
        assert!(json.get("string").is_none());

        let back: EncodedValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, wire);
    }
}
