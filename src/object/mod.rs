//! ECHONET Lite Object Identity
//!
//! This module defines the identity types of the ECHONET Lite device model:
//! property codes (EPC), device class codes, and full object identifiers
//! (class code plus instance). Every property update names the device object
//! it belongs to through these types, and the property-description catalog is
//! keyed by them.
//!
//! # Overview
//!
//! - [`Epc`]: one-byte property code. Standard properties live in the range
//!   0x80-0xFF; the canonical text form is two uppercase hex digits.
//! - [`ClassCode`]: 16-bit device class, a class-group byte followed by a
//!   class byte (e.g. 0x0130 for a home air conditioner).
//! - [`ObjectIdentifier`]: class code plus instance number, carried on the
//!   wire as three bytes.
//!
//! # Examples
//!
//! ```
//! use echonet_rs::object::{ClassCode, Epc, ObjectIdentifier};
//!
//! let epc = Epc(0x80);
//! assert_eq!(epc.to_string(), "80");
//! assert!(epc.is_standard());
//!
//! let object = ObjectIdentifier::new(ClassCode::HOME_AIR_CONDITIONER, 1);
//! assert_eq!(object.encode(), [0x01, 0x30, 0x01]);
//! assert_eq!(object.to_string(), "0130:1");
//! ```

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(not(feature = "std"))]
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::Deserialize as _;

/// Result type for object identity operations
pub type Result<T> = core::result::Result<T, ObjectError>;

/// Errors that can occur when decoding or parsing identity types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// Byte payload has the wrong length for the identity being decoded
    InvalidLength,
    /// Text is not a valid hex code of the expected width
    InvalidCodeText,
    /// Text is not a valid `class:instance` object specifier
    InvalidSpecifier,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectError::InvalidLength => write!(f, "Wrong payload length for identity"),
            ObjectError::InvalidCodeText => write!(f, "Invalid hex code text"),
            ObjectError::InvalidSpecifier => write!(f, "Invalid object specifier"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for ObjectError {}

/// One-byte property code (EPC)
///
/// Identity is the numeric value. Ordering is numeric, which coincides with
/// lexicographic ordering of the canonical two-digit uppercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epc(pub u8);

impl Epc {
    /// Operation status (on/off)
    pub const OPERATION_STATUS: Epc = Epc(0x80);
    /// Installation location
    pub const INSTALLATION_LOCATION: Epc = Epc(0x81);
    /// Fault occurrence status
    pub const FAULT_STATUS: Epc = Epc(0x88);
    /// Manufacturer code
    pub const MANUFACTURER_CODE: Epc = Epc(0x8A);
    /// Product code
    pub const PRODUCT_CODE: Epc = Epc(0x8C);
    /// Status change announcement property map
    pub const STATUS_ANNOUNCEMENT_MAP: Epc = Epc(0x9D);
    /// Set property map
    pub const SET_PROPERTY_MAP: Epc = Epc(0x9E);
    /// Get property map
    pub const GET_PROPERTY_MAP: Epc = Epc(0x9F);

    /// Check if the code is in the standard property range (0x80-0xFF)
    pub fn is_standard(&self) -> bool {
        self.0 >= crate::STANDARD_EPC_MIN
    }

    /// Parse the canonical two-hex-digit text form
    pub fn from_hex(text: &str) -> Result<Epc> {
        if text.len() != 2 {
            return Err(ObjectError::InvalidCodeText);
        }
        u8::from_str_radix(text, 16)
            .map(Epc)
            .map_err(|_| ObjectError::InvalidCodeText)
    }
}

impl fmt::Display for Epc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl From<u8> for Epc {
    fn from(value: u8) -> Self {
        Epc(value)
    }
}

impl From<Epc> for u8 {
    fn from(value: Epc) -> Self {
        value.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Epc {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Epc {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Epc::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// 16-bit device class code: class-group byte followed by class byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassCode(pub u16);

impl ClassCode {
    pub const HOME_AIR_CONDITIONER: ClassCode = ClassCode(0x0130);
    pub const VENTILATION_FAN: ClassCode = ClassCode(0x0133);
    pub const FLOOR_HEATING: ClassCode = ClassCode(0x027B);
    pub const SINGLE_FUNCTION_LIGHTING: ClassCode = ClassCode(0x0291);
    pub const LIGHTING_SYSTEM: ClassCode = ClassCode(0x02A3);
    pub const REFRIGERATOR: ClassCode = ClassCode(0x03B7);
    pub const CONTROLLER: ClassCode = ClassCode(0x05FF);
    pub const NODE_PROFILE: ClassCode = ClassCode(0x0EF0);

    /// Class group byte (high byte)
    pub fn group_code(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Class byte (low byte)
    pub fn class_byte(&self) -> u8 {
        self.0 as u8
    }

    /// Encode as two big-endian bytes
    pub fn encode(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Decode from exactly two bytes
    pub fn decode(data: &[u8]) -> Result<ClassCode> {
        match data {
            [hi, lo] => Ok(ClassCode(u16::from_be_bytes([*hi, *lo]))),
            _ => Err(ObjectError::InvalidLength),
        }
    }

    /// Parse the four-hex-digit text form used by the wire protocol
    pub fn from_hex(text: &str) -> Result<ClassCode> {
        if text.len() != 4 {
            return Err(ObjectError::InvalidCodeText);
        }
        u16::from_str_radix(text, 16)
            .map(ClassCode)
            .map_err(|_| ObjectError::InvalidCodeText)
    }

    /// Human-readable class name, if the class is well known
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            ClassCode::HOME_AIR_CONDITIONER => Some("Home air conditioner"),
            ClassCode::VENTILATION_FAN => Some("Ventilation fan"),
            ClassCode::FLOOR_HEATING => Some("Floor heating"),
            ClassCode::SINGLE_FUNCTION_LIGHTING => Some("Single-function lighting"),
            ClassCode::LIGHTING_SYSTEM => Some("Lighting system"),
            ClassCode::REFRIGERATOR => Some("Refrigerator"),
            ClassCode::CONTROLLER => Some("Controller"),
            ClassCode::NODE_PROFILE => Some("Node profile"),
            _ => None,
        }
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown device class ({:04X})", self.0),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClassCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:04X}", self.0))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClassCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ClassCode::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Object identifier (class code + instance number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIdentifier {
    pub class_code: ClassCode,
    pub instance: u8,
}

impl ObjectIdentifier {
    /// Create a new object identifier
    pub fn new(class_code: ClassCode, instance: u8) -> Self {
        Self {
            class_code,
            instance,
        }
    }

    /// Encode as the three-byte wire form: class hi, class lo, instance
    pub fn encode(&self) -> [u8; 3] {
        let class = self.class_code.encode();
        [class[0], class[1], self.instance]
    }

    /// Decode from exactly three bytes
    pub fn decode(data: &[u8]) -> Result<ObjectIdentifier> {
        match data {
            [hi, lo, instance] => Ok(ObjectIdentifier {
                class_code: ClassCode(u16::from_be_bytes([*hi, *lo])),
                instance: *instance,
            }),
            _ => Err(ObjectError::InvalidLength),
        }
    }
}

impl From<u32> for ObjectIdentifier {
    /// Convert from the packed 24-bit form (class code in the high 16 bits)
    fn from(value: u32) -> Self {
        ObjectIdentifier {
            class_code: ClassCode((value >> 8) as u16),
            instance: value as u8,
        }
    }
}

impl From<ObjectIdentifier> for u32 {
    fn from(value: ObjectIdentifier) -> Self {
        ((value.class_code.0 as u32) << 8) | value.instance as u32
    }
}

impl fmt::Display for ObjectIdentifier {
    /// The `CCCC:i` specifier form, e.g. `0130:1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{}", self.class_code.0, self.instance)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = ObjectError;

    fn from_str(text: &str) -> Result<Self> {
        let (class, instance) = text.split_once(':').ok_or(ObjectError::InvalidSpecifier)?;
        let class_code = ClassCode::from_hex(class).map_err(|_| ObjectError::InvalidSpecifier)?;
        let instance: u8 = instance.parse().map_err(|_| ObjectError::InvalidSpecifier)?;
        Ok(ObjectIdentifier {
            class_code,
            instance,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ObjectIdentifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
