#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

pub mod catalog;
pub mod descriptor;
pub mod device;
pub mod encoding;
pub mod object;
pub mod property;
pub mod util;

// Re-export main types without glob imports to avoid conflicts
pub use catalog::PropertyCatalog;
pub use descriptor::{AliasError, NumberDesc, PropertyCapabilities, PropertyDescriptor, StringDesc};
pub use device::{is_settable, ConnectionState, DeviceSnapshot};
pub use encoding::{EncodingError, MapKind, PropertyMap};
pub use object::{ClassCode, Epc, ObjectError, ObjectIdentifier};
pub use property::{
    decode_value, format_value, needs_hex_view, EncodedValue, Locale, PropertyValue, ValueError,
    UNRESOLVED_SENTINEL,
};

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Lowest standard property code
pub const STANDARD_EPC_MIN: u8 = 0x80;
/// Highest standard property code
pub const STANDARD_EPC_MAX: u8 = 0xFF;

#[cfg(test)]
mod tests {
    use crate::catalog::PropertyCatalog;
    use crate::{format_value, ClassCode, Epc, EncodingError, Locale, PropertyMap, PropertyValue};

    #[cfg(not(feature = "std"))]
    use alloc::format;

    #[test]
    fn test_no_std_types() {
        // Types and codecs work in both std and no-std environments
        let epc = Epc(0x9E);
        assert_eq!(epc, Epc::SET_PROPERTY_MAP);
        assert!(epc.is_standard());

        let map = PropertyMap::decode(&[0x01, 0x80]).unwrap();
        assert!(map.contains(Epc(0x80)));
    }

    #[test]
    fn test_encoding_error() {
        let err = EncodingError::MalformedMap;
        // In no-std, we can still format errors
        let _ = format!("{:?}", err);
        let _ = format!("{}", err);
    }

    #[test]
    fn test_catalog_formatting_smoke() {
        let catalog = PropertyCatalog::standard();
        let descriptor = catalog
            .descriptor(ClassCode::HOME_AIR_CONDITIONER, Epc(0xB3))
            .unwrap();
        let value = PropertyValue::number(24);
        assert_eq!(format_value(&value, descriptor, Locale::Default), "24°C");
    }
}
