//! Round-trip and cross-module integration tests.

use proptest::prelude::*;

use echonet_rs::device::DeviceSnapshot;
use echonet_rs::object::ObjectIdentifier;
use echonet_rs::{
    decode_value, format_value, needs_hex_view, ClassCode, ConnectionState, Epc, Locale,
    NumberDesc, PropertyCatalog, PropertyMap, PropertyValue, UNRESOLVED_SENTINEL,
};

proptest! {
    /// decode(encode(codes)) preserves the set across both wire formats
    #[test]
    fn property_map_roundtrip(codes in proptest::collection::btree_set(0x80u8..=0xFFu8, 0..40)) {
        let map: PropertyMap = codes.iter().copied().map(Epc).collect();
        let encoded = map.encode();
        let decoded = PropertyMap::decode(&encoded).unwrap();
        prop_assert_eq!(decoded, map);
    }

    /// Decoded codes come out sorted by their two-hex-digit text form
    #[test]
    fn property_map_output_is_text_sorted(codes in proptest::collection::vec(0x80u8..=0xFFu8, 0..15)) {
        let mut data = vec![codes.len() as u8];
        data.extend_from_slice(&codes);
        let decoded = PropertyMap::decode(&data).unwrap();

        let text: Vec<String> = decoded.iter().map(|epc| epc.to_string()).collect();
        let mut sorted = text.clone();
        sorted.sort();
        prop_assert_eq!(text, sorted);
    }

    /// Numeric EDT codec round-trips every value in the declared range
    #[test]
    fn number_desc_roundtrip(value in -127i32..=125, offset in 0i32..=0x30) {
        let desc = NumberDesc {
            min: -127,
            max: 125,
            offset,
            unit: "°C".to_string(),
            edt_len: 2,
        };
        let edt = desc.from_int(value).unwrap();
        let (decoded, unit) = desc.to_int(&edt).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(unit, "°C");
    }
}

#[test]
fn settability_end_to_end() {
    let catalog = PropertyCatalog::standard();
    let object = ObjectIdentifier::new(ClassCode::HOME_AIR_CONDITIONER, 1);
    let mut device = DeviceSnapshot::new(object);

    // Without a set-property map nothing is settable, capability or not
    assert!(!catalog.is_settable(&device, Epc(0xB0), ConnectionState::Connected));

    device.insert(
        Epc::SET_PROPERTY_MAP,
        PropertyValue::raw([0x03, 0x80, 0xB0, 0xB3]),
    );
    assert!(catalog.is_settable(&device, Epc(0xB0), ConnectionState::Connected));
    assert!(!catalog.is_settable(&device, Epc(0xB0), ConnectionState::Disconnected));
    // Readable-only measurement property is absent from the set map
    assert!(!catalog.is_settable(&device, Epc(0xBB), ConnectionState::Connected));
}

#[test]
fn formatting_end_to_end() {
    let catalog = PropertyCatalog::standard();
    let class = ClassCode::HOME_AIR_CONDITIONER;

    let mode = catalog.descriptor(class, Epc(0xB0)).unwrap();
    let value = decode_value(mode, &[0x42]);
    assert_eq!(format_value(&value, mode, Locale::Default), "cooling");
    assert!(!needs_hex_view(&value, mode, Locale::Default));

    let value = decode_value(mode, &[0x7A]);
    assert_eq!(format_value(&value, mode, Locale::Default), UNRESOLVED_SENTINEL);
    assert!(needs_hex_view(&value, mode, Locale::Default));

    let setpoint = catalog.descriptor(class, Epc(0xB3)).unwrap();
    let value = decode_value(setpoint, &[24]);
    assert_eq!(format_value(&value, setpoint, Locale::Default), "24°C");
}

#[test]
fn bitmap_maps_flow_through_device_snapshot() {
    let object = ObjectIdentifier::new(ClassCode::SINGLE_FUNCTION_LIGHTING, 1);
    let mut device = DeviceSnapshot::new(object);

    let advertised: PropertyMap = (0x80u8..0x94).map(Epc).collect();
    let encoded = advertised.encode();
    assert_eq!(encoded.len(), 17);

    device.insert(Epc::GET_PROPERTY_MAP, PropertyValue::raw(encoded));
    let decoded = device
        .property_map(echonet_rs::MapKind::Get)
        .unwrap()
        .unwrap();
    assert_eq!(decoded, advertised);
}
