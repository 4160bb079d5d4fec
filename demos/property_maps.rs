//! Inspect the property maps a device advertises.
//!
//! Run with: cargo run --example property_maps

use echonet_rs::device::DeviceSnapshot;
use echonet_rs::object::ObjectIdentifier;
use echonet_rs::{ClassCode, Epc, MapKind, PropertyMap, PropertyValue};

fn main() {
    env_logger::init();

    let object = ObjectIdentifier::new(ClassCode::SINGLE_FUNCTION_LIGHTING, 1);
    let mut device = DeviceSnapshot::new(object);

    // Get map with 20 entries forces the bitmap format
    let get_map: PropertyMap = (0x80u8..0x91)
        .chain([0x9D, 0x9E, 0x9F])
        .map(Epc)
        .collect();
    device.insert(Epc::GET_PROPERTY_MAP, PropertyValue::raw(get_map.encode()));

    // Set map with three entries uses the direct list
    let set_map: PropertyMap = [Epc(0x80), Epc(0x81), Epc(0xB0)].into_iter().collect();
    device.insert(Epc::SET_PROPERTY_MAP, PropertyValue::raw(set_map.encode()));

    for kind in [MapKind::StatusAnnouncement, MapKind::Set, MapKind::Get] {
        print!("{} ({}): ", kind, kind.epc());
        match device.property_map(kind) {
            Some(Ok(map)) => println!("{} codes {}", map.len(), map),
            Some(Err(err)) => println!("undecodable ({})", err),
            None => println!("not reported"),
        }
    }
}
