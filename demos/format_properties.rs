//! Decode and format a set of property updates the way a dashboard would.
//!
//! Run with: cargo run --example format_properties

use echonet_rs::{
    decode_value, format_value, needs_hex_view, ClassCode, ConnectionState, Epc, Locale,
    PropertyCatalog, PropertyDescriptor,
};
use echonet_rs::device::DeviceSnapshot;
use echonet_rs::object::ObjectIdentifier;
use echonet_rs::property::hex_view;

fn main() {
    env_logger::init();

    let catalog = PropertyCatalog::standard();
    let class = ClassCode::HOME_AIR_CONDITIONER;
    let mut device = DeviceSnapshot::new(ObjectIdentifier::new(class, 1));

    // Raw property updates as they would arrive from the network layer:
    // (EPC, EDT bytes)
    let updates: &[(u8, &[u8])] = &[
        (0x80, &[0x30]),                         // operation status: on
        (0xB0, &[0x42]),                         // operation mode: cooling
        (0xB3, &[0x19]),                         // temperature setting: 25
        (0xBB, &[0xFB]),                         // room temperature: -5
        (0x84, &[0x02, 0x26]),                   // instantaneous power: 550 W
        (0xC1, &[0x77]),                         // no descriptor entry
        (0x9E, &[0x04, 0x80, 0xB0, 0xB3, 0xA0]), // set property map
    ];

    let fallback = PropertyDescriptor::default();
    for &(epc, edt) in updates {
        let descriptor = catalog.descriptor(class, Epc(epc)).unwrap_or(&fallback);
        device.insert(Epc(epc), decode_value(descriptor, edt));
    }

    println!("Device {} ({})", device.object(), device.class_code());
    println!();
    println!(
        "{:<4} {:<42} {:<14} {:<12} settable",
        "EPC", "property", "value", "localized"
    );

    for epc in device.epcs().collect::<Vec<_>>() {
        let value = device.value(epc).expect("value was just inserted");
        let descriptor = catalog.descriptor(class, epc).unwrap_or(&fallback);

        let name = if descriptor.description.is_empty() {
            "(no description)"
        } else {
            descriptor.description.as_str()
        };

        let mut shown = format_value(value, descriptor, Locale::Default);
        if needs_hex_view(value, descriptor, Locale::Default) {
            if let Some(hex) = hex_view(value) {
                shown = format!("0x{}", hex);
            }
        }
        let translated = format_value(value, descriptor, Locale::Alternate);
        let settable = catalog.is_settable(&device, epc, ConnectionState::Connected);

        println!(
            "{:<4} {:<42} {:<14} {:<12} {}",
            epc, name, shown, translated, settable
        );
    }
}
