//! Property Description Catalog
//!
//! This module provides the catalog of property descriptors, keyed by device
//! class and property code. Lookups consult the class-specific table first
//! and fall back to the device superclass table, which holds the properties
//! every device object shares (operation status, fault status, the three
//! property maps, and so on).
//!
//! [`PropertyCatalog::standard`] builds the tables for the device classes
//! this crate knows about; applications with vendor extensions can add or
//! override entries before first use. Catalogs are meant to be built once
//! and treated as immutable afterwards.
//!
//! # Example
//!
//! ```
//! use echonet_rs::catalog::PropertyCatalog;
//! use echonet_rs::object::{ClassCode, Epc};
//!
//! let catalog = PropertyCatalog::standard();
//! let status = catalog
//!     .descriptor(ClassCode::SINGLE_FUNCTION_LIGHTING, Epc(0x80))
//!     .unwrap();
//! assert_eq!(status.alias_for_edt(&[0x30]), Some("on"));
//! ```

#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use crate::descriptor::{NumberDesc, PropertyDescriptor, StringDesc};
use crate::device::{self, ConnectionState, DeviceSnapshot};
use crate::object::{ClassCode, Epc};
use crate::property::{self, Locale, PropertyValue};

/// Descriptor table for one device class
pub type PropertyTable = BTreeMap<Epc, PropertyDescriptor>;

/// Catalog of property descriptors keyed by device class and property code
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    super_class: PropertyTable,
    classes: BTreeMap<ClassCode, PropertyTable>,
}

impl PropertyCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog with the built-in class tables
    pub fn standard() -> Self {
        let mut catalog = PropertyCatalog::new();
        catalog.super_class = device_super_class();
        catalog.add_class(
            ClassCode::SINGLE_FUNCTION_LIGHTING,
            single_function_lighting(),
        );
        catalog.add_class(ClassCode::HOME_AIR_CONDITIONER, home_air_conditioner());
        catalog
    }

    /// Register (or replace) the descriptor table for a device class
    pub fn add_class(&mut self, class_code: ClassCode, table: PropertyTable) {
        self.classes.insert(class_code, table);
    }

    /// Register (or replace) a superclass descriptor shared by every class
    pub fn add_super_class_descriptor(&mut self, epc: Epc, descriptor: PropertyDescriptor) {
        self.super_class.insert(epc, descriptor);
    }

    /// Look up the descriptor for a property of a device class.
    ///
    /// The class-specific table wins; the superclass table is the fallback.
    pub fn descriptor(&self, class_code: ClassCode, epc: Epc) -> Option<&PropertyDescriptor> {
        self.classes
            .get(&class_code)
            .and_then(|table| table.get(&epc))
            .or_else(|| self.super_class.get(&epc))
    }

    /// Find a property whose descriptor binds the given alias name.
    ///
    /// The superclass table is searched first, then the class table, the
    /// order the original alias resolution used.
    pub fn find_alias(&self, class_code: ClassCode, name: &str) -> Option<(Epc, &[u8])> {
        let tables = [Some(&self.super_class), self.classes.get(&class_code)];
        for table in tables.into_iter().flatten() {
            for (epc, descriptor) in table {
                if let Ok(pattern) = descriptor.edt_for_alias(name) {
                    return Some((*epc, pattern));
                }
            }
        }
        None
    }

    /// Format a device property value, using an empty descriptor when the
    /// catalog has no entry for it
    pub fn format(
        &self,
        class_code: ClassCode,
        epc: Epc,
        value: &PropertyValue,
        locale: Locale,
    ) -> String {
        match self.descriptor(class_code, epc) {
            Some(descriptor) => property::format_value(value, descriptor, locale),
            None => property::format_value(value, &PropertyDescriptor::default(), locale),
        }
    }

    /// Settability of a device property, looking the descriptor up first.
    ///
    /// A property with no catalog entry is never settable.
    pub fn is_settable(
        &self,
        device: &DeviceSnapshot,
        epc: Epc,
        connection: ConnectionState,
    ) -> bool {
        match self.descriptor(device.class_code(), epc) {
            Some(descriptor) => device::is_settable(descriptor, epc, device, connection),
            None => false,
        }
    }
}

fn number(min: i32, max: i32, unit: &str, edt_len: usize) -> NumberDesc {
    NumberDesc {
        min,
        max,
        offset: 0,
        unit: unit.to_string(),
        edt_len,
    }
}

/// Properties shared by every device object
fn device_super_class() -> PropertyTable {
    let mut table = PropertyTable::new();

    let mut status = PropertyDescriptor::new("Operation status");
    status.add_alias("on", [0x30]);
    status.add_alias("off", [0x31]);
    status.add_translation("on", "オン");
    status.add_translation("off", "オフ");
    table.insert(Epc::OPERATION_STATUS, status);

    let mut location = PropertyDescriptor::new("Installation location");
    location.add_alias("unspecified", [0x00]);
    location.add_alias("living", [0x08]);
    location.add_alias("dining", [0x10]);
    location.add_alias("kitchen", [0x18]);
    location.add_alias("bathroom", [0x20]);
    location.add_alias("undetermined", [0xFF]);
    table.insert(Epc::INSTALLATION_LOCATION, location);

    let mut power = PropertyDescriptor::new("Measured instantaneous power consumption");
    power.number_desc = Some(number(0, 65533, "W", 2));
    table.insert(Epc(0x84), power);

    let mut fault = PropertyDescriptor::new("Fault occurrence status");
    fault.add_alias("fault", [0x41]);
    fault.add_alias("no_fault", [0x42]);
    table.insert(Epc::FAULT_STATUS, fault);

    let mut manufacturer = PropertyDescriptor::new("Manufacturer code");
    manufacturer.add_alias("Experimental", [0xFF, 0xFF, 0xFF]);
    table.insert(Epc::MANUFACTURER_CODE, manufacturer);

    let mut product = PropertyDescriptor::new("Product code");
    product.string_desc = Some(StringDesc {
        min_edt_len: 12,
        max_edt_len: 12,
    });
    table.insert(Epc::PRODUCT_CODE, product);

    table.insert(
        Epc::STATUS_ANNOUNCEMENT_MAP,
        PropertyDescriptor::new("Status announcement property map"),
    );
    table.insert(
        Epc::SET_PROPERTY_MAP,
        PropertyDescriptor::new("Set property map"),
    );
    table.insert(
        Epc::GET_PROPERTY_MAP,
        PropertyDescriptor::new("Get property map"),
    );

    table
}

fn single_function_lighting() -> PropertyTable {
    let mut table = PropertyTable::new();

    let mut illuminance = PropertyDescriptor::new("Illuminance level");
    illuminance.number_desc = Some(number(0, 100, "%", 1));
    table.insert(Epc(0xB0), illuminance);

    table
}

fn home_air_conditioner() -> PropertyTable {
    let mut table = PropertyTable::new();

    // Out-of-band sentinel bytes shared by the measurement properties
    let extra_values: [(&str, u8); 3] =
        [("unknown", 0xFD), ("underflow", 0xFE), ("overflow", 0xFF)];

    let mut volume = PropertyDescriptor::new("Air volume setting");
    volume.add_alias("auto", [0x41]);
    volume.number_desc = Some(NumberDesc {
        min: 1,
        max: 8,
        offset: 0x30,
        unit: String::new(),
        edt_len: 1,
    });
    table.insert(Epc(0xA0), volume);

    let mut mode = PropertyDescriptor::new("Operation mode setting");
    mode.add_alias("auto", [0x41]);
    mode.add_alias("cooling", [0x42]);
    mode.add_alias("heating", [0x43]);
    mode.add_alias("dry", [0x44]);
    mode.add_alias("fan", [0x45]);
    mode.add_alias("other", [0x40]);
    mode.add_translation("cooling", "冷房");
    mode.add_translation("heating", "暖房");
    mode.add_translation("dry", "除湿");
    table.insert(Epc(0xB0), mode);

    let mut setpoint = PropertyDescriptor::new("Temperature setting");
    setpoint.number_desc = Some(number(0, 50, "°C", 1));
    for (name, byte) in extra_values {
        setpoint.add_alias(name, [byte]);
    }
    table.insert(Epc(0xB3), setpoint);

    let mut humidity = PropertyDescriptor::new("Current room humidity");
    humidity.number_desc = Some(number(0, 100, "%", 1));
    for (name, byte) in extra_values {
        humidity.add_alias(name, [byte]);
    }
    table.insert(Epc(0xBA), humidity);

    let mut room_temp = PropertyDescriptor::new("Current room temperature");
    room_temp.number_desc = Some(number(-127, 125, "°C", 1));
    for (name, byte) in extra_values {
        room_temp.add_alias(name, [byte]);
    }
    table.insert(Epc(0xBB), room_temp);

    let mut outside_temp = PropertyDescriptor::new("Current outside temperature");
    outside_temp.number_desc = Some(number(-127, 125, "°C", 1));
    for (name, byte) in extra_values {
        outside_temp.add_alias(name, [byte]);
    }
    table.insert(Epc(0xBE), outside_temp);

    table
}
