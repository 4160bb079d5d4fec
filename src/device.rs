//! Device Snapshots and Settability
//!
//! This module holds the read-only view of a device this core consumes (its
//! object identity and the latest value of each property) and the predicate
//! deciding whether a property may currently be written.
//!
//! Settability combines three independent signals: the capability the
//! descriptor declares, membership in the device's set-property map, and the
//! connection state. All three change independently and asynchronously from
//! the caller's perspective, so the predicate is recomputed on every query
//! and never cached here.

use core::fmt;

#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;

use crate::descriptor::PropertyDescriptor;
use crate::encoding::{self, MapKind, PropertyMap};
use crate::object::{ClassCode, Epc, ObjectIdentifier};
use crate::property::PropertyValue;

/// Whether the session to the device is currently up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Per-device view: object identity plus the current value of each property
///
/// Values are replaced wholesale as updates arrive, never patched in place.
#[derive(Debug, Clone)]
pub struct DeviceSnapshot {
    object: ObjectIdentifier,
    properties: BTreeMap<Epc, PropertyValue>,
}

impl DeviceSnapshot {
    /// Create an empty snapshot for a device object
    pub fn new(object: ObjectIdentifier) -> Self {
        DeviceSnapshot {
            object,
            properties: BTreeMap::new(),
        }
    }

    /// The device's object identity
    pub fn object(&self) -> ObjectIdentifier {
        self.object
    }

    /// The device's class code, the catalog key
    pub fn class_code(&self) -> ClassCode {
        self.object.class_code
    }

    /// Replace the value of a property
    pub fn insert(&mut self, epc: Epc, value: PropertyValue) {
        self.properties.insert(epc, value);
    }

    /// The current value of a property, if the device has reported one
    pub fn value(&self, epc: Epc) -> Option<&PropertyValue> {
        self.properties.get(&epc)
    }

    /// Property codes with a reported value, in ascending order
    pub fn epcs(&self) -> impl Iterator<Item = Epc> + '_ {
        self.properties.keys().copied()
    }

    /// Decode one of the three well-known property maps from the device's
    /// reported values.
    ///
    /// `None` when the map-bearing property (or its EDT payload) is absent;
    /// otherwise the decode result, malformed data included.
    pub fn property_map(&self, kind: MapKind) -> Option<encoding::Result<PropertyMap>> {
        let value = self.value(kind.epc())?;
        let edt = value.edt()?;
        Some(PropertyMap::decode(edt))
    }
}

/// Decide whether a property may currently be written.
///
/// True iff the descriptor declares some write capability, the device's
/// set-property map contains the code, and the device is connected. A device
/// with no set-property-map value, or a malformed one, is never settable
/// (fail-closed: absent map data does not mean "everything is settable").
pub fn is_settable(
    descriptor: &PropertyDescriptor,
    epc: Epc,
    device: &DeviceSnapshot,
    connection: ConnectionState,
) -> bool {
    if descriptor.capabilities().is_empty() {
        return false;
    }

    let in_set_map = match device.property_map(MapKind::Set) {
        Some(Ok(map)) => map.contains(epc),
        Some(Err(_)) | None => false,
    };

    in_set_map && connection.is_connected()
}
