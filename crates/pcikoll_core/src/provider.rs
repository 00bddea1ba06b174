//! Sources of devices and their raw attributes
//!
//! A provider lists the devices of a subsystem (such as `pci`) and gives
//! access to the raw key/value properties of each device, the same properties
//! udev exposes (`PCI_ID`, `DRIVER`, ...).

use crate::Error;
use ahash::AHashMap;
use compact_str::CompactString;
use compact_str::format_compact;

pub mod sysfs;

pub use sysfs::SysfsProvider;

/// Raw properties of a single device
pub trait DeviceAttributes {
    /// Value of the attribute, `None` if the device doesn't have it
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Value of the attribute, empty if the device doesn't have it
    fn value(&self, key: &str) -> &str {
        self.attribute(key).unwrap_or_default()
    }
}

/// Lists devices and opens them
pub trait DeviceProvider {
    /// Reference to a device as returned from enumeration
    type Handle;
    /// An opened device
    type Device: DeviceAttributes;

    /// List the devices of a subsystem, in a stable order
    fn enumerate(&self, subsystem: &str) -> Result<Vec<Self::Handle>, Error>;

    /// Read the properties of a device
    fn device(&self, handle: &Self::Handle) -> Result<Self::Device, Error>;
}

/// Device properties as a plain map
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeMap(AHashMap<CompactString, CompactString>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DeviceAttributes for AttributeMap {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(CompactString::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<CompactString>,
    V: Into<CompactString>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<CompactString>,
    V: Into<CompactString>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// A provider over a fixed set of devices held in memory
///
/// Useful for testing, or when the attributes come from somewhere other than
/// the running system (such as a saved report).
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    devices: Vec<(CompactString, AttributeMap)>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device to the given subsystem
    pub fn add(&mut self, subsystem: impl Into<CompactString>, attributes: AttributeMap) {
        self.devices.push((subsystem.into(), attributes));
    }
}

impl DeviceProvider for MemoryProvider {
    type Handle = usize;
    type Device = AttributeMap;

    fn enumerate(&self, subsystem: &str) -> Result<Vec<usize>, Error> {
        Ok(self
            .devices
            .iter()
            .enumerate()
            .filter(|(_, (s, _))| s.as_str() == subsystem)
            .map(|(idx, _)| idx)
            .collect())
    }

    fn device(&self, handle: &usize) -> Result<AttributeMap, Error> {
        self.devices
            .get(*handle)
            .map(|(_, attrs)| attrs.clone())
            .ok_or_else(|| Error::NoSuchDevice {
                handle: format_compact!("#{handle}"),
            })
    }
}
