//! Device provider reading `/sys` and the udev database
//!
//! The kernel exposes the basic properties of each device in its `uevent`
//! file. Properties that udev adds from its hardware database (such as
//! `ID_VENDOR_FROM_DATABASE`) are only found in the udev database under
//! `/run/udev/data`, as `E:KEY=VALUE` lines in a file named
//! `+<subsystem>:<device>`.

use super::AttributeMap;
use super::DeviceProvider;
use crate::Error;
use compact_str::CompactString;
use std::path::Path;
use std::path::PathBuf;

/// Reads devices from a sysfs tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsProvider {
    sysfs_root: PathBuf,
    udev_data: PathBuf,
}

/// A device directory found under `/sys/bus/<subsystem>/devices`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsDevice {
    pub subsystem: CompactString,
    /// Name of the device, for PCI this is the slot (`0000:00:02.0`)
    pub name: CompactString,
    pub path: PathBuf,
}

impl SysfsProvider {
    /// Create a provider. Normally `sysfs_root` is `/sys` and `udev_data` is
    /// `/run/udev/data`.
    pub fn new(sysfs_root: impl Into<PathBuf>, udev_data: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            udev_data: udev_data.into(),
        }
    }

    pub fn sysfs_root(&self) -> &Path {
        &self.sysfs_root
    }

    pub fn udev_data(&self) -> &Path {
        &self.udev_data
    }
}

impl DeviceProvider for SysfsProvider {
    type Handle = SysfsDevice;
    type Device = AttributeMap;

    fn enumerate(&self, subsystem: &str) -> Result<Vec<SysfsDevice>, Error> {
        let dir = self.sysfs_root.join("bus").join(subsystem).join("devices");
        let mut devices = vec![];
        for entry in std::fs::read_dir(&dir).map_err(|err| Error::unavailable(&dir, err))? {
            let entry = entry.map_err(|err| Error::unavailable(&dir, err))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!("Skipping non-UTF-8 device name {file_name:?}");
                continue;
            };
            devices.push(SysfsDevice {
                subsystem: subsystem.into(),
                name: name.into(),
                path: entry.path(),
            });
        }
        // read_dir order is arbitrary
        devices.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(devices)
    }

    fn device(&self, handle: &SysfsDevice) -> Result<AttributeMap, Error> {
        let uevent_path = handle.path.join("uevent");
        let uevent = std::fs::read_to_string(&uevent_path)
            .map_err(|err| Error::unavailable(&uevent_path, err))?;

        let udev_path = self
            .udev_data
            .join(format!("+{}:{}", handle.subsystem, handle.name));
        let mut attributes = match std::fs::read_to_string(&udev_path) {
            Ok(data) => parse_udev_data(&data).collect::<AttributeMap>(),
            Err(err) => {
                tracing::debug!(
                    "No udev data for {} ({}): {err}",
                    handle.name,
                    udev_path.display()
                );
                AttributeMap::new()
            }
        };
        // The kernel's view wins over anything udev recorded
        attributes.extend(parse_uevent(&uevent));
        Ok(attributes)
    }
}

/// Parse `KEY=VALUE` lines
fn parse_uevent(input: &str) -> impl Iterator<Item = (&str, &str)> {
    input.lines().filter_map(|line| line.split_once('='))
}

/// Parse the properties (`E:KEY=VALUE`) from a udev database file
fn parse_udev_data(input: &str) -> impl Iterator<Item = (&str, &str)> {
    input
        .lines()
        .filter_map(|line| line.strip_prefix("E:"))
        .filter_map(|line| line.split_once('='))
}
