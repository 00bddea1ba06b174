//! Parser for pci.ids
//!
//! The file is a three level hierarchy where the level is given by
//! indentation:
//!
//! ```text
//! vvvv  vendor name
//! <TAB>dddd  device name
//! <TAB><TAB>ssss ssss  subsystem name
//! ```
//!
//! The level of a line is decided by the offset of the first (lower case) hex
//! digit on it. After the vendor list comes the device class list, which
//! starts after the vendor `ffff`. We don't parse the classes.

use super::ModelEntry;
use super::PciDatabase;
use super::VendorEntry;
use crate::Error;
use crate::ids::canonicalize;
use ahash::AHashMap;
use bstr::ByteSlice;
use bstr::io::BufReadExt;
use compact_str::CompactString;
use std::io::BufRead;

/// Lines shorter than this are never meaningful
const MIN_LINE_LEN: usize = 7;
/// Vendor ID that marks the end of the vendor list
const END_OF_VENDORS: &str = "ffff";

const VENDOR_NAME_OFFSET: usize = 6;
const DEVICE_NAME_OFFSET: usize = 7;
const SUBSYSTEM_KEY_END: usize = 11;
const SUBSYSTEM_NAME_OFFSET: usize = 13;

#[derive(Debug, PartialEq, Eq)]
enum Line<'input> {
    /// Comments, blank lines and other short lines
    Ignored,
    /// Vendor `ffff`, nothing after this is about vendors
    EndOfVendors,
    Vendor(VendorLine<'input>),
    Device(DeviceLine<'input>),
    Subsystem(SubsystemLine<'input>),
}

#[derive(Debug, PartialEq, Eq)]
struct VendorLine<'input> {
    id: &'input str,
    name: &'input str,
}

#[derive(Debug, PartialEq, Eq)]
struct DeviceLine<'input> {
    id: &'input str,
    name: &'input str,
}

#[derive(Debug, PartialEq, Eq)]
struct SubsystemLine<'input> {
    /// `"<subvendor> <subdevice>"`
    key: &'input str,
    name: &'input str,
}

/// Where in the hierarchy new lines will end up
#[derive(Debug, PartialEq, Eq)]
enum Cursor {
    NoVendor,
    Vendor {
        vendor: CompactString,
    },
    Device {
        vendor: CompactString,
        device: CompactString,
    },
}

impl Cursor {
    fn vendor(&self) -> Option<&CompactString> {
        match self {
            Self::NoVendor => None,
            Self::Vendor { vendor } | Self::Device { vendor, .. } => Some(vendor),
        }
    }
}

pub(super) fn parse_database(mut input: impl BufRead) -> PciDatabase {
    let mut db = PciDatabase::default();
    let mut cursor = Cursor::NoVendor;
    let mut line_no = 0;

    let result = input.for_byte_line(|raw| {
        line_no += 1;
        let line = raw.to_str_lossy();
        match classify(&line) {
            Ok(Line::Ignored) => Ok(true),
            Ok(Line::EndOfVendors) => Ok(false),
            Ok(line) => {
                if let Err(reason) = apply(&mut db, &mut cursor, line) {
                    log_malformed(line_no, reason);
                }
                Ok(true)
            }
            Err(reason) => {
                log_malformed(line_no, reason);
                Ok(true)
            }
        }
    });
    if let Err(err) = result {
        tracing::warn!("Stopped reading pci.ids at line {line_no}: {err}");
    }

    db
}

fn log_malformed(line: usize, reason: &'static str) {
    tracing::debug!("{}", Error::MalformedLine { line, reason });
}

/// Insert a classified line into the database at the cursor
fn apply(db: &mut PciDatabase, cursor: &mut Cursor, line: Line<'_>) -> Result<(), &'static str> {
    match line {
        Line::Ignored | Line::EndOfVendors => Ok(()),
        Line::Vendor(vendor) => {
            let id = canonicalize(vendor.id);
            db.vendors.insert(
                id.clone(),
                VendorEntry {
                    id: id.clone(),
                    name: vendor.name.into(),
                    models: AHashMap::new(),
                },
            );
            *cursor = Cursor::Vendor { vendor: id };
            Ok(())
        }
        Line::Device(device) => {
            let vendor_id = cursor.vendor().ok_or("device line before any vendor")?;
            let vendor = db
                .vendors
                .get_mut(vendor_id)
                .ok_or("current vendor is not in the database")?;
            let id = canonicalize(device.id);
            vendor.models.insert(
                id.clone(),
                ModelEntry {
                    id: id.clone(),
                    description: device.name.into(),
                    subsystems: AHashMap::new(),
                },
            );
            *cursor = Cursor::Device {
                vendor: vendor_id.clone(),
                device: id,
            };
            Ok(())
        }
        Line::Subsystem(subsystem) => {
            let Cursor::Device { vendor, device } = &*cursor else {
                return Err("subsystem line before any device");
            };
            let model = db
                .vendors
                .get_mut(vendor)
                .and_then(|v| v.models.get_mut(device))
                .ok_or("current device is not in the database")?;
            model
                .subsystems
                .insert(canonicalize(subsystem.key), subsystem.name.into());
            Ok(())
        }
    }
}

/// Work out what kind of line this is, from the line alone
fn classify(line: &str) -> Result<Line<'_>, &'static str> {
    if line.len() < MIN_LINE_LEN || line.starts_with('#') || line.trim().is_empty() {
        return Ok(Line::Ignored);
    }

    match line.bytes().position(is_lower_hex) {
        Some(0) => {
            let id = line.get(..4).ok_or("vendor ID is not valid UTF-8")?;
            if id == END_OF_VENDORS {
                return Ok(Line::EndOfVendors);
            }
            let name = line
                .get(VENDOR_NAME_OFFSET..)
                .ok_or("vendor name is not valid UTF-8")?;
            Ok(Line::Vendor(VendorLine { id, name }))
        }
        Some(1) => {
            if line.len() <= DEVICE_NAME_OFFSET {
                return Err("device line too short");
            }
            let id = line.get(1..5).ok_or("device ID is not valid UTF-8")?;
            let name = line
                .get(DEVICE_NAME_OFFSET..)
                .ok_or("device name is not valid UTF-8")?;
            Ok(Line::Device(DeviceLine { id, name }))
        }
        Some(2) => {
            if line.len() <= SUBSYSTEM_KEY_END {
                return Err("subsystem line too short");
            }
            let key = line
                .get(2..SUBSYSTEM_KEY_END)
                .ok_or("subsystem ID is not valid UTF-8")?;
            let name = line
                .get(SUBSYSTEM_NAME_OFFSET.min(line.len())..)
                .ok_or("subsystem name is not valid UTF-8")?;
            Ok(Line::Subsystem(SubsystemLine { key, name }))
        }
        _ => Err("unrecognized line format"),
    }
}

fn is_lower_hex(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'a'..=b'f')
}
