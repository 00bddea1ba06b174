//! Resolve the raw attributes of PCI devices into rows of names and IDs

use crate::db::PciDatabase;
use crate::ids::IdPair;
use crate::provider::DeviceAttributes;
use crate::provider::DeviceProvider;
use compact_str::CompactString;

/// Name of the subsystem we enumerate
pub const SUBSYSTEM: &str = "pci";

/// Keys of the raw device attributes we use
pub mod keys {
    pub const SLOT: &str = "PCI_SLOT_NAME";
    pub const CLASS: &str = "ID_PCI_CLASS_FROM_DATABASE";
    pub const DRIVER: &str = "DRIVER";
    pub const VENDOR: &str = "ID_VENDOR_FROM_DATABASE";
    pub const MODEL: &str = "ID_MODEL_FROM_DATABASE";
    /// `VVVV:DDDD`
    pub const ID: &str = "PCI_ID";
    /// `VVVV:DDDD`
    pub const SUBSYSTEM_ID: &str = "PCI_SUBSYS_ID";
}

/// Value used for IDs that couldn't be determined
const UNKNOWN_ID: &str = "0";

/// One resolved PCI device
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub pci_slot: CompactString,
    pub pci_class: CompactString,
    pub driver: CompactString,
    pub vendor: CompactString,
    pub model: CompactString,
    pub vendor_id: CompactString,
    pub model_id: CompactString,
    pub subsystem_vendor_id: CompactString,
    pub subsystem_model_id: CompactString,
    pub subsystem_vendor: CompactString,
    pub subsystem_model: CompactString,
}

impl OutputRow {
    /// Names of the fields, in column order
    pub const FIELDS: [&'static str; 11] = [
        "pci_slot",
        "pci_class",
        "driver",
        "vendor",
        "model",
        "vendor_id",
        "model_id",
        "subsystem_vendor_id",
        "subsystem_model_id",
        "subsystem_vendor",
        "subsystem_model",
    ];

    /// `(name, value)` for each field, in column order
    pub fn fields(&self) -> [(&'static str, &str); 11] {
        let values = [
            &self.pci_slot,
            &self.pci_class,
            &self.driver,
            &self.vendor,
            &self.model,
            &self.vendor_id,
            &self.model_id,
            &self.subsystem_vendor_id,
            &self.subsystem_model_id,
            &self.subsystem_vendor,
            &self.subsystem_model,
        ];
        std::array::from_fn(|idx| (Self::FIELDS[idx], values[idx].as_str()))
    }
}

/// Resolve all PCI devices the provider knows about, in enumeration order.
///
/// Provider failures are not errors: if the devices can't be listed the
/// result is empty, and if a device can't be read the rows resolved so far are
/// returned.
pub fn enumerate<P: DeviceProvider>(provider: &P, db: &PciDatabase) -> Vec<OutputRow> {
    let mut rows = vec![];
    let handles = match provider.enumerate(SUBSYSTEM) {
        Ok(handles) => handles,
        Err(err) => {
            tracing::debug!("Could not enumerate {SUBSYSTEM} devices: {err}");
            return rows;
        }
    };
    for handle in &handles {
        let device = match provider.device(handle) {
            Ok(device) => device,
            Err(err) => {
                tracing::debug!("Could not get device: {err}");
                return rows;
            }
        };
        rows.push(resolve_row(db, &device));
    }
    rows
}

/// Resolve a single device from its raw attributes
pub fn resolve_row(db: &PciDatabase, device: &impl DeviceAttributes) -> OutputRow {
    let mut row = OutputRow {
        pci_slot: device.value(keys::SLOT).into(),
        pci_class: device.value(keys::CLASS).into(),
        driver: device.value(keys::DRIVER).into(),
        vendor: device.value(keys::VENDOR).into(),
        model: device.value(keys::MODEL).into(),
        ..Default::default()
    };

    if let Some(ids) = IdPair::parse(device.value(keys::ID)) {
        match db.vendor_name(&ids.vendor) {
            Ok(name) => row.vendor = name.into(),
            Err(err) => tracing::trace!("{}: {err}", row.pci_slot),
        }
        match db.model_description(&ids.vendor, &ids.device, None) {
            Ok(desc) => row.model = desc.into(),
            Err(err) => tracing::trace!("{}: {err}", row.pci_slot),
        }

        if let Some(sub) = IdPair::parse(device.value(keys::SUBSYSTEM_ID)) {
            if let Ok(name) = db.vendor_name(&sub.vendor) {
                row.subsystem_vendor = name.into();
            }
            match db.subsystem_info(&ids.vendor, &ids.device, &sub.vendor, &sub.device) {
                Ok(desc) => row.subsystem_model = desc.into(),
                Err(err) => tracing::trace!("{}: {err}", row.pci_slot),
            }
            row.subsystem_vendor_id = sub.vendor;
            row.subsystem_model_id = sub.device;
        }

        row.vendor_id = ids.vendor;
        row.model_id = ids.device;
    }

    if row.vendor_id.is_empty() {
        row.vendor_id = UNKNOWN_ID.into();
    }
    if row.model_id.is_empty() {
        row.model_id = UNKNOWN_ID.into();
    }
    row
}
