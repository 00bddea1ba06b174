//! Configuration of where data is read from

use crate::db::PciDatabase;
use crate::provider::SysfsProvider;
use std::path::Path;
use std::path::PathBuf;

/// Locations of `pci.ids` used by various distros, in order of preference
pub const DEFAULT_PCI_IDS_PATHS: &[&str] = &[
    "/usr/share/misc/pci.ids",
    "/usr/share/hwdata/pci.ids",
    "/usr/share/pci.ids",
];

pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

pub const DEFAULT_UDEV_DATA: &str = "/run/udev/data";

/// Describes where to find the database and the devices
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder)]
#[non_exhaustive]
pub struct Configuration {
    /// Path to `pci.ids`. If not set, [`DEFAULT_PCI_IDS_PATHS`] are searched.
    #[builder(default = "None", setter(into, strip_option))]
    pub pci_ids: Option<PathBuf>,
    /// Where sysfs is mounted
    #[builder(default = "PathBuf::from(DEFAULT_SYSFS_ROOT)", setter(into))]
    pub sysfs_root: PathBuf,
    /// Directory of the udev database
    #[builder(default = "PathBuf::from(DEFAULT_UDEV_DATA)", setter(into))]
    pub udev_data: PathBuf,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// The `pci.ids` file to use, if any exists
    pub fn pci_ids_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.pci_ids {
            return Some(path.clone());
        }
        DEFAULT_PCI_IDS_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Load the database, or an empty one if it isn't available
    pub fn load_database(&self) -> PciDatabase {
        match self.pci_ids_path() {
            Some(path) => PciDatabase::load_or_empty(&path),
            None => {
                tracing::warn!(
                    "Could not find pci.ids in any of {DEFAULT_PCI_IDS_PATHS:?}, names will not be \
                     resolved"
                );
                PciDatabase::default()
            }
        }
    }

    /// Device provider reading from the configured sysfs and udev locations
    pub fn provider(&self) -> SysfsProvider {
        SysfsProvider::new(&self.sysfs_root, &self.udev_data)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            pci_ids: None,
            sysfs_root: DEFAULT_SYSFS_ROOT.into(),
            udev_data: DEFAULT_UDEV_DATA.into(),
        }
    }
}
