//! Command line interface definition

use camino::Utf8PathBuf;
use clap::Parser;
use clap::Subcommand;
use pcikoll_core::config::DEFAULT_SYSFS_ROOT;
use pcikoll_core::config::DEFAULT_UDEV_DATA;
use std::fmt::Display;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[clap(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to pci.ids (default: search the usual distro locations)
    #[arg(long, env = "PCIKOLL_PCI_IDS")]
    pub pci_ids: Option<Utf8PathBuf>,
    /// Where sysfs is mounted
    #[arg(long, default_value = DEFAULT_SYSFS_ROOT)]
    pub sysfs_root: Utf8PathBuf,
    /// Directory of the udev database
    #[arg(long, default_value = DEFAULT_UDEV_DATA)]
    pub udev_data: Utf8PathBuf,
    /// Output format to use
    #[arg(short, long, default_value_t = Format::Human)]
    pub format: Format,
    /// Operation to perform
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List PCI devices with resolved names
    Devices,
    /// Look up IDs in pci.ids
    Lookup {
        /// Vendor ID (for example 8086)
        vendor: String,
        /// Device ID (for example 9a49)
        model: Option<String>,
        /// Subsystem as VENDOR:DEVICE (for example 1028:0a2b), requires a
        /// device ID
        #[arg(long, requires = "model")]
        subsystem: Option<String>,
    },
}

/// Output format to use
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, clap::ValueEnum)]
pub enum Format {
    /// Human-readable output
    Human,
    /// JSON formatted output
    #[cfg(feature = "json")]
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            #[cfg(feature = "json")]
            Self::Json => write!(f, "json"),
        }
    }
}
