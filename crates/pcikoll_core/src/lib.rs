//! # `pcikoll_core` - Core functionality for pcikoll
//!
//! Resolves human readable vendor, device and subsystem names for the PCI
//! devices on a system, using the `pci.ids` database shipped by most
//! distributions.
//!
//! The pieces are:
//! * [`db::PciDatabase`]: the parsed `pci.ids` file and the name lookups.
//! * [`provider`]: where devices and their raw attributes come from (sysfs and
//!   the udev database on Linux).
//! * [`enrich`]: turns the raw attributes of each device into an
//!   [`enrich::OutputRow`].
//!
//! Everything here is Linux only and should work without root access.

pub mod config;
pub mod db;
pub mod enrich;
mod error;
pub mod ids;
pub mod provider;

pub use config::Configuration;
pub use db::PciDatabase;
pub use enrich::OutputRow;
pub use error::Error;

/// Load the database and produce one resolved row per PCI device.
///
/// This never fails: an unavailable database gives unresolved rows, and an
/// unavailable device list gives no rows.
pub fn query(config: &Configuration) -> Vec<OutputRow> {
    let db = config.load_database();
    let provider = config.provider();
    enrich::enumerate(&provider, &db)
}
