//! End to end tests against a fake sysfs and udev tree

use indoc::indoc;
use pcikoll_core::Configuration;
use pcikoll_core::OutputRow;
use pcikoll_core::provider::DeviceAttributes;
use pcikoll_core::provider::DeviceProvider;
use pcikoll_core::provider::SysfsProvider;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

const PCI_IDS: &str = indoc! {"
    # List of PCI ID's
    1028  Dell
    8086  Intel Corporation
    \t9a49  TigerLake-LP GT2 [Iris Xe Graphics]
    \t\t1028 0a2b  XPS 13 9310
    \ta0f0  Wi-Fi 6 AX201
    ffff  Illegal Vendor ID
    # List of known device classes, subclasses and programming interfaces
    C 00  Unclassified device
"};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sys/bus/pci/devices")).unwrap();
        std::fs::create_dir_all(dir.path().join("udev")).unwrap();
        std::fs::write(dir.path().join("pci.ids"), PCI_IDS).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn add_device(&self, slot: &str, uevent: &str, udev: Option<&str>) {
        let device_dir = self.root().join("sys/bus/pci/devices").join(slot);
        std::fs::create_dir_all(&device_dir).unwrap();
        std::fs::write(device_dir.join("uevent"), uevent).unwrap();
        if let Some(udev) = udev {
            std::fs::write(self.root().join("udev").join(format!("+pci:{slot}")), udev).unwrap();
        }
    }

    fn config(&self) -> Configuration {
        Configuration::builder()
            .pci_ids(self.root().join("pci.ids"))
            .sysfs_root(self.root().join("sys"))
            .udev_data(self.root().join("udev"))
            .build()
            .unwrap()
    }
}

#[test]
fn test_query() {
    let fixture = Fixture::new();
    fixture.add_device(
        "0000:00:14.3",
        indoc! {"
            DRIVER=iwlwifi
            PCI_CLASS=28000
            PCI_ID=8086:A0F0
            PCI_SUBSYS_ID=8086:0244
            PCI_SLOT_NAME=0000:00:14.3
        "},
        None,
    );
    fixture.add_device(
        "0000:00:02.0",
        indoc! {"
            DRIVER=i915
            PCI_CLASS=30000
            PCI_ID=8086:9A49
            PCI_SUBSYS_ID=1028:0A2B
            PCI_SLOT_NAME=0000:00:02.0
        "},
        Some(indoc! {"
            I:5117835
            E:ID_PCI_CLASS_FROM_DATABASE=Display controller
            E:ID_VENDOR_FROM_DATABASE=Intel Corp.
            E:ID_MODEL_FROM_DATABASE=Iris Xe
            G:seat
        "}),
    );

    let rows = pcikoll_core::query(&fixture.config());
    assert_eq!(rows, vec![
        OutputRow {
            pci_slot: "0000:00:02.0".into(),
            pci_class: "Display controller".into(),
            driver: "i915".into(),
            vendor: "Intel Corporation".into(),
            model: "TigerLake-LP GT2 [Iris Xe Graphics]".into(),
            vendor_id: "8086".into(),
            model_id: "9a49".into(),
            subsystem_vendor_id: "1028".into(),
            subsystem_model_id: "0a2b".into(),
            subsystem_vendor: "Dell".into(),
            subsystem_model: "XPS 13 9310".into(),
        },
        OutputRow {
            pci_slot: "0000:00:14.3".into(),
            pci_class: "".into(),
            driver: "iwlwifi".into(),
            vendor: "Intel Corporation".into(),
            model: "Wi-Fi 6 AX201".into(),
            vendor_id: "8086".into(),
            model_id: "a0f0".into(),
            subsystem_vendor_id: "8086".into(),
            subsystem_model_id: "0244".into(),
            subsystem_vendor: "Intel Corporation".into(),
            subsystem_model: "".into(),
        },
    ]);
}

#[test]
fn test_query_without_database() {
    let fixture = Fixture::new();
    fixture.add_device(
        "0000:00:1f.3",
        "PCI_ID=8086:A0C8\nPCI_SLOT_NAME=0000:00:1f.3\n",
        Some("E:ID_VENDOR_FROM_DATABASE=Intel Corporation\n"),
    );
    let mut config = fixture.config();
    config.pci_ids = Some(fixture.root().join("missing.ids"));

    let rows = pcikoll_core::query(&config);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].vendor, "Intel Corporation");
    assert_eq!(rows[0].model, "");
    assert_eq!(rows[0].vendor_id, "8086");
    assert_eq!(rows[0].model_id, "a0c8");
}

#[test]
fn test_query_without_sysfs() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.sysfs_root = fixture.root().join("not-sys");
    assert!(pcikoll_core::query(&config).is_empty());
}

#[test]
fn test_device_without_uevent_stops() {
    let fixture = Fixture::new();
    fixture.add_device("0000:00:00.0", "PCI_ID=8086:9a49\n", None);
    // Sorted after the first one, and unreadable
    std::fs::create_dir_all(fixture.root().join("sys/bus/pci/devices/0000:00:01.0")).unwrap();
    fixture.add_device("0000:00:02.0", "PCI_ID=8086:a0f0\n", None);

    let rows = pcikoll_core::query(&fixture.config());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].model_id, "9a49");
}

#[test]
fn test_sysfs_provider() {
    let fixture = Fixture::new();
    fixture.add_device(
        "0000:00:02.0",
        "PCI_ID=8086:9A49\nDRIVER=i915\n",
        Some("E:DRIVER=stale\nE:ID_MODEL_FROM_DATABASE=Iris Xe\n"),
    );
    let provider = SysfsProvider::new(fixture.root().join("sys"), fixture.root().join("udev"));

    let handles = provider.enumerate("pci").unwrap();
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].name, "0000:00:02.0");
    let device = provider.device(&handles[0]).unwrap();
    assert_eq!(device.value("DRIVER"), "i915");
    assert_eq!(device.value("ID_MODEL_FROM_DATABASE"), "Iris Xe");
    assert_eq!(device.attribute("PCI_SUBSYS_ID"), None);

    assert!(provider.enumerate("usb").is_err());
}
