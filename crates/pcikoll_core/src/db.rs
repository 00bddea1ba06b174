//! The `pci.ids` database and lookups of names in it

use crate::Error;
use crate::ids::canonicalize;
use ahash::AHashMap;
use compact_str::CompactString;
use compact_str::format_compact;
use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;

mod parser;

/// A database of PCI vendor, device and subsystem names
///
/// Built once from `pci.ids` and read-only afterwards. All IDs are stored as
/// lower case hex strings, the same convention `pci.ids` itself uses.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PciDatabase {
    vendors: AHashMap<CompactString, VendorEntry>,
}

/// A vendor line and the devices listed under it
#[derive(Debug, PartialEq, Eq)]
pub struct VendorEntry {
    id: CompactString,
    name: CompactString,
    models: AHashMap<CompactString, ModelEntry>,
}

/// A device ("model") line and the subsystems listed under it
#[derive(Debug, PartialEq, Eq)]
pub struct ModelEntry {
    id: CompactString,
    description: CompactString,
    /// Keyed by `"<subvendor> <subdevice>"`
    subsystems: AHashMap<CompactString, CompactString>,
}

impl PciDatabase {
    /// Parse `pci.ids` from a reader.
    ///
    /// This never fails. Lines that can't be used are logged and skipped, and
    /// a read error ends the parse with what was collected up to that point.
    pub fn parse(input: impl BufRead) -> Self {
        parser::parse_database(input)
    }

    /// Parse `pci.ids` from a string
    pub fn parse_str(input: &str) -> Self {
        Self::parse(input.as_bytes())
    }

    /// Parse the `pci.ids` file at `path`
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(|err| Error::unavailable(path, err))?;
        Ok(Self::parse(std::io::BufReader::new(file)))
    }

    /// Like [`Self::from_path`], but an unreadable file gives an empty database
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(db) => {
                tracing::debug!("Loaded {} vendors from {}", db.len(), path.display());
                db
            }
            Err(err) => {
                tracing::warn!("{err}, names will not be resolved");
                Self::default()
            }
        }
    }

    /// Number of vendors
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Iterate over all vendors (in no particular order)
    pub fn vendors(&self) -> impl Iterator<Item = &VendorEntry> {
        self.vendors.values()
    }

    pub fn vendor(&self, vendor_id: &str) -> Option<&VendorEntry> {
        self.vendors.get(canonicalize(vendor_id).as_str())
    }

    pub fn model(&self, vendor_id: &str, model_id: &str) -> Option<&ModelEntry> {
        self.vendor(vendor_id).and_then(|v| v.model(model_id))
    }

    /// Name of the vendor with the given ID
    pub fn vendor_name(&self, vendor_id: &str) -> Result<&str, Error> {
        self.vendor(vendor_id)
            .map(VendorEntry::name)
            .ok_or_else(|| Error::not_found("Vendor", vendor_id))
    }

    /// Description of a device.
    ///
    /// If a subsystem key (`"<subvendor> <subdevice>"`) is given and known,
    /// its description is appended after a comma. An unknown subsystem is not
    /// an error, you just get the plain device description.
    pub fn model_description(
        &self,
        vendor_id: &str,
        model_id: &str,
        subsystem: Option<&str>,
    ) -> Result<Cow<'_, str>, Error> {
        let model = self
            .model(vendor_id, model_id)
            .ok_or_else(|| Error::not_found("Model", format_compact!("{vendor_id}:{model_id}")))?;
        match subsystem.and_then(|key| model.subsystem(key)) {
            Some(sub) => Ok(Cow::Owned(format!("{}, {sub}", model.description))),
            None => Ok(Cow::Borrowed(model.description())),
        }
    }

    /// Description of a subsystem of the given device
    pub fn subsystem_info(
        &self,
        vendor_id: &str,
        model_id: &str,
        subsystem_vendor_id: &str,
        subsystem_device_id: &str,
    ) -> Result<&str, Error> {
        let key = format_compact!("{subsystem_vendor_id} {subsystem_device_id}");
        self.model(vendor_id, model_id)
            .and_then(|m| m.subsystem(&key))
            .ok_or_else(|| Error::not_found("Subsystem", key))
    }
}

impl VendorEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelEntry> {
        self.models.values()
    }

    pub fn model(&self, model_id: &str) -> Option<&ModelEntry> {
        self.models.get(canonicalize(model_id).as_str())
    }
}

impl ModelEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All subsystems as `(key, description)`
    pub fn subsystems(&self) -> impl Iterator<Item = (&str, &str)> {
        self.subsystems
            .iter()
            .map(|(key, desc)| (key.as_str(), desc.as_str()))
    }

    pub fn subsystem(&self, key: &str) -> Option<&str> {
        self.subsystems
            .get(canonicalize(key).as_str())
            .map(CompactString::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const DB: &str = indoc! {"
        # Sample
        8086  Intel Corporation
        \t1234  Test Device
        \t\t1028 0a2b  Dell Variant
        \t1237  440FX - 82441FX PMC [Natoma]
        10de  NVIDIA Corporation
        \t1c82  GP107 [GeForce GTX 1050 Ti]
    "};

    #[test]
    fn test_vendor_name() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(db.vendor_name("8086").unwrap(), "Intel Corporation");
        assert_eq!(db.vendor_name("10de").unwrap(), "NVIDIA Corporation");
        assert!(db.vendor_name("1af4").unwrap_err().is_not_found());
    }

    #[test]
    fn test_model_description() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(
            db.model_description("8086", "1234", None).unwrap(),
            "Test Device"
        );
        assert_eq!(
            db.model_description("8086", "1237", None).unwrap(),
            "440FX - 82441FX PMC [Natoma]"
        );
        // Device exists, but under another vendor
        assert!(
            db.model_description("8086", "1c82", None)
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            db.model_description("ffee", "1234", None)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_model_description_with_subsystem() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(
            db.model_description("8086", "1234", Some("1028 0a2b"))
                .unwrap(),
            "Test Device, Dell Variant"
        );
        // Unknown subsystem is a soft miss
        assert_eq!(
            db.model_description("8086", "1234", Some("1028 ffff"))
                .unwrap(),
            "Test Device"
        );
    }

    #[test]
    fn test_subsystem_info() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(
            db.subsystem_info("8086", "1234", "1028", "0a2b").unwrap(),
            "Dell Variant"
        );
        let err = db.subsystem_info("8086", "1234", "1028", "0a2c").unwrap_err();
        assert_eq!(err.to_string(), "Subsystem not found in pci.ids: 1028 0a2c");
        assert!(
            db.subsystem_info("8086", "9999", "1028", "0a2b")
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_case_insensitive() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(db.vendor_name("10DE").unwrap(), db.vendor_name("10de").unwrap());
        assert_eq!(
            db.model_description("10DE", "1C82", None).unwrap(),
            "GP107 [GeForce GTX 1050 Ti]"
        );
        assert_eq!(
            db.subsystem_info("8086", "1234", "1028", "0A2B").unwrap(),
            "Dell Variant"
        );
    }

    #[test]
    fn test_accessors() {
        let db = PciDatabase::parse_str(DB);
        assert_eq!(db.len(), 2);
        assert!(!db.is_empty());
        let intel = db.vendor("8086").unwrap();
        assert_eq!(intel.id(), "8086");
        let mut models: Vec<_> = intel.models().map(ModelEntry::id).collect();
        models.sort_unstable();
        assert_eq!(models, vec!["1234", "1237"]);
        let model = intel.model("1234").unwrap();
        assert_eq!(
            model.subsystems().collect::<Vec<_>>(),
            vec![("1028 0a2b", "Dell Variant")]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pci.ids");
        let err = PciDatabase::from_path(&path).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
        assert!(PciDatabase::load_or_empty(&path).is_empty());
    }
}
