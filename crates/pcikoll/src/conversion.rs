use crate::cli::Cli;
use pcikoll_core::Configuration;

impl TryFrom<&Cli> for Configuration {
    type Error = eyre::Error;

    fn try_from(value: &Cli) -> Result<Self, Self::Error> {
        let mut builder = Self::builder();

        if let Some(ref pci_ids) = value.pci_ids {
            builder.pci_ids(pci_ids.as_std_path());
        }
        builder.sysfs_root(value.sysfs_root.as_std_path());
        builder.udev_data(value.udev_data.as_std_path());

        Ok(builder.build()?)
    }
}
