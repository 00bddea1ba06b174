//! Error types

use compact_str::CompactString;
use std::path::PathBuf;

/// Errors produced by the database, the lookups and the device providers
///
/// None of these are fatal for [`crate::query`], they all have a degraded
/// fallback. They are still exposed for library users that want to know.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Lookup key is not in the database
    #[error("{what} not found in pci.ids: {key}")]
    NotFound {
        what: &'static str,
        key: CompactString,
    },
    /// A database line that could not be used
    #[error("Malformed pci.ids line {line}: {reason}")]
    MalformedLine { line: usize, reason: &'static str },
    /// A file or directory we need could not be read
    #[error("Failed to read {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A device handle that the provider doesn't know about
    #[error("No such device: {handle}")]
    NoSuchDevice { handle: CompactString },
}

impl Error {
    pub(crate) fn not_found(what: &'static str, key: impl Into<CompactString>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Is this a lookup miss (as opposed to an I/O or format problem)?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
