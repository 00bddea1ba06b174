//! Raw `VVVV:DDDD` identifiers as reported by the kernel (`PCI_ID`,
//! `PCI_SUBSYS_ID`)

use compact_str::CompactString;
use compact_str::format_compact;
use winnow::ModalResult;
use winnow::Parser;
use winnow::combinator::separated_pair;
use winnow::combinator::trace;
use winnow::token::take_till;

/// A vendor and device ID pair, lower case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdPair {
    pub vendor: CompactString,
    pub device: CompactString,
}

impl IdPair {
    /// Split `"VVVV:DDDD"` into its two halves.
    ///
    /// Returns `None` unless there are exactly two non-empty parts. The
    /// parts are not otherwise validated.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = canonicalize(raw);
        id_pair
            .parse(raw.as_str())
            .ok()
            .map(|(vendor, device)| Self {
                vendor: vendor.into(),
                device: device.into(),
            })
    }

    /// Key of this pair as used for subsystems in `pci.ids`
    pub fn subsystem_key(&self) -> CompactString {
        format_compact!("{} {}", self.vendor, self.device)
    }
}

impl std::fmt::Display for IdPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.vendor, self.device)
    }
}

/// `pci.ids` uses lower case hex everywhere, so we follow suit
pub fn canonicalize(id: &str) -> CompactString {
    let mut id = CompactString::from(id);
    id.make_ascii_lowercase();
    id
}

fn id_pair<'input>(i: &mut &'input str) -> ModalResult<(&'input str, &'input str)> {
    trace("id_pair", separated_pair(id_part, ':', id_part)).parse_next(i)
}

fn id_part<'input>(i: &mut &'input str) -> ModalResult<&'input str> {
    trace("id_part", take_till(1.., ':')).parse_next(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!(
            IdPair::parse("8086:1234"),
            Some(IdPair {
                vendor: "8086".into(),
                device: "1234".into()
            })
        );
        assert_eq!(
            IdPair::parse("10DE:1C82"),
            Some(IdPair {
                vendor: "10de".into(),
                device: "1c82".into()
            })
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(IdPair::parse(""), None);
        assert_eq!(IdPair::parse("badid"), None);
        assert_eq!(IdPair::parse("8086:"), None);
        assert_eq!(IdPair::parse(":1234"), None);
        assert_eq!(IdPair::parse("8086:1234:5678"), None);
    }

    #[test]
    fn test_subsystem_key() {
        let pair = IdPair::parse("1028:0A2B").unwrap();
        assert_eq!(pair.subsystem_key(), "1028 0a2b");
        assert_eq!(pair.to_string(), "1028:0a2b");
    }
}
