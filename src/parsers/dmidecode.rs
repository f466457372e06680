use crate::facts::FlatFactMap;

/// Marker line opening the dmidecode section we care about.
pub const SYSTEM_SECTION: &str = "System Information";

/// Prefix of the structure header that opens every dmidecode record.
pub const HANDLE_BOUNDARY: &str = "Handle ";

/// Scanner state for the single forward pass over dmidecode output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the section marker line.
    Seeking,
    /// Inside the target section, collecting key-value lines.
    InSection,
    /// Past the end of the section; nothing else is examined.
    Terminated,
}

/// Extract the key-value pairs of one section from multi-section
/// `dmidecode` style output.
///
/// Lines are trimmed before every check. The marker line itself contributes
/// no pair. Inside the section, a blank line or a line starting with
/// `boundary` ends parsing for good, even if the section marker shows up
/// again later. Lines without a colon (continuation lines) are skipped but do
/// not terminate the section. A missing section is not an error; the result
/// is simply empty.
pub fn parse_section(raw: &str, section: &str, boundary: &str) -> FlatFactMap {
    let mut facts = FlatFactMap::new();
    let mut state = ScanState::Seeking;

    for line in raw.lines() {
        let line = line.trim();
        match state {
            ScanState::Seeking => {
                if line.starts_with(section) {
                    state = ScanState::InSection;
                }
            }
            ScanState::InSection => {
                if line.is_empty() || line.starts_with(boundary) {
                    state = ScanState::Terminated;
                } else if let Some((key, value)) = line.split_once(':') {
                    facts.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
            ScanState::Terminated => break,
        }
    }

    facts
}

/// Parse the "System Information" section of `dmidecode -t system` output.
pub fn parse_system_information(raw: &str) -> FlatFactMap {
    parse_section(raw, SYSTEM_SECTION, HANDLE_BOUNDARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# dmidecode 3.2
Getting SMBIOS data from sysfs.
SMBIOS 2.7 present.

Handle 0x0100, DMI type 1, 27 bytes
System Information
\tManufacturer: Xen
\tProduct Name: HVM domU
\tVersion: 4.4.4OVM
\tSerial Number: 089271ba-b91f-4230-acce-be01a22fab09
\tUUID: 089271ba-b91f-4230-acce-be01a22fab09
\tWake-up Type: Power Switch
\tSKU Number: B88854
\tFamily: Not Specified

Handle 0x0200, DMI type 2, 15 bytes
Base Board Information
\tManufacturer: Should Not Appear
";

    #[test]
    fn test_extracts_only_system_information_section() {
        let facts = parse_system_information(SAMPLE);
        assert_eq!(facts.len(), 8);
        assert_eq!(facts["Manufacturer"], "Xen");
        assert_eq!(facts["Product Name"], "HVM domU");
        assert_eq!(facts["SKU Number"], "B88854");
        assert_eq!(facts["Family"], "Not Specified");
    }

    #[test]
    fn test_stops_at_blank_line() {
        let raw = "System Information\n Key: Val\n\nHandle 0x01\n Key2: Val2\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts["Key"], "Val");
        assert!(!facts.contains_key("Key2"));
    }

    #[test]
    fn test_stops_at_handle_boundary() {
        let raw = "System Information\n Key: Val\nHandle 0x0200, DMI type 2\n Key2: Val2\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts.len(), 1);
        assert!(!facts.contains_key("Key2"));
    }

    #[test]
    fn test_termination_is_permanent() {
        // A second marker after the boundary must not reopen the section.
        let raw = "System Information\n A: 1\n\nSystem Information\n B: 2\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts["A"], "1");
    }

    #[test]
    fn test_colon_free_line_is_skipped_not_terminating() {
        let raw = "System Information\n A: 1\n continuation text\n B: 2\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts["B"], "2");
    }

    #[test]
    fn test_missing_section_yields_empty_map() {
        let raw = "Handle 0x0100\nBase Board Information\n Manufacturer: Xen\n";
        assert!(parse_system_information(raw).is_empty());
    }

    #[test]
    fn test_empty_value_is_kept() {
        // Unlike the imageinfo parser, dmidecode fields may legitimately be
        // empty and are stored as such.
        let raw = "System Information\n Family:\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts["Family"], "");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let raw = "System Information\n A: 1\n A: 2\n";
        let facts = parse_system_information(raw);
        assert_eq!(facts["A"], "2");
    }
}
