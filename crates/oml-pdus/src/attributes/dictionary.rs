use std::collections::HashMap;
use std::sync::OnceLock;

/// Wire encoding of an attribute. Every encoding starts with the 1-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrEncoding {
    /// Tag followed by exactly n value bytes
    Fixed(u8),
    /// Tag followed by a single value byte
    Tv,
    /// Tag, 1-byte length, value
    Tlv,
    /// Tag, 2-byte big-endian length, value
    Tl16v,
}

impl AttrEncoding {
    /// Largest value this encoding can carry
    pub fn max_value_len(self) -> usize {
        match self {
            AttrEncoding::Fixed(n) => n as usize,
            AttrEncoding::Tv => 1,
            AttrEncoding::Tlv => u8::MAX as usize,
            AttrEncoding::Tl16v => u16::MAX as usize,
        }
    }
}

use AttrEncoding::*;

/// Attribute tag to encoding, GSM 12.21 clause 9.4 with Siemens BS-11 and ip.access extensions
const NM_ATT_DEF: &[(u8, AttrEncoding)] = &[
    (0x01, Fixed(3)),   // Abis channel
    (0x02, Tl16v),      // Additional info
    (0x03, Tl16v),      // Additional text
    (0x04, Tv),         // Administrative state
    (0x05, Tl16v),      // ARFCN list
    (0x06, Tv),         // Autonomously report
    (0x07, Tl16v),      // Availability status
    (0x08, Fixed(2)),   // BCCH ARFCN
    (0x09, Tv),         // BSIC
    (0x0a, Tv),         // BTS air timer
    (0x0b, Tv),         // CCCH load indication period
    (0x0c, Tv),         // CCCH load threshold
    (0x0d, Tv),         // Channel combination
    (0x0e, Tl16v),      // Connection failure criterion
    (0x0f, Tl16v),      // Destination
    (0x11, Tv),         // Event type
    (0x12, Tl16v),      // File id
    (0x13, Tl16v),      // File version
    (0x14, Fixed(2)),   // GSM time
    (0x15, Tv),         // HSN
    (0x16, Tl16v),      // HW configuration
    (0x17, Tl16v),      // HW description
    (0x18, Tv),         // Intave parameter
    (0x19, Fixed(6)),   // Interference level boundaries
    (0x1a, Tl16v),      // List of required attributes
    (0x1b, Tv),         // MAIO
    (0x1c, Tv),         // Manufacturer dependent state
    (0x1d, Tl16v),      // Manufacturer dependent thresholds
    (0x1e, Tl16v),      // Manufacturer id
    (0x1f, Tv),         // Max timing advance
    (0x20, Fixed(2)),   // Multi-drop BSC link
    (0x21, Fixed(2)),   // Multi-drop next BTS link
    (0x22, Tv),         // NACK causes
    (0x23, Tv),         // Ny1
    (0x24, Tv),         // Operational state
    (0x25, Tl16v),      // Overload period
    (0x26, Tl16v),      // Physical config
    (0x27, Tv),         // Power class
    (0x28, Fixed(3)),   // Power output thresholds
    (0x29, Fixed(3)),   // Probable cause
    (0x2a, Tv),         // RACH busy threshold
    (0x2b, Fixed(2)),   // RACH load averaging slots
    (0x2c, Tv),         // Radio sub channel
    (0x2d, Tv),         // RF max power reduction
    (0x2e, Tl16v),      // Site inputs
    (0x2f, Tl16v),      // Site outputs
    (0x30, Tl16v),      // Source
    (0x31, Tv),         // Specific problems
    (0x32, Fixed(2)),   // Starting time
    (0x33, Fixed(7)),   // T200
    (0x34, Tv),         // TEI
    (0x35, Fixed(2)),   // Test duration
    (0x36, Tv),         // Test no
    (0x37, Tl16v),      // Test report info
    (0x38, Fixed(2)),   // VSWR thresholds
    (0x39, Tv),         // Window size
    (0x3d, Tlv),        // BS-11 RSSI offset
    (0x3e, Tlv),        // BS-11 TX power
    (0x3f, Tlv),        // BS-11 diversity
    (0x40, Tv),         // TSC
    (0x41, Tl16v),      // SW configuration
    (0x43, Tv),         // Perceived severity
    (0x44, Tl16v),      // Get attribute response info
    (0x45, Tl16v),      // HW conf change notification
    (0x46, Tv),         // Outstanding alarm sequence
    (0x47, Tl16v),      // File data
    (0x48, Tl16v),      // Measurement result
    (0x4c, Tlv),        // BS-11 ESN firmware code no
    (0x4f, Tlv),        // BS-11 ESN hardware code no
    (0x55, Tlv),        // BS-11 ESN PCB serial
    (0x80, Fixed(4)),   // ip.access destination IP
    (0x81, Fixed(2)),   // ip.access destination port
    (0x85, Tv),         // ip.access stream id
    (0x86, Tl16v),      // ip.access NV flags
    (0x87, Fixed(2)),   // ip.access frequency control
    (0x89, Fixed(6)),   // ip.access secondary OML config
    (0x8a, Fixed(8)),   // ip.access IP interface config
    (0x8b, Fixed(12)),  // ip.access IP gateway config
    (0x8e, Tl16v),      // ip.access location
    (0x91, Tl16v),      // ip.access unit id
    (0x93, Tl16v),      // ip.access unit name
    (0x94, Tl16v),      // ip.access SNMP config
    (0x95, Tl16v),      // ip.access primary OML config list
    (0x96, Tl16v),      // ip.access primary OML fallback timeout
    (0xa0, Fixed(2)),   // BS-11 bit error threshold
    (0xa1, Tlv),        // BS-11 boot SW version
    (0xa3, Tv),         // BS-11 CCLK accuracy
    (0xa4, Tv),         // BS-11 CCLK type
    (0xa8, Tlv),
    (0xab, Tv),         // BS-11 L1 protocol type
    (0xac, Tv),         // BS-11 line config
    (0xc6, Tlv),        // BS-11 LMT logon session
    (0xc7, Tlv),        // BS-11 LMT login time
    (0xc8, Tlv),        // BS-11 LMT user access level
    (0xc9, Tlv),        // BS-11 LMT user name
    (0xd5, Tlv),
    (0xf0, Tlv),        // BS-11 BTS state
    (0xf1, Tlv),        // BS-11 E1 state
    (0xf2, Tlv),        // BS-11 PLL
    (0xfc, Tlv),        // BS-11 PLL mode
    (0xfd, Tlv),        // BS-11 password
];

static DICTIONARY: OnceLock<HashMap<u8, AttrEncoding>> = OnceLock::new();

/// The process-wide attribute dictionary, built on first use and immutable afterwards
pub fn dictionary() -> &'static HashMap<u8, AttrEncoding> {
    DICTIONARY.get_or_init(|| NM_ATT_DEF.iter().copied().collect())
}

/// Encoding for `id`, or None if the tag is unknown
pub fn lookup(id: u8) -> Option<AttrEncoding> {
    dictionary().get(&id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_tags() {
        assert_eq!(dictionary().len(), NM_ATT_DEF.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(0x12), Some(Tl16v));
        assert_eq!(lookup(0x04), Some(Tv));
        assert_eq!(lookup(0x33), Some(Fixed(7)));
        assert_eq!(lookup(0xc9), Some(Tlv));
        assert_eq!(lookup(0x10), None);
        assert_eq!(lookup(0x42), None);
    }
}
