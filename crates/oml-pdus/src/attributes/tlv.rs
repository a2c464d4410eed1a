use core::fmt;

use oml_core::{ByteBuffer, PduParseErr};
use oml_core::bytebuffer::hex;

use crate::attributes::dictionary::{self, AttrEncoding};
use crate::enums::nm_attr::NmAttr;

/// A single OML attribute: tag, the encoding it is (or will be) serialized with, and its value.
///
/// Decoded attributes always carry the dictionary encoding for their tag. Outbound attributes may
/// pick a different one where peers expect it, e.g. file ids sent as 8-bit TLV during software loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: u8,
    pub encoding: AttrEncoding,
    pub value: Vec<u8>,
}

impl Attribute {
    /// Attribute with the encoding the dictionary prescribes for `id`
    pub fn new(id: u8, value: &[u8]) -> Result<Self, PduParseErr> {
        let encoding = dictionary::lookup(id)
            .ok_or(PduParseErr::MalformedAttribute { id, reason: "unknown attribute id" })?;
        Ok(Self { id, encoding, value: value.to_vec() })
    }

    pub fn tv(id: NmAttr, value: u8) -> Self {
        Self { id: id.into_raw(), encoding: AttrEncoding::Tv, value: vec![value] }
    }

    pub fn tlv(id: NmAttr, value: &[u8]) -> Self {
        Self { id: id.into_raw(), encoding: AttrEncoding::Tlv, value: value.to_vec() }
    }

    pub fn tl16v(id: NmAttr, value: &[u8]) -> Self {
        Self { id: id.into_raw(), encoding: AttrEncoding::Tl16v, value: value.to_vec() }
    }

    /// First value byte, for single-octet attributes
    pub fn value_u8(&self) -> Option<u8> {
        self.value.first().copied()
    }

    /// Serialize this attribute into the given ByteBuffer.
    pub fn to_bytebuf(&self, buffer: &mut ByteBuffer) -> Result<(), PduParseErr> {
        let len = self.value.len();
        let max = self.encoding.max_value_len();
        let ok = match self.encoding {
            AttrEncoding::Fixed(_) | AttrEncoding::Tv => len == max,
            AttrEncoding::Tlv | AttrEncoding::Tl16v => len <= max,
        };
        if !ok {
            return Err(PduParseErr::InconsistentLength { expected: max, found: len });
        }

        buffer.write_u8(self.id);
        match self.encoding {
            AttrEncoding::Fixed(_) | AttrEncoding::Tv => {}
            AttrEncoding::Tlv => buffer.write_u8(len as u8),
            AttrEncoding::Tl16v => buffer.write_u16(len as u16),
        }
        buffer.write_slice(&self.value);
        Ok(())
    }

    /// Parse one attribute at the current position, using the dictionary to find its encoding.
    /// Never reads past the end of the buffer window.
    pub fn from_bytebuf(buffer: &mut ByteBuffer) -> Result<Self, PduParseErr> {
        let id = buffer.read_u8("attribute id")?;
        let encoding = dictionary::lookup(id)
            .ok_or(PduParseErr::MalformedAttribute { id, reason: "unknown attribute id" })?;

        let len = match encoding {
            AttrEncoding::Fixed(n) => n as usize,
            AttrEncoding::Tv => 1,
            AttrEncoding::Tlv => buffer.read_u8("attribute length")
                .map_err(|_| PduParseErr::MalformedAttribute { id, reason: "length field truncated" })? as usize,
            AttrEncoding::Tl16v => buffer.read_u16("attribute length")
                .map_err(|_| PduParseErr::MalformedAttribute { id, reason: "length field truncated" })? as usize,
        };
        if len > buffer.get_len_remaining() {
            return Err(PduParseErr::MalformedAttribute { id, reason: "value exceeds remaining buffer" });
        }
        let value = buffer.read_slice(len, "attribute value")?.to_vec();
        Ok(Attribute { id, encoding, value })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match NmAttr::try_from(self.id) {
            Ok(a) => write!(f, "{} [{}]", a, hex(&self.value)),
            Err(_) => write!(f, "ATTR(0x{:02x}) [{}]", self.id, hex(&self.value)),
        }
    }
}

/// Ordered list of decoded attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    attrs: Vec<Attribute>,
}

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attr: Attribute) {
        self.attrs.push(attr);
    }

    /// First attribute with tag `id`
    pub fn get(&self, id: u8) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.id == id)
    }

    pub fn get_attr(&self, id: NmAttr) -> Option<&Attribute> {
        self.get(id.into_raw())
    }

    pub fn contains(&self, id: NmAttr) -> bool {
        self.get_attr(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn into_vec(self) -> Vec<Attribute> {
        self.attrs
    }
}

impl From<Vec<Attribute>> for AttrList {
    fn from(attrs: Vec<Attribute>) -> Self {
        Self { attrs }
    }
}

impl fmt::Display for AttrList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ ")?;
        for a in &self.attrs {
            write!(f, "{}; ", a)?;
        }
        write!(f, "}}")
    }
}

/// Decode a complete attribute block. Any unknown tag or truncated value fails the whole block.
pub fn decode_attrs(data: &[u8]) -> Result<AttrList, PduParseErr> {
    let mut buffer = ByteBuffer::from_bytes(data);
    let mut list = AttrList::new();
    while buffer.get_len_remaining() > 0 {
        list.push(Attribute::from_bytebuf(&mut buffer)?);
    }
    Ok(list)
}

/// Serialize attributes back to back
pub fn encode_attrs(attrs: &[Attribute]) -> Result<Vec<u8>, PduParseErr> {
    let mut buffer = ByteBuffer::new_autoexpand(attrs.iter().map(|a| a.value.len() + 3).sum());
    for a in attrs {
        a.to_bytebuf(&mut buffer)?;
    }
    Ok(buffer.into_bytes())
}

#[cfg(test)]
mod tests {
    use oml_core::debug;
    use super::*;

    #[test]
    fn test_roundtrip_each_encoding() {
        debug::setup_logging_verbose();
        let attrs = vec![
            Attribute::new(0x01, &[0x00, 0x01, 0xff]).unwrap(),     // Fixed(3)
            Attribute::new(0x04, &[0x02]).unwrap(),                 // TV
            Attribute::new(0xc9, b"operator").unwrap(),             // TLV
            Attribute::new(0x12, b"BTSBMC76").unwrap(),             // TL16V
            Attribute::new(0x07, &[]).unwrap(),                     // TL16V, empty
        ];
        let bytes = encode_attrs(&attrs).unwrap();
        tracing::info!("encoded: {}", hex(&bytes));
        assert_eq!(&bytes[..5], &[0x01, 0x00, 0x01, 0xff, 0x04]);
        assert_eq!(&bytes[6..9], &[0xc9, 0x08, b'o']);

        let decoded = decode_attrs(&bytes).unwrap();
        assert_eq!(decoded.into_vec(), attrs);
    }

    #[test]
    fn test_roundtrip_whole_dictionary() {
        let mut ids: Vec<u8> = dictionary::dictionary().keys().copied().collect();
        ids.sort();

        let mut attrs = Vec::new();
        for id in ids {
            let lens = match dictionary::lookup(id).unwrap() {
                AttrEncoding::Fixed(n) => vec![n as usize],
                AttrEncoding::Tv => vec![1],
                AttrEncoding::Tlv => vec![0, 1, 255],
                AttrEncoding::Tl16v => vec![0, 300],
            };
            for len in lens {
                let value: Vec<u8> = (0..len).map(|i| (i as u8) ^ id).collect();
                attrs.push(Attribute::new(id, &value).unwrap());
            }
        }

        let bytes = encode_attrs(&attrs).unwrap();
        let decoded = decode_attrs(&bytes).unwrap();
        assert_eq!(decoded.len(), attrs.len());
        assert_eq!(decoded.into_vec(), attrs);
    }

    #[test]
    fn test_tl16v_length_is_big_endian() {
        let value = vec![0xab; 0x0102];
        let bytes = encode_attrs(&[Attribute::new(0x47, &value).unwrap()]).unwrap();
        assert_eq!(&bytes[..3], &[0x47, 0x01, 0x02]);
        assert_eq!(bytes.len(), 3 + 0x0102);
    }

    #[test]
    fn test_truncated_tlv_is_malformed() {
        // TL16V declaring 16 bytes with only 3 present
        let err = decode_attrs(&[0x12, 0x00, 0x10, b'a', b'b', b'c']).unwrap_err();
        assert!(matches!(err, PduParseErr::MalformedAttribute { id: 0x12, .. }));

        // TLV length byte itself missing
        let err = decode_attrs(&[0xc9]).unwrap_err();
        assert!(matches!(err, PduParseErr::MalformedAttribute { id: 0xc9, .. }));

        // Fixed(3) with 2 bytes
        let err = decode_attrs(&[0x01, 0x00, 0x01]).unwrap_err();
        assert!(matches!(err, PduParseErr::MalformedAttribute { id: 0x01, .. }));
    }

    #[test]
    fn test_unknown_id_is_malformed() {
        let err = decode_attrs(&[0x24, 0x02, 0x10, 0x00]).unwrap_err();
        assert_eq!(err, PduParseErr::MalformedAttribute { id: 0x10, reason: "unknown attribute id" });
    }

    #[test]
    fn test_encode_rejects_bad_length() {
        let bad_tv = Attribute { id: 0x04, encoding: AttrEncoding::Tv, value: vec![1, 2] };
        assert!(encode_attrs(&[bad_tv]).is_err());
        let bad_fixed = Attribute { id: 0x14, encoding: AttrEncoding::Fixed(2), value: vec![1] };
        assert!(encode_attrs(&[bad_fixed]).is_err());
        let long_tlv = Attribute::tlv(NmAttr::FileId, &[0u8; 256]);
        assert!(encode_attrs(&[long_tlv]).is_err());
    }

    #[test]
    fn test_attr_list_lookup() {
        let list = decode_attrs(&[0x24, 0x02, 0x04, 0x01, 0x24, 0x01]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get_attr(NmAttr::OperState).and_then(|a| a.value_u8()), Some(0x02));
        assert!(list.contains(NmAttr::AdmState));
        assert!(!list.contains(NmAttr::AvailStatus));
    }
}
