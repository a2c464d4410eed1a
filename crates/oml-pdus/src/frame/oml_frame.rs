use core::fmt;

use oml_core::{ByteBuffer, ObjectAddress};
use oml_core::bytebuffer::hex;

use crate::attributes::{Attribute, encode_attrs};
use crate::enums::discriminator::{Discriminator, Placement};
use crate::enums::nm_msg_type::NmMsgType;
use crate::frame::fom_message::FomMessage;
use crate::frame::frame_err::FrameErr;

/// ip.access vendor magic. Sent with its trailing NUL, accepted with or without.
pub const IPACC_MAGIC: &[u8] = b"com.ipaccess";
const IPACC_MAGIC_NUL: &[u8] = b"com.ipaccess\0";

/// Clause 8.1 OML message header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OmlHeader {
    pub discriminator: Discriminator,
    pub placement: Placement,
    pub sequence: u8,
    /// Length of what follows. For MANUF frames this covers the FOM part only, not the magic.
    pub length: u8,
}

impl OmlHeader {
    pub const LEN: usize = 4;

    pub fn from_bytebuf(buffer: &mut ByteBuffer) -> Result<Self, FrameErr> {
        if buffer.get_len_remaining() < Self::LEN {
            return Err(FrameErr::TooShort { len: buffer.get_len_remaining() });
        }
        let mdisc = buffer.read_u8("mdisc")?;
        let placement = buffer.read_u8("placement")?;
        let sequence = buffer.read_u8("sequence")?;
        let length = buffer.read_u8("length")?;

        if placement != Placement::Only.into_raw() {
            return Err(FrameErr::UnsupportedPlacement(placement));
        }
        if sequence != 0 {
            return Err(FrameErr::UnexpectedSequence(sequence));
        }
        let discriminator = Discriminator::try_from(mdisc).map_err(|_| FrameErr::UnknownDiscriminator(mdisc))?;

        Ok(OmlHeader { discriminator, placement: Placement::Only, sequence, length })
    }

    pub fn to_bytebuf(&self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.discriminator.into_raw());
        buffer.write_u8(self.placement.into_raw());
        buffer.write_u8(self.sequence);
        buffer.write_u8(self.length);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmlBody {
    Fom(FomMessage),
    /// Manufacturer frame. `magic` is stored as received, including any NUL.
    Manuf { magic: Vec<u8>, fom: FomMessage },
    /// MMI and TRAU payloads, not interpreted
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmlFrame {
    pub discriminator: Discriminator,
    pub placement: Placement,
    pub sequence: u8,
    pub body: OmlBody,
}

impl OmlFrame {
    pub fn fom(fom: FomMessage) -> Self {
        OmlFrame {
            discriminator: Discriminator::Fom,
            placement: Placement::Only,
            sequence: 0,
            body: OmlBody::Fom(fom),
        }
    }

    /// ip.access manufacturer frame around `fom`
    pub fn ipaccess(fom: FomMessage) -> Self {
        OmlFrame {
            discriminator: Discriminator::Manuf,
            placement: Placement::Only,
            sequence: 0,
            body: OmlBody::Manuf { magic: IPACC_MAGIC_NUL.to_vec(), fom },
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, FrameErr> {
        let mut buffer = ByteBuffer::from_bytes(data);
        let header = OmlHeader::from_bytebuf(&mut buffer)?;
        let declared = header.length as usize;

        let body = match header.discriminator {
            Discriminator::Fom => {
                limit_window(&mut buffer, declared)?;
                OmlBody::Fom(FomMessage::from_bytebuf(&mut buffer)?)
            }
            Discriminator::Manuf => {
                let magic_len = buffer.read_u8("magic length")
                    .map_err(|_| FrameErr::TooShort { len: data.len() })? as usize;
                let magic = buffer.read_slice(magic_len, "magic")
                    .map_err(|_| FrameErr::LengthMismatch { declared: magic_len, available: data.len() - OmlHeader::LEN - 1 })?
                    .to_vec();
                if magic != IPACC_MAGIC && magic != IPACC_MAGIC_NUL {
                    return Err(FrameErr::UnknownVendorFrame(magic));
                }
                limit_window(&mut buffer, declared)?;
                OmlBody::Manuf { magic, fom: FomMessage::from_bytebuf(&mut buffer)? }
            }
            Discriminator::Mmi | Discriminator::Trau => {
                limit_window(&mut buffer, declared)?;
                OmlBody::Raw(buffer.read_remaining().to_vec())
            }
        };

        Ok(OmlFrame {
            discriminator: header.discriminator,
            placement: header.placement,
            sequence: header.sequence,
            body,
        })
    }

    /// Serializes header and body. The length field is computed from the body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FrameErr> {
        let (body_len, prefix_len) = match &self.body {
            OmlBody::Fom(fom) => (fom.body_len(), 0),
            OmlBody::Manuf { magic, fom } => (fom.body_len(), 1 + magic.len()),
            OmlBody::Raw(raw) => (raw.len(), 0),
        };
        if body_len > u8::MAX as usize {
            return Err(FrameErr::BodyTooLong(body_len));
        }

        let mut buffer = ByteBuffer::new_autoexpand(OmlHeader::LEN + prefix_len + body_len);
        let header = OmlHeader {
            discriminator: self.discriminator,
            placement: self.placement,
            sequence: self.sequence,
            length: body_len as u8,
        };
        header.to_bytebuf(&mut buffer);
        match &self.body {
            OmlBody::Fom(fom) => fom.to_bytebuf(&mut buffer),
            OmlBody::Manuf { magic, fom } => {
                buffer.write_u8(magic.len() as u8);
                buffer.write_slice(magic);
                fom.to_bytebuf(&mut buffer);
            }
            OmlBody::Raw(raw) => buffer.write_slice(raw),
        }
        Ok(buffer.into_bytes())
    }

    /// The FOM carried by this frame, for both FOM and MANUF frames
    pub fn fom_message(&self) -> Option<&FomMessage> {
        match &self.body {
            OmlBody::Fom(fom) | OmlBody::Manuf { fom, .. } => Some(fom),
            OmlBody::Raw(_) => None,
        }
    }
}

fn limit_window(buffer: &mut ByteBuffer, declared: usize) -> Result<(), FrameErr> {
    let available = buffer.get_len_remaining();
    buffer.limit(declared).map_err(|_| FrameErr::LengthMismatch { declared, available })
}

impl fmt::Display for OmlFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.body {
            OmlBody::Fom(fom) => write!(f, "FOM {}", fom),
            OmlBody::Manuf { fom, .. } => write!(f, "MANUF(ipaccess) {}", fom),
            OmlBody::Raw(raw) => write!(f, "{} [{}]", self.discriminator, hex(raw)),
        }
    }
}

/// Builds a complete FOM frame from typed attributes
pub fn build_fom(msg_type: NmMsgType, address: ObjectAddress, attrs: &[Attribute]) -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(msg_type.into_raw(), address, &encode_attrs(attrs)?)
}

/// Builds a complete FOM frame around an already encoded attribute block
pub fn build_fom_raw(msg_type: u8, address: ObjectAddress, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    let fom = FomMessage { msg_type, address, attr_data: attr_data.to_vec() };
    OmlFrame::fom(fom).to_bytes()
}

/// Builds an ip.access MANUF frame. The header length covers the FOM part only.
pub fn build_manuf(msg_type: u8, address: ObjectAddress, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    let fom = FomMessage { msg_type, address, attr_data: attr_data.to_vec() };
    OmlFrame::ipaccess(fom).to_bytes()
}

#[cfg(test)]
mod tests {
    use oml_core::{ObjClass, debug};
    use crate::enums::nm_attr::NmAttr;
    use super::*;

    #[test]
    fn test_parse_state_change_report() {
        debug::setup_logging_verbose();
        // STATE CHANGED EVENT REPORT, BTS 0, OPER_STATE=Enabled, AVAIL_STATUS empty
        let data = [0x80, 0x80, 0x00, 0x0a, 0x61, 0x01, 0x00, 0xff, 0xff, 0x24, 0x02, 0x07, 0x00, 0x00];
        let frame = OmlFrame::parse(&data).unwrap();
        tracing::info!("Parsed: {}", frame);
        let fom = frame.fom_message().unwrap();
        assert_eq!(fom.known_type(), Some(NmMsgType::StateChgEventRep));
        assert_eq!(fom.address, ObjectAddress::bts(0));
        let attrs = fom.attributes().unwrap();
        assert_eq!(attrs.get_attr(NmAttr::OperState).unwrap().value, vec![0x02]);
        assert!(attrs.get_attr(NmAttr::AvailStatus).unwrap().value.is_empty());
    }

    #[test]
    fn test_build_then_parse() {
        let attrs = [Attribute::tv(NmAttr::AdmState, 0x02)];
        let addr = ObjectAddress::new(ObjClass::RadioCarrier, 0, 1, 0xff);
        let bytes = build_fom(NmMsgType::ChgAdmState, addr, &attrs).unwrap();
        assert_eq!(bytes, vec![0x80, 0x80, 0x00, 0x07, 0x69, 0x02, 0x00, 0x01, 0xff, 0x04, 0x02]);
        let frame = OmlFrame::parse(&bytes).unwrap();
        assert_eq!(frame.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_header_rejections() {
        assert_eq!(OmlFrame::parse(&[0x80, 0x80, 0x00]), Err(FrameErr::TooShort { len: 3 }));
        assert_eq!(
            OmlFrame::parse(&[0x80, 0x40, 0x00, 0x05, 0x74, 0x01, 0x00, 0xff, 0xff]),
            Err(FrameErr::UnsupportedPlacement(0x40))
        );
        assert_eq!(
            OmlFrame::parse(&[0x80, 0x80, 0x01, 0x05, 0x74, 0x01, 0x00, 0xff, 0xff]),
            Err(FrameErr::UnexpectedSequence(1))
        );
        assert_eq!(OmlFrame::parse(&[0x33, 0x80, 0x00, 0x00]), Err(FrameErr::UnknownDiscriminator(0x33)));
        assert_eq!(
            OmlFrame::parse(&[0x80, 0x80, 0x00, 0x09, 0x74, 0x01, 0x00, 0xff, 0xff]),
            Err(FrameErr::LengthMismatch { declared: 9, available: 5 })
        );
        assert_eq!(OmlFrame::parse(&[0x80, 0x80, 0x00, 0x02, 0x74, 0x01]), Err(FrameErr::TooShort { len: 2 }));
    }

    #[test]
    fn test_manuf_magic() {
        let addr = ObjectAddress::bts(0);
        let bytes = build_manuf(0xe1, addr, &[]).unwrap();
        // Header length covers the FOM part only, magic goes out with its NUL
        assert_eq!(&bytes[..5], &[0x10, 0x80, 0x00, 0x05, 13]);
        assert_eq!(&bytes[5..18], b"com.ipaccess\0");
        let frame = OmlFrame::parse(&bytes).unwrap();
        assert_eq!(frame.fom_message().unwrap().msg_type, 0xe1);

        // Magic without NUL is accepted too
        let mut no_nul = vec![0x10, 0x80, 0x00, 0x05, 12];
        no_nul.extend_from_slice(b"com.ipaccess");
        no_nul.extend_from_slice(&[0xe1, 0x01, 0x00, 0xff, 0xff]);
        assert!(OmlFrame::parse(&no_nul).is_ok());

        let mut other = vec![0x10, 0x80, 0x00, 0x05, 11];
        other.extend_from_slice(b"com.siemens");
        other.extend_from_slice(&[0xe1, 0x01, 0x00, 0xff, 0xff]);
        assert!(matches!(OmlFrame::parse(&other), Err(FrameErr::UnknownVendorFrame(_))));
    }

    #[test]
    fn test_body_too_long() {
        let addr = ObjectAddress::bts(0);
        let err = build_fom_raw(0x41, addr, &[0u8; 251]).unwrap_err();
        assert_eq!(err, FrameErr::BodyTooLong(256));
        assert!(build_fom_raw(0x41, addr, &[0u8; 250]).is_ok());
    }

    #[test]
    fn test_bad_attributes_still_parse() {
        // Unknown attribute 0x10 in the block: frame parses, attribute decode fails
        let data = [0x80, 0x80, 0x00, 0x07, 0x61, 0x01, 0x00, 0xff, 0xff, 0x10, 0x00];
        let frame = OmlFrame::parse(&data).unwrap();
        assert!(frame.fom_message().unwrap().attributes().is_err());
    }
}
