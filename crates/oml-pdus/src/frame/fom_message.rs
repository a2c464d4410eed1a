use core::fmt;

use oml_core::{ByteBuffer, ObjClass, ObjectAddress, PduParseErr};
use oml_core::bytebuffer::hex;

use crate::attributes::{AttrList, Attribute, decode_attrs, encode_attrs};
use crate::enums::nm_msg_type::{NmMsgType, msg_type_name};
use crate::frame::frame_err::FrameErr;

/// Formatted O&M message: message type, object address and the raw attribute block.
///
/// Attributes are kept undecoded. A frame with a broken attribute block still parses and
/// classifies; only the handler that calls `attributes()` sees the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FomMessage {
    pub msg_type: u8,
    pub address: ObjectAddress,
    pub attr_data: Vec<u8>,
}

impl FomMessage {
    /// msg_type, obj_class, bts_nr, trx_nr, ts_nr
    pub const HEADER_LEN: usize = 5;

    pub fn new(msg_type: NmMsgType, address: ObjectAddress, attr_data: Vec<u8>) -> Self {
        Self { msg_type: msg_type.into_raw(), address, attr_data }
    }

    pub fn with_attrs(msg_type: NmMsgType, address: ObjectAddress, attrs: &[Attribute]) -> Result<Self, FrameErr> {
        Ok(Self::new(msg_type, address, encode_attrs(attrs)?))
    }

    /// Message type, if it is one we have a name for
    pub fn known_type(&self) -> Option<NmMsgType> {
        NmMsgType::try_from(self.msg_type).ok()
    }

    pub fn attributes(&self) -> Result<AttrList, PduParseErr> {
        decode_attrs(&self.attr_data)
    }

    /// Bytes this message occupies after the 4-byte OML header
    pub fn body_len(&self) -> usize {
        Self::HEADER_LEN + self.attr_data.len()
    }

    /// Parses the sub-header and takes everything left in the buffer window as attribute data.
    pub fn from_bytebuf(buffer: &mut ByteBuffer) -> Result<Self, FrameErr> {
        let remaining = buffer.get_len_remaining();
        if remaining < Self::HEADER_LEN {
            return Err(FrameErr::TooShort { len: remaining });
        }
        let msg_type = buffer.read_u8("msg_type")?;
        let obj_class = ObjClass::from_raw(buffer.read_u8("obj_class")?);
        let bts_nr = buffer.read_u8("bts_nr")?;
        let trx_nr = buffer.read_u8("trx_nr")?;
        let ts_nr = buffer.read_u8("ts_nr")?;
        let attr_data = buffer.read_remaining().to_vec();

        Ok(FomMessage {
            msg_type,
            address: ObjectAddress::new(obj_class, bts_nr, trx_nr, ts_nr),
            attr_data,
        })
    }

    pub fn to_bytebuf(&self, buffer: &mut ByteBuffer) {
        buffer.write_u8(self.msg_type);
        buffer.write_u8(self.address.obj_class.into_raw());
        buffer.write_u8(self.address.inst.bts_nr);
        buffer.write_u8(self.address.inst.trx_nr);
        buffer.write_u8(self.address.inst.ts_nr);
        buffer.write_slice(&self.attr_data);
    }
}

impl fmt::Display for FomMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", msg_type_name(self.msg_type), self.address)?;
        if !self.attr_data.is_empty() {
            write!(f, " [{}]", hex(&self.attr_data))?;
        }
        Ok(())
    }
}
