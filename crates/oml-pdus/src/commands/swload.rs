use oml_core::ObjectAddress;

use crate::attributes::Attribute;
use crate::enums::nm_attr::NmAttr;
use crate::enums::nm_msg_type::NmMsgType;
use crate::frame::{FomMessage, FrameErr, OmlFrame, OmlHeader, build_fom};

/// BS-11 segment data rides on tag 0x11, which the dictionary knows as Event Type
const BS11_FILE_DATA: u8 = 0x11;

/// Largest line (including its CR/LF) that fits one BS-11 segment frame:
/// 255 body bytes minus FOM sub-header, tag, length, and the two leading value bytes.
pub const BS11_MAX_SEGMENT_LINE: usize = 255 - FomMessage::HEADER_LEN - 2 - 2;

/// 8.3.1 Load Data Initiate
pub fn load_init(address: ObjectAddress, file_id: &[u8], file_version: &[u8], window_size: u8) -> Result<Vec<u8>, FrameErr> {
    let attrs = [
        Attribute::tlv(NmAttr::FileId, file_id),
        Attribute::tlv(NmAttr::FileVersion, file_version),
        Attribute::tv(NmAttr::WindowSize, window_size),
    ];
    build_fom(NmMsgType::LoadInit, address, &attrs)
}

/// 8.3.2 Load Data Segment, BS-11 flavour. One text line per segment.
///
/// Value is `[0x00, seq, line..]`; `seq` is 0 for the final segment. The BS-11 expects the
/// line's CR/LF in excess of the declared length, so the length byte is two short of the value.
/// The OML header length is short by the same two bytes.
pub fn load_segment_bs11(address: ObjectAddress, seq: u8, line: &[u8]) -> Result<Vec<u8>, FrameErr> {
    if line.len() > BS11_MAX_SEGMENT_LINE {
        return Err(FrameErr::BodyTooLong(FomMessage::HEADER_LEN + 4 + line.len()));
    }
    let value_len = 2 + line.len();
    let mut attr_data = Vec::with_capacity(2 + value_len);
    attr_data.push(BS11_FILE_DATA);
    attr_data.push((value_len - 2) as u8);
    attr_data.push(0x00);
    attr_data.push(seq);
    attr_data.extend_from_slice(line);

    let mut frame = OmlFrame::fom(FomMessage::new(NmMsgType::LoadSeg, address, attr_data)).to_bytes()?;
    frame[OmlHeader::LEN - 1] -= 2;
    Ok(frame)
}

/// 8.3.4 Load Data End
pub fn load_end(address: ObjectAddress, file_id: &[u8], file_version: &[u8]) -> Result<Vec<u8>, FrameErr> {
    let attrs = [
        Attribute::tlv(NmAttr::FileId, file_id),
        Attribute::tlv(NmAttr::FileVersion, file_version),
    ];
    build_fom(NmMsgType::LoadEnd, address, &attrs)
}

/// 8.3.6 Activate Software
pub fn activate_sw(address: ObjectAddress, file_id: &[u8], file_version: &[u8]) -> Result<Vec<u8>, FrameErr> {
    let attrs = [
        Attribute::tlv(NmAttr::FileId, file_id),
        Attribute::tlv(NmAttr::FileVersion, file_version),
    ];
    build_fom(NmMsgType::ActivateSw, address, &attrs)
}

/// Activate Software carrying an opaque SW description block, used in response to SW Activate Request
pub fn activate_sw_descr(address: ObjectAddress, sw_descr: &[u8]) -> Result<Vec<u8>, FrameErr> {
    OmlFrame::fom(FomMessage::new(NmMsgType::ActivateSw, address, sw_descr.to_vec())).to_bytes()
}

/// SW Activate Request ACK, echoing the request's attribute block
pub fn sw_act_req_ack(address: ObjectAddress, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    OmlFrame::fom(FomMessage::new(NmMsgType::SwActReqAck, address, attr_data.to_vec())).to_bytes()
}

/// SW Activate Request NACK: the echoed attributes followed by NACK_CAUSES
pub fn sw_act_req_nack(address: ObjectAddress, attr_data: &[u8], cause: u8) -> Result<Vec<u8>, FrameErr> {
    let mut data = attr_data.to_vec();
    data.push(NmAttr::NackCauses.into_raw());
    data.push(cause);
    OmlFrame::fom(FomMessage::new(NmMsgType::SwActReqNack, address, data)).to_bytes()
}

#[cfg(test)]
mod tests {
    use crate::enums::nack_cause::NackCause;
    use super::*;

    #[test]
    fn test_load_init() {
        let bytes = load_init(ObjectAddress::site_manager(), b"BTSBMC76", b"v1", 4).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x80, 0x80, 0x00, 0x15, 0x01, 0x00, 0xff, 0xff, 0xff,
                0x12, 0x08, b'B', b'T', b'S', b'B', b'M', b'C', b'7', b'6',
                0x13, 0x02, b'v', b'1',
                0x39, 0x04,
            ]
        );
    }

    #[test]
    fn test_bs11_segment_length_quirk() {
        let line = b"0123456789\r\n";
        let bytes = load_segment_bs11(ObjectAddress::site_manager(), 3, line).unwrap();
        assert_eq!(bytes.len(), 4 + 5 + 4 + 12);
        // OML length leaves out the trailing CR/LF: FOM header, tag, length, 0x00, seq, line
        assert_eq!(bytes[3] as usize, 5 + 2 + line.len());
        assert_eq!(bytes[3], 19);
        assert_eq!(bytes[4], NmMsgType::LoadSeg.into_raw());
        assert_eq!(&bytes[9..13], &[0x11, 12, 0x00, 3]);
        assert_eq!(&bytes[13..], line);
    }

    #[test]
    fn test_bs11_segment_parses_without_crlf() {
        let line = b"0123456789\r\n";
        let bytes = load_segment_bs11(ObjectAddress::site_manager(), 0, line).unwrap();
        let frame = OmlFrame::parse(&bytes).unwrap();
        let fom = frame.fom_message().unwrap();
        assert_eq!(fom.known_type(), Some(NmMsgType::LoadSeg));
        assert_eq!(&fom.attr_data[..4], &[0x11, 12, 0x00, 0]);
        assert_eq!(&fom.attr_data[4..], b"0123456789");
    }

    #[test]
    fn test_bs11_segment_max_line() {
        let line = vec![b'x'; BS11_MAX_SEGMENT_LINE];
        let bytes = load_segment_bs11(ObjectAddress::site_manager(), 0, &line).unwrap();
        assert_eq!(bytes.len(), 4 + 255);
        let too_long = vec![b'x'; BS11_MAX_SEGMENT_LINE + 1];
        assert!(load_segment_bs11(ObjectAddress::site_manager(), 0, &too_long).is_err());
    }

    #[test]
    fn test_sw_act_req_nack_appends_cause() {
        let addr = ObjectAddress::new(oml_core::ObjClass::GprsCell, 0, 0xff, 0xff);
        let bytes = sw_act_req_nack(addr, &[0x24, 0x01], NackCause::ObjclassNotsupp.into_raw()).unwrap();
        let frame = OmlFrame::parse(&bytes).unwrap();
        let fom = frame.fom_message().unwrap();
        assert_eq!(fom.known_type(), Some(NmMsgType::SwActReqNack));
        assert_eq!(fom.attr_data, vec![0x24, 0x01, 0x22, 0x06]);
    }
}
