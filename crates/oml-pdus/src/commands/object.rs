//! Object-scoped commands: equipment, state, air interface and A-bis interface management

use oml_core::ObjectAddress;

use crate::attributes::{AttrEncoding, Attribute};
use crate::enums::discriminator::{Discriminator, Placement};
use crate::enums::nm_attr::NmAttr;
use crate::enums::nm_msg_type::NmMsgType;
use crate::frame::{FrameErr, OmlBody, OmlFrame, build_fom, build_fom_raw};

/// E1 position of a terrestrial channel, sent as the ABIS_CHANNEL attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbisChannel {
    pub port: u8,
    pub timeslot: u8,
    pub subslot: u8,
}

impl AbisChannel {
    fn to_attr(self) -> Attribute {
        Attribute {
            id: NmAttr::AbisChannel.into_raw(),
            encoding: AttrEncoding::Fixed(3),
            value: vec![self.port, self.timeslot, self.subslot],
        }
    }
}

/// 8.9.2 Opstart
pub fn opstart(address: ObjectAddress) -> Result<Vec<u8>, FrameErr> {
    build_fom(NmMsgType::Opstart, address, &[])
}

/// 8.8.5 Change Administrative State
pub fn chg_adm_state(address: ObjectAddress, adm_state: u8) -> Result<Vec<u8>, FrameErr> {
    build_fom(NmMsgType::ChgAdmState, address, &[Attribute::tv(NmAttr::AdmState, adm_state)])
}

/// 8.6.1 Set BTS Attributes. `attr_data` is an encoded block produced by the configuration layer.
pub fn set_bts_attr(bts_nr: u8, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(NmMsgType::SetBtsAttr.into_raw(), ObjectAddress::bts(bts_nr), attr_data)
}

/// 8.6.2 Set Radio Carrier Attributes
pub fn set_radio_attr(bts_nr: u8, trx_nr: u8, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(NmMsgType::SetRadioAttr.into_raw(), ObjectAddress::radio_carrier(bts_nr, trx_nr), attr_data)
}

/// 8.6.3 Set Channel Attributes
pub fn set_channel_attr(bts_nr: u8, trx_nr: u8, ts_nr: u8, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(NmMsgType::SetChanAttr.into_raw(), ObjectAddress::channel(bts_nr, trx_nr, ts_nr), attr_data)
}

/// 8.5.1 Establish TEI for a radio carrier's signalling link
pub fn establish_tei(bts_nr: u8, trx_nr: u8, chan: AbisChannel, tei: u8) -> Result<Vec<u8>, FrameErr> {
    let attrs = [Attribute::tv(NmAttr::Tei, tei), chan.to_attr()];
    build_fom(NmMsgType::EstablishTei, ObjectAddress::radio_carrier(bts_nr, trx_nr), &attrs)
}

/// 8.5.3 Connect Terrestrial Signalling
pub fn conn_terr_sign(bts_nr: u8, trx_nr: u8, chan: AbisChannel) -> Result<Vec<u8>, FrameErr> {
    build_fom(NmMsgType::ConnTerrSign, ObjectAddress::radio_carrier(bts_nr, trx_nr), &[chan.to_attr()])
}

/// 8.5.5 Connect Terrestrial Traffic
pub fn conn_terr_traf(bts_nr: u8, trx_nr: u8, ts_nr: u8, chan: AbisChannel) -> Result<Vec<u8>, FrameErr> {
    build_fom(NmMsgType::ConnTerrTraf, ObjectAddress::channel(bts_nr, trx_nr, ts_nr), &[chan.to_attr()])
}

/// Stop (`on == false`) or restart sending event reports, addressed to the site manager
pub fn event_report(on: bool) -> Result<Vec<u8>, FrameErr> {
    let msg_type = if on { NmMsgType::RestEventRep } else { NmMsgType::StopEventRep };
    build_fom(msg_type, ObjectAddress::site_manager(), &[])
}

/// 8.11.1 Get Attributes; `attr_ids` is the list of requested attribute identifiers
pub fn get_attr(address: ObjectAddress, attr_ids: &[u8]) -> Result<Vec<u8>, FrameErr> {
    build_fom(NmMsgType::GetAttr, address, &[Attribute::tl16v(NmAttr::ListReqAttr, attr_ids)])
}

/// Argument-less command to the site manager, used for vendor one-shots
pub fn simple_cmd(msg_type: u8) -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(msg_type, ObjectAddress::site_manager(), &[])
}

/// FOM-discriminated frame around caller-supplied bytes. The bytes must already contain
/// a FOM sub-header; only the OML header is added.
pub fn raw_fom(raw: &[u8]) -> Result<Vec<u8>, FrameErr> {
    let frame = OmlFrame {
        discriminator: Discriminator::Fom,
        placement: Placement::Only,
        sequence: 0,
        body: OmlBody::Raw(raw.to_vec()),
    };
    frame.to_bytes()
}
