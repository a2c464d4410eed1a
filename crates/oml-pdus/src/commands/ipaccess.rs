use std::net::Ipv4Addr;

use oml_core::ObjectAddress;

use crate::attributes::{Attribute, encode_attrs};
use crate::enums::ipaccess_msg_type::IpaccMsgType;
use crate::enums::nm_attr::NmAttr;
use crate::frame::{FrameErr, build_fom_raw, build_manuf};

/// Any ip.access manufacturer message
pub fn ipaccess_msg(msg_type: IpaccMsgType, address: ObjectAddress, attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    build_manuf(msg_type.into_raw(), address, attr_data)
}

/// Write attributes to the nanoBTS non-volatile storage, addressed to baseband transceiver (0,0)
pub fn ipaccess_set_nvattr(attr_data: &[u8]) -> Result<Vec<u8>, FrameErr> {
    ipaccess_msg(IpaccMsgType::SetNvattr, ObjectAddress::baseband_transceiver(0, 0), attr_data)
}

/// Reboot the nanoBTS. Sent as a plain FOM to the site manager, not as a MANUF frame.
pub fn ipaccess_restart() -> Result<Vec<u8>, FrameErr> {
    build_fom_raw(IpaccMsgType::Restart.into_raw(), ObjectAddress::site_manager(), &[])
}

/// Ask a TRX to connect its RSL link. Without `ip` the BTS connects back to the OML peer address.
pub fn ipaccess_rsl_connect(bts_nr: u8, trx_nr: u8, ip: Option<Ipv4Addr>, port: u16, stream_id: u8) -> Result<Vec<u8>, FrameErr> {
    let mut attrs = vec![
        Attribute::new(NmAttr::IpaccStreamId.into_raw(), &[stream_id])?,
        Attribute::new(NmAttr::IpaccDstIpPort.into_raw(), &port.to_be_bytes())?,
    ];
    if let Some(ip) = ip {
        attrs.push(Attribute::new(NmAttr::IpaccDstIp.into_raw(), &ip.octets())?);
    }
    let attr_data = encode_attrs(&attrs)?;
    ipaccess_msg(IpaccMsgType::RslConnect, ObjectAddress::baseband_transceiver(bts_nr, trx_nr), &attr_data)
}
