oml_enum! {
    /// ip.access manufacturer-specific message types, only valid inside a MANUF frame
    pub enum IpaccMsgType {
        Restart = 0x87 => "IPA RESTART",
        RslConnect = 0xe0 => "IPA RSL CONNECT",
        RslConnectAck = 0xe1 => "IPA RSL CONNECT ACK",
        RslConnectNack = 0xe2 => "IPA RSL CONNECT NACK",
        SetNvattr = 0xef => "IPA SET NVATTR",
        SetNvattrAck = 0xf0 => "IPA SET NVATTR ACK",
        SetNvattrNack = 0xf1 => "IPA SET NVATTR NACK",
        GetNvattr = 0xf2 => "IPA GET NVATTR",
        GetNvattrAck = 0xf3 => "IPA GET NVATTR ACK",
        GetNvattrNack = 0xf4 => "IPA GET NVATTR NACK",
    }
}

impl IpaccMsgType {
    pub fn is_nack(self) -> bool {
        matches!(self, IpaccMsgType::RslConnectNack | IpaccMsgType::SetNvattrNack | IpaccMsgType::GetNvattrNack)
    }
}
