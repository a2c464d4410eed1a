oml_enum! {
    /// BS-11 sub-object types. For object class BS11 (0xa5) the bts_nr instance
    /// field carries one of these, the ts_nr field the TRX index where applicable.
    pub enum Bs11ObjType {
        Alco = 0x01 => "ALCO",
        Bbsig = 0x02 => "BBSIG",
        Trx1 = 0x03 => "TRX1",
        Cclk = 0x04 => "CCLK",
        Gpsu = 0x06 => "GPSU",
        Li = 0x07 => "LI",
        Pa = 0x09 => "PA",
    }
}

/// LMT session attribute value for a logon, anything else is a logoff
pub const BS11_LMT_LOGON: u8 = 0x01;
