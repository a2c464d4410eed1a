oml_enum! {
    /// Clause 9.4.36 NACK Causes
    /// Bits: 8
    pub enum NackCause {
        // General Nack Causes
        IncorrStruct = 0x01 => "Incorrect message structure",
        MsgtypeInval = 0x02 => "Invalid message type value",
        ObjclassInval = 0x05 => "Invalid Object class value",
        ObjclassNotsupp = 0x06 => "Object class not supported",
        BtsnrUnkn = 0x07 => "BTS no. unknown",
        TrxnrUnkn = 0x08 => "Baseband Transceiver no. unknown",
        ObjinstUnkn = 0x09 => "Object Instance unknown",
        AttridInval = 0x0c => "Invalid attribute identifier value",
        AttridNotsupp = 0x0d => "Attribute identifier not supported",
        ParamRange = 0x0e => "Parameter value outside permitted range",
        AttrlistInconsistent = 0x0f => "Inconsistency in attribute list",
        SpecImplNotsupp = 0x10 => "Specified implementation not supported",
        CantPerform = 0x11 => "Message cannot be performed",
        // Specific Nack Causes
        ResNotimpl = 0x19 => "Resource not implemented",
        ResNotavail = 0x1a => "Resource not available",
        FreqNotavail = 0x1b => "Frequency not available",
        TestNotsupp = 0x1c => "Test not supported",
        CapacityRestr = 0x1d => "Capacity restrictions",
        PhyscfgNotperform = 0x1e => "Physical configuration cannot be performed",
        TestNotinit = 0x1f => "Test not initiated",
        PhyscfgNotrestore = 0x20 => "Physical configuration cannot be restored",
        TestNosuch = 0x21 => "No such test",
        TestNostop = 0x22 => "Test cannot be stopped",
        MsginconsistPhyscfg = 0x23 => "Message inconsistent with physical configuration",
        FileIncomplete = 0x25 => "Complete file not received",
        FileNotavail = 0x26 => "File not available at destination",
        FileNotactivate = 0x27 => "File cannot be activated",
        ReqNotGrant = 0x28 => "Request not granted",
        Wait = 0x29 => "Wait",
        NothReportExist = 0x2a => "Nothing reportable existing",
        MeasNotsupp = 0x2b => "Measurement not supported",
        MeasNotstart = 0x2c => "Measurement not started",
    }
}

/// Printable cause, falling back to the raw value for codes outside the table
pub fn nack_cause_name(raw: u8) -> String {
    match NackCause::try_from(raw) {
        Ok(c) => c.name().to_string(),
        Err(_) => format!("0x{:02x}", raw),
    }
}
