oml_enum! {
    /// Clause 9.4.16 Event Type
    pub enum EventType {
        CommFail = 0x00 => "communication failure",
        QosFail = 0x01 => "quality of service failure",
        ProcFail = 0x02 => "processing failure",
        EquipFail = 0x03 => "equipment failure",
        EnvFail = 0x04 => "environment failure",
    }
}

oml_enum! {
    /// Clause 9.4.63 Perceived Severity
    pub enum Severity {
        Ceased = 0x00 => "failure ceased",
        Critical = 0x01 => "critical failure",
        Major = 0x02 => "major failure",
        Minor = 0x03 => "minor failure",
        Warning = 0x04 => "warning level failure",
        Indeterminate = 0x05 => "indeterminate failure",
    }
}
