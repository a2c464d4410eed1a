oml_enum! {
    /// Clause 8.1.1 Message discriminator
    /// Bits: 8
    pub enum Discriminator {
        /// Formatted O&M message
        Fom = 0x80 => "FOM",
        Mmi = 0x40 => "MMI",
        Trau = 0x20 => "TRAU",
        /// Manufacturer defined message, carries a vendor magic before the FOM header
        Manuf = 0x10 => "MANUF",
    }
}

oml_enum! {
    /// Clause 8.1.2 Placement indicator
    /// Only `Only` is supported; segmented messages are rejected.
    pub enum Placement {
        Only = 0x80 => "ONLY",
        First = 0x40 => "FIRST",
        Middle = 0x20 => "MIDDLE",
        Last = 0x10 => "LAST",
    }
}
