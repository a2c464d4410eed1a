use core::fmt;

/// Instance field value meaning "not applicable"
pub const INST_NA: u8 = 0xff;

/// Object class (GSM 12.21 clause 9.2), including the Siemens BS-11 and GPRS extensions.
/// Unknown classes are carried as `Other` so an inbound frame can still be addressed and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjClass {
    SiteManager,
    Bts,
    RadioCarrier,
    Channel,
    BasebandTransceiver,

    Bs11Adjc,
    Bs11Handover,
    Bs11PwrCtrl,
    Bs11Btse,
    Bs11Rack,
    /// BS-11 vendor object; the bts_nr instance field selects the sub-object type
    Bs11,
    Bs11Test,
    Bs11Envabtse,
    Bs11Bport,

    GprsNse,
    GprsCell,
    GprsNsvc,

    Null,
    Other(u8),
}

impl ObjClass {
    pub fn from_raw(x: u8) -> Self {
        match x {
            0x00 => ObjClass::SiteManager,
            0x01 => ObjClass::Bts,
            0x02 => ObjClass::RadioCarrier,
            0x03 => ObjClass::Channel,
            0x04 => ObjClass::BasebandTransceiver,
            0xa0 => ObjClass::Bs11Adjc,
            0xa1 => ObjClass::Bs11Handover,
            0xa2 => ObjClass::Bs11PwrCtrl,
            0xa3 => ObjClass::Bs11Btse,
            0xa4 => ObjClass::Bs11Rack,
            0xa5 => ObjClass::Bs11,
            0xa6 => ObjClass::Bs11Test,
            0xa8 => ObjClass::Bs11Envabtse,
            0xa9 => ObjClass::Bs11Bport,
            0xf0 => ObjClass::GprsNse,
            0xf1 => ObjClass::GprsCell,
            0xf2 => ObjClass::GprsNsvc,
            0xff => ObjClass::Null,
            other => ObjClass::Other(other),
        }
    }

    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u8 {
        match self {
            ObjClass::SiteManager => 0x00,
            ObjClass::Bts => 0x01,
            ObjClass::RadioCarrier => 0x02,
            ObjClass::Channel => 0x03,
            ObjClass::BasebandTransceiver => 0x04,
            ObjClass::Bs11Adjc => 0xa0,
            ObjClass::Bs11Handover => 0xa1,
            ObjClass::Bs11PwrCtrl => 0xa2,
            ObjClass::Bs11Btse => 0xa3,
            ObjClass::Bs11Rack => 0xa4,
            ObjClass::Bs11 => 0xa5,
            ObjClass::Bs11Test => 0xa6,
            ObjClass::Bs11Envabtse => 0xa8,
            ObjClass::Bs11Bport => 0xa9,
            ObjClass::GprsNse => 0xf0,
            ObjClass::GprsCell => 0xf1,
            ObjClass::GprsNsvc => 0xf2,
            ObjClass::Null => 0xff,
            ObjClass::Other(x) => x,
        }
    }

    /// GPRS object classes occupy 0xf0..=0xf3
    pub fn is_gprs(self) -> bool {
        (0xf0..=0xf3).contains(&self.into_raw())
    }
}

impl From<ObjClass> for u8 {
    fn from(e: ObjClass) -> Self { e.into_raw() }
}

impl fmt::Display for ObjClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjClass::SiteManager => write!(f, "SiteManager"),
            ObjClass::Bts => write!(f, "Bts"),
            ObjClass::RadioCarrier => write!(f, "RadioCarrier"),
            ObjClass::Channel => write!(f, "Channel"),
            ObjClass::BasebandTransceiver => write!(f, "BasebandTransceiver"),
            ObjClass::Bs11Adjc => write!(f, "Bs11Adjc"),
            ObjClass::Bs11Handover => write!(f, "Bs11Handover"),
            ObjClass::Bs11PwrCtrl => write!(f, "Bs11PwrCtrl"),
            ObjClass::Bs11Btse => write!(f, "Bs11Btse"),
            ObjClass::Bs11Rack => write!(f, "Bs11Rack"),
            ObjClass::Bs11 => write!(f, "Bs11"),
            ObjClass::Bs11Test => write!(f, "Bs11Test"),
            ObjClass::Bs11Envabtse => write!(f, "Bs11Envabtse"),
            ObjClass::Bs11Bport => write!(f, "Bs11Bport"),
            ObjClass::GprsNse => write!(f, "GprsNse"),
            ObjClass::GprsCell => write!(f, "GprsCell"),
            ObjClass::GprsNsvc => write!(f, "GprsNsvc"),
            ObjClass::Null => write!(f, "Null"),
            ObjClass::Other(x) => write!(f, "ObjClass(0x{:02x})", x),
        }
    }
}

/// Object instance (bts_nr, trx_nr, ts_nr). 0xff in a field means "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjInstance {
    pub bts_nr: u8,
    pub trx_nr: u8,
    pub ts_nr: u8,
}

impl ObjInstance {
    pub const fn new(bts_nr: u8, trx_nr: u8, ts_nr: u8) -> Self {
        Self { bts_nr, trx_nr, ts_nr }
    }

    pub const fn not_applicable() -> Self {
        Self::new(INST_NA, INST_NA, INST_NA)
    }
}

/// Addresses a managed object: object class plus 3-byte instance.
/// Instance fields are only meaningful relative to the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectAddress {
    pub obj_class: ObjClass,
    pub inst: ObjInstance,
}

impl ObjectAddress {
    pub const fn new(obj_class: ObjClass, bts_nr: u8, trx_nr: u8, ts_nr: u8) -> Self {
        Self { obj_class, inst: ObjInstance::new(bts_nr, trx_nr, ts_nr) }
    }

    /// The site manager, target of software loads
    pub const fn site_manager() -> Self {
        Self { obj_class: ObjClass::SiteManager, inst: ObjInstance::not_applicable() }
    }

    pub const fn bts(bts_nr: u8) -> Self {
        Self::new(ObjClass::Bts, bts_nr, INST_NA, INST_NA)
    }

    pub const fn radio_carrier(bts_nr: u8, trx_nr: u8) -> Self {
        Self::new(ObjClass::RadioCarrier, bts_nr, trx_nr, INST_NA)
    }

    pub const fn baseband_transceiver(bts_nr: u8, trx_nr: u8) -> Self {
        Self::new(ObjClass::BasebandTransceiver, bts_nr, trx_nr, INST_NA)
    }

    pub const fn channel(bts_nr: u8, trx_nr: u8, ts_nr: u8) -> Self {
        Self::new(ObjClass::Channel, bts_nr, trx_nr, ts_nr)
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:02x},{:02x},{:02x})", self.obj_class, self.inst.bts_nr, self.inst.trx_nr, self.inst.ts_nr)
    }
}
