use std::collections::HashMap;
use std::fmt;

use oml_core::{ObjClass, ObjectAddress};
use oml_pdus::attributes::AttrList;
use oml_pdus::enums::bs11::Bs11ObjType;
use oml_pdus::enums::nm_attr::NmAttr;
use oml_pdus::enums::state_names::{NM_AVSTATE_OK, adm_state_name, avail_state_name, oper_state_name};

/// Timeslots per TRX
pub const TRX_NR_TS: u8 = 8;
/// BS-11 environmental alarm units
pub const BS11_NUM_ENVABTSE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryErr {
    NotFound { address: ObjectAddress },
}

impl fmt::Display for RegistryErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryErr::NotFound { address } => write!(f, "no managed object for {}", address),
        }
    }
}

impl std::error::Error for RegistryErr {}

/// A managed object of the configured topology. TRX-scoped objects carry the TRX index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedObject {
    SiteManager,
    Bts,
    RadioCarrier(u8),
    BasebandTransceiver(u8),
    Channel { trx: u8, ts: u8 },
    Bs11Cclk,
    Bs11Bbsig(u8),
    Bs11Pa(u8),
    Bs11Rack,
    Bs11Envabtse(u8),
}

/// Administrative, operational and availability state, as raw 12.21 values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NmState {
    pub administrative: u8,
    pub operational: u8,
    pub availability: u8,
}

impl fmt::Display for NmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OP_STATE={} AVAIL={}({:02x}) ADM={}",
            oper_state_name(self.operational),
            avail_state_name(self.availability),
            self.availability,
            adm_state_name(self.administrative)
        )
    }
}

/// Committed state transition of one object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub object: ManagedObject,
    pub address: ObjectAddress,
    pub old: NmState,
    pub new: NmState,
}

/// Holds the NM state of every managed object. Objects are created up front from the
/// configured TRX count and live as long as the registry.
pub struct ObjectRegistry {
    num_trx: u8,
    states: HashMap<ManagedObject, NmState>,
}

impl ObjectRegistry {
    pub fn new(num_trx: u8) -> Self {
        let mut states = HashMap::new();
        let mut add = |obj| {
            states.insert(obj, NmState::default());
        };
        add(ManagedObject::SiteManager);
        add(ManagedObject::Bts);
        add(ManagedObject::Bs11Cclk);
        add(ManagedObject::Bs11Rack);
        for idx in 0..BS11_NUM_ENVABTSE {
            add(ManagedObject::Bs11Envabtse(idx));
        }
        for trx in 0..num_trx {
            add(ManagedObject::RadioCarrier(trx));
            add(ManagedObject::BasebandTransceiver(trx));
            add(ManagedObject::Bs11Bbsig(trx));
            add(ManagedObject::Bs11Pa(trx));
            for ts in 0..TRX_NR_TS {
                add(ManagedObject::Channel { trx, ts });
            }
        }
        Self { num_trx, states }
    }

    /// Maps an object address onto a managed object. Instance fields are interpreted per class.
    pub fn resolve(&self, address: &ObjectAddress) -> Result<ManagedObject, RegistryErr> {
        let inst = &address.inst;
        let not_found = || RegistryErr::NotFound { address: *address };

        let obj = match address.obj_class {
            ObjClass::SiteManager => ManagedObject::SiteManager,
            ObjClass::Bts => ManagedObject::Bts,
            ObjClass::RadioCarrier if inst.trx_nr < self.num_trx => ManagedObject::RadioCarrier(inst.trx_nr),
            ObjClass::BasebandTransceiver if inst.trx_nr < self.num_trx => {
                ManagedObject::BasebandTransceiver(inst.trx_nr)
            }
            ObjClass::Channel if inst.trx_nr < self.num_trx && inst.ts_nr < TRX_NR_TS => {
                ManagedObject::Channel { trx: inst.trx_nr, ts: inst.ts_nr }
            }
            // For the BS-11 vendor class, bts_nr selects the sub-object and ts_nr the TRX
            ObjClass::Bs11 => match Bs11ObjType::try_from(inst.bts_nr) {
                Ok(Bs11ObjType::Cclk) => ManagedObject::Bs11Cclk,
                Ok(Bs11ObjType::Bbsig) if inst.ts_nr < self.num_trx => ManagedObject::Bs11Bbsig(inst.ts_nr),
                Ok(Bs11ObjType::Pa) if inst.ts_nr < self.num_trx => ManagedObject::Bs11Pa(inst.ts_nr),
                _ => return Err(not_found()),
            },
            ObjClass::Bs11Rack => ManagedObject::Bs11Rack,
            ObjClass::Bs11Envabtse if inst.trx_nr < BS11_NUM_ENVABTSE => ManagedObject::Bs11Envabtse(inst.trx_nr),
            _ => return Err(not_found()),
        };
        Ok(obj)
    }

    pub fn state(&self, obj: ManagedObject) -> Option<NmState> {
        self.states.get(&obj).copied()
    }

    pub fn state_of(&self, address: &ObjectAddress) -> Result<NmState, RegistryErr> {
        let obj = self.resolve(address)?;
        self.state(obj).ok_or(RegistryErr::NotFound { address: *address })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Overlays the state attributes of a State Changed Event Report.
    /// Commits and returns the change only if the resulting state differs.
    pub fn apply_state_report(&mut self, address: &ObjectAddress, attrs: &AttrList) -> Result<Option<StateChange>, RegistryErr> {
        let obj = self.resolve(address)?;
        let slot = self.states.get_mut(&obj).ok_or(RegistryErr::NotFound { address: *address })?;
        let old = *slot;
        let mut new = old;

        if let Some(v) = attrs.get_attr(NmAttr::OperState).and_then(|a| a.value_u8()) {
            new.operational = v;
        }
        if let Some(a) = attrs.get_attr(NmAttr::AvailStatus) {
            // Present but empty means OK
            new.availability = a.value_u8().unwrap_or(NM_AVSTATE_OK);
        }
        if let Some(v) = attrs.get_attr(NmAttr::AdmState).and_then(|a| a.value_u8()) {
            new.administrative = v;
        }

        if new == old {
            return Ok(None);
        }
        *slot = new;
        Ok(Some(StateChange { object: obj, address: *address, old, new }))
    }

    /// Records an acknowledged administrative state. Unlike state reports, this always
    /// produces a change, even if the value is unchanged.
    pub fn apply_adm_state_ack(&mut self, address: &ObjectAddress, adm_state: u8) -> Result<StateChange, RegistryErr> {
        let obj = self.resolve(address)?;
        let slot = self.states.get_mut(&obj).ok_or(RegistryErr::NotFound { address: *address })?;
        let old = *slot;
        slot.administrative = adm_state;
        Ok(StateChange { object: obj, address: *address, old, new: *slot })
    }
}
