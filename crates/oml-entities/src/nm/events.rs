use std::net::Ipv4Addr;

use oml_core::ObjectAddress;
use oml_pdus::enums::ipaccess_msg_type::IpaccMsgType;

use crate::nm::components::object_registry::StateChange;

/// Software-load progress signals, produced by load-session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwLoadEvent {
    /// Load-Init acknowledged, or NACKed while forced
    InitAck,
    InitNack,
    SegAck,
    /// Load-End acknowledged, or NACKed while forced
    EndAck,
    EndNack,
    ActivateAck,
    ActivateNack,
    /// No ACK within the configured ack timeout
    Timeout,
}

impl SwLoadEvent {
    /// Events after which the session sits in Error
    pub fn is_failure(self) -> bool {
        matches!(self, SwLoadEvent::InitNack | SwLoadEvent::EndNack | SwLoadEvent::ActivateNack | SwLoadEvent::Timeout)
    }
}

/// Signals for the upper layer, drained from the OmlQueue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NmEvent {
    /// A state change report altered the stored state of an object
    OperationalChange(StateChange),
    /// Change Administrative State was acknowledged
    AdministrativeChange(StateChange),
    Nack {
        msg_type: u8,
        address: ObjectAddress,
        cause: Option<u8>,
    },
    FailureReport {
        address: ObjectAddress,
        event_type: Option<u8>,
        severity: Option<u8>,
        probable_cause: Option<Vec<u8>>,
        text: Option<String>,
    },
    SwActivated {
        address: ObjectAddress,
    },
    TestReport {
        address: ObjectAddress,
        attr_data: Vec<u8>,
    },
    SwLoad(SwLoadEvent),
    /// A software-list session could not continue with its next file
    SwlAborted {
        reason: String,
    },
    /// BS-11 local maintenance terminal logged on or off
    LmtSession {
        logon: Option<bool>,
        access_level: Option<u8>,
        user_name: Option<String>,
    },
    IpaccRslConnectAck {
        address: ObjectAddress,
        ip: Option<Ipv4Addr>,
        port: Option<u16>,
        stream_id: Option<u8>,
    },
    IpaccNack {
        msg_type: IpaccMsgType,
        address: ObjectAddress,
        cause: Option<u8>,
    },
    IpaccAck {
        msg_type: IpaccMsgType,
        address: ObjectAddress,
        attr_data: Vec<u8>,
    },
}
