use oml_pdus::enums::nm_msg_type::NmMsgType;

/// Handler family for an inbound FOM message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgClass {
    Report,
    Load,
    Nack,
    Generic,
}

fn is_report(msg_type: NmMsgType) -> bool {
    matches!(
        msg_type,
        NmMsgType::SwActivatedRep | NmMsgType::TestRep | NmMsgType::StateChgEventRep | NmMsgType::FailureEventRep
    )
}

fn is_load(msg_type: NmMsgType) -> bool {
    matches!(
        msg_type,
        NmMsgType::LoadInitAck
            | NmMsgType::LoadInitNack
            | NmMsgType::LoadSegAck
            | NmMsgType::LoadAbort
            | NmMsgType::LoadEndAck
            | NmMsgType::LoadEndNack
            | NmMsgType::ActivateSwAck
            | NmMsgType::ActivateSwNack
            | NmMsgType::SwActivatedRep
    )
}

/// Classifies a raw message type. Precedence is Report, Load, Nack, Generic,
/// so SW Activated Report goes to the report handler and the load NACKs to the load session.
pub fn classify(msg_type: u8) -> MsgClass {
    let Ok(t) = NmMsgType::try_from(msg_type) else {
        return MsgClass::Generic;
    };
    if is_report(t) {
        MsgClass::Report
    } else if is_load(t) {
        MsgClass::Load
    } else if t.is_nack() {
        MsgClass::Nack
    } else {
        MsgClass::Generic
    }
}
