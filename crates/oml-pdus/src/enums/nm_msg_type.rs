oml_enum! {
    /// Clause 9.1 Message types, plus the Siemens BS-11 vendor messages
    /// sent inside ordinary FOM frames.
    /// Bits: 8
    pub enum NmMsgType {
        // Software Load Management
        LoadInit = 0x01 => "SOFTWARE LOAD INIT",
        LoadInitAck = 0x02 => "SOFTWARE LOAD INIT ACK",
        LoadInitNack = 0x03 => "SOFTWARE LOAD INIT NACK",
        LoadSeg = 0x04 => "SOFTWARE LOAD SEGMENT",
        LoadSegAck = 0x05 => "SOFTWARE LOAD SEGMENT ACK",
        LoadAbort = 0x06 => "SOFTWARE LOAD ABORT",
        LoadEnd = 0x07 => "SOFTWARE LOAD END",
        LoadEndAck = 0x08 => "SOFTWARE LOAD END ACK",
        LoadEndNack = 0x09 => "SOFTWARE LOAD END NACK",
        SwActReq = 0x0a => "SW ACTIVATE REQUEST",
        SwActReqAck = 0x0b => "SW ACTIVATE REQUEST ACK",
        SwActReqNack = 0x0c => "SW ACTIVATE REQUEST NACK",
        ActivateSw = 0x0d => "ACTIVATE SOFTWARE",
        ActivateSwAck = 0x0e => "ACTIVATE SOFTWARE ACK",
        ActivateSwNack = 0x0f => "ACTIVATE SOFTWARE NACK",
        SwActivatedRep = 0x10 => "SW ACTIVATED REPORT",

        // A-bis Interface Management
        EstablishTei = 0x21 => "ESTABLISH TEI",
        EstablishTeiAck = 0x22 => "ESTABLISH TEI ACK",
        EstablishTeiNack = 0x23 => "ESTABLISH TEI NACK",
        ConnTerrSign = 0x24 => "CONNECT TERRESTRIAL SIGNALLING",
        ConnTerrSignAck = 0x25 => "CONNECT TERRESTRIAL SIGNALLING ACK",
        ConnTerrSignNack = 0x26 => "CONNECT TERRESTRIAL SIGNALLING NACK",
        DiscTerrSign = 0x27 => "DISCONNECT TERRESTRIAL SIGNALLING",
        DiscTerrSignAck = 0x28 => "DISCONNECT TERRESTRIAL SIGNALLING ACK",
        DiscTerrSignNack = 0x29 => "DISCONNECT TERRESTRIAL SIGNALLING NACK",
        ConnTerrTraf = 0x2a => "CONNECT TERRESTRIAL TRAFFIC",
        ConnTerrTrafAck = 0x2b => "CONNECT TERRESTRIAL TRAFFIC ACK",
        ConnTerrTrafNack = 0x2c => "CONNECT TERRESTRIAL TRAFFIC NACK",
        DiscTerrTraf = 0x2d => "DISCONNECT TERRESTRIAL TRAFFIC",
        DiscTerrTrafAck = 0x2e => "DISCONNECT TERRESTRIAL TRAFFIC ACK",
        DiscTerrTrafNack = 0x2f => "DISCONNECT TERRESTRIAL TRAFFIC NACK",

        // Transmission Management
        ConnMdropLink = 0x31 => "CONNECT MULTI-DROP LINK",
        ConnMdropLinkAck = 0x32 => "CONNECT MULTI-DROP LINK ACK",
        ConnMdropLinkNack = 0x33 => "CONNECT MULTI-DROP LINK NACK",
        DiscMdropLink = 0x34 => "DISCONNECT MULTI-DROP LINK",
        DiscMdropLinkAck = 0x35 => "DISCONNECT MULTI-DROP LINK ACK",
        DiscMdropLinkNack = 0x36 => "DISCONNECT MULTI-DROP LINK NACK",

        // Air Interface Management
        SetBtsAttr = 0x41 => "SET BTS ATTRIBUTES",
        SetBtsAttrAck = 0x42 => "SET BTS ATTRIBUTES ACK",
        SetBtsAttrNack = 0x43 => "SET BTS ATTRIBUTES NACK",
        SetRadioAttr = 0x44 => "SET RADIO CARRIER ATTRIBUTES",
        SetRadioAttrAck = 0x45 => "SET RADIO CARRIER ATTRIBUTES ACK",
        SetRadioAttrNack = 0x46 => "SET RADIO CARRIER ATTRIBUTES NACK",
        SetChanAttr = 0x47 => "SET CHANNEL ATTRIBUTES",
        SetChanAttrAck = 0x48 => "SET CHANNEL ATTRIBUTES ACK",
        SetChanAttrNack = 0x49 => "SET CHANNEL ATTRIBUTES NACK",

        // Test Management
        PerfTest = 0x51 => "PERFORM TEST",
        PerfTestAck = 0x52 => "PERFORM TEST ACK",
        PerfTestNack = 0x53 => "PERFORM TEST NACK",
        TestRep = 0x54 => "TEST REPORT",
        SendTestRep = 0x55 => "SEND TEST REPORT",
        SendTestRepAck = 0x56 => "SEND TEST REPORT ACK",
        SendTestRepNack = 0x57 => "SEND TEST REPORT NACK",
        StopTest = 0x58 => "STOP TEST",
        StopTestAck = 0x59 => "STOP TEST ACK",
        StopTestNack = 0x5a => "STOP TEST NACK",

        // State Management and Event Report
        StateChgEventRep = 0x61 => "STATE CHANGED EVENT REPORT",
        FailureEventRep = 0x62 => "FAILURE EVENT REPORT",
        StopEventRep = 0x63 => "STOP SENDING EVENT REPORTS",
        StopEventRepAck = 0x64 => "STOP SENDING EVENT REPORTS ACK",
        StopEventRepNack = 0x65 => "STOP SENDING EVENT REPORTS NACK",
        RestEventRep = 0x66 => "RESTART SENDING EVENT REPORTS",
        RestEventRepAck = 0x67 => "RESTART SENDING EVENT REPORTS ACK",
        RestEventRepNack = 0x68 => "RESTART SENDING EVENT REPORTS NACK",
        ChgAdmState = 0x69 => "CHANGE ADMINISTRATIVE STATE",
        ChgAdmStateAck = 0x6a => "CHANGE ADMINISTRATIVE STATE ACK",
        ChgAdmStateNack = 0x6b => "CHANGE ADMINISTRATIVE STATE NACK",
        ChgAdmStateReq = 0x6c => "CHANGE ADMINISTRATIVE STATE REQUEST",
        ChgAdmStateReqAck = 0x6d => "CHANGE ADMINISTRATIVE STATE REQUEST ACK",
        ChgAdmStateReqNack = 0x6e => "CHANGE ADMINISTRATIVE STATE REQUEST NACK",
        RepOutstAlarms = 0x93 => "REPORT OUTSTANDING ALARMS",
        RepOutstAlarmsAck = 0x94 => "REPORT OUTSTANDING ALARMS ACK",
        RepOutstAlarmsNack = 0x95 => "REPORT OUTSTANDING ALARMS NACK",

        // Equipment Management
        Changeover = 0x71 => "CHANGEOVER",
        ChangeoverAck = 0x72 => "CHANGEOVER ACK",
        ChangeoverNack = 0x73 => "CHANGEOVER NACK",
        Opstart = 0x74 => "OPSTART",
        OpstartAck = 0x75 => "OPSTART ACK",
        OpstartNack = 0x76 => "OPSTART NACK",
        Reinit = 0x77 => "REINITIALIZE",
        ReinitAck = 0x78 => "REINITIALIZE ACK",
        ReinitNack = 0x79 => "REINITIALIZE NACK",
        SetSiteOut = 0x7a => "SET SITE OUTPUTS",
        SetSiteOutAck = 0x7b => "SET SITE OUTPUTS ACK",
        SetSiteOutNack = 0x7c => "SET SITE OUTPUTS NACK",
        ChgHwConf = 0x90 => "CHANGE HARDWARE CONFIGURATION",
        ChgHwConfAck = 0x91 => "CHANGE HARDWARE CONFIGURATION ACK",
        ChgHwConfNack = 0x92 => "CHANGE HARDWARE CONFIGURATION NACK",

        // Measurement Management
        MeasResReq = 0x8a => "MEASUREMENT RESULT REQUEST",
        MeasResResp = 0x8b => "MEASUREMENT RESULT RESPONSE",
        StopMeas = 0x8c => "STOP MEASUREMENT",
        StartMeas = 0x8d => "START MEASUREMENT",

        // Other
        GetAttr = 0x81 => "GET ATTRIBUTES",
        GetAttrResp = 0x82 => "GET ATTRIBUTE RESPONSE",
        GetAttrNack = 0x83 => "GET ATTRIBUTES NACK",
        SetAlarmThres = 0x84 => "SET ALARM THRESHOLD",
        SetAlarmThresAck = 0x85 => "SET ALARM THRESHOLD ACK",
        SetAlarmThresNack = 0x86 => "SET ALARM THRESHOLD NACK",

        // Siemens BS-11. RESET RESOURCE shares 0x74 with OPSTART and is not listed.
        Bs11BeginDbTx = 0xa3 => "BS11 BEGIN DATABASE TRANSMISSION",
        Bs11BeginDbTxAck = 0xa4 => "BS11 BEGIN DATABASE TRANSMISSION ACK",
        Bs11BeginDbTxNack = 0xa5 => "BS11 BEGIN DATABASE TRANSMISSION NACK",
        Bs11EndDbTx = 0xa6 => "BS11 END DATABASE TRANSMISSION",
        Bs11EndDbTxAck = 0xa7 => "BS11 END DATABASE TRANSMISSION ACK",
        Bs11EndDbTxNack = 0xa8 => "BS11 END DATABASE TRANSMISSION NACK",
        Bs11CreateObj = 0xa9 => "BS11 CREATE OBJECT",
        Bs11CreateObjAck = 0xaa => "BS11 CREATE OBJECT ACK",
        Bs11CreateObjNack = 0xab => "BS11 CREATE OBJECT NACK",
        Bs11DeleteObj = 0xac => "BS11 DELETE OBJECT",
        Bs11DeleteObjAck = 0xad => "BS11 DELETE OBJECT ACK",
        Bs11DeleteObjNack = 0xae => "BS11 DELETE OBJECT NACK",
        Bs11SetAttr = 0xd0 => "BS11 SET ATTRIBUTE",
        Bs11SetAttrAck = 0xd1 => "BS11 SET ATTRIBUTE ACK",
        Bs11LmtSession = 0xdc => "BS11 LMT SESSION",
        Bs11GetState = 0xe3 => "BS11 GET STATE",
        Bs11GetStateAck = 0xe4 => "BS11 GET STATE ACK",
        Bs11LmtLogon = 0xe5 => "BS11 LMT LOGON",
        Bs11LmtLogonAck = 0xe6 => "BS11 LMT LOGON ACK",
        Bs11Restart = 0xe7 => "BS11 RESTART",
        Bs11RestartAck = 0xe8 => "BS11 RESTART ACK",
        Bs11Disconnect = 0xe9 => "BS11 DISCONNECT",
        Bs11DisconnectAck = 0xea => "BS11 DISCONNECT ACK",
        Bs11LmtLogoff = 0xec => "BS11 LMT LOGOFF",
        Bs11LmtLogoffAck = 0xed => "BS11 LMT LOGOFF ACK",
        Bs11Reconnect = 0xf1 => "BS11 RECONNECT",
        Bs11ReconnectAck = 0xf2 => "BS11 RECONNECT ACK",
    }
}

impl NmMsgType {
    /// Name of the request a NACK refers to, or None if this is not a NACK
    pub fn nack_name(self) -> Option<&'static str> {
        let name = match self {
            NmMsgType::LoadInitNack => "SOFTWARE LOAD INIT",
            NmMsgType::LoadEndNack => "SOFTWARE LOAD END",
            NmMsgType::SwActReqNack => "SOFTWARE ACTIVATE REQUEST",
            NmMsgType::ActivateSwNack => "ACTIVATE SOFTWARE",
            NmMsgType::EstablishTeiNack => "ESTABLISH TEI",
            NmMsgType::ConnTerrSignNack => "CONNECT TERRESTRIAL SIGNALLING",
            NmMsgType::DiscTerrSignNack => "DISCONNECT TERRESTRIAL SIGNALLING",
            NmMsgType::ConnTerrTrafNack => "CONNECT TERRESTRIAL TRAFFIC",
            NmMsgType::DiscTerrTrafNack => "DISCONNECT TERRESTRIAL TRAFFIC",
            NmMsgType::ConnMdropLinkNack => "CONNECT MULTI-DROP LINK",
            NmMsgType::DiscMdropLinkNack => "DISCONNECT MULTI-DROP LINK",
            NmMsgType::SetBtsAttrNack => "SET BTS ATTRIBUTE",
            NmMsgType::SetRadioAttrNack => "SET RADIO ATTRIBUTE",
            NmMsgType::SetChanAttrNack => "SET CHANNEL ATTRIBUTE",
            NmMsgType::PerfTestNack => "PERFORM TEST",
            NmMsgType::SendTestRepNack => "SEND TEST REPORT",
            NmMsgType::StopTestNack => "STOP TEST",
            NmMsgType::StopEventRepNack => "STOP EVENT REPORT",
            NmMsgType::RestEventRepNack => "RESET EVENT REPORT",
            NmMsgType::ChgAdmStateNack => "CHANGE ADMINISTRATIVE STATE",
            NmMsgType::ChgAdmStateReqNack => "CHANGE ADMINISTRATIVE STATE REQUEST",
            NmMsgType::RepOutstAlarmsNack => "REPORT OUTSTANDING ALARMS",
            NmMsgType::ChangeoverNack => "CHANGEOVER",
            NmMsgType::OpstartNack => "OPSTART",
            NmMsgType::ReinitNack => "REINIT",
            NmMsgType::SetSiteOutNack => "SET SITE OUTPUT",
            NmMsgType::ChgHwConfNack => "CHANGE HARDWARE CONFIGURATION",
            NmMsgType::GetAttrNack => "GET ATTRIBUTE",
            NmMsgType::SetAlarmThresNack => "SET ALARM THRESHOLD",
            NmMsgType::Bs11BeginDbTxNack => "BS11 BEGIN DATABASE TRANSMISSION",
            NmMsgType::Bs11EndDbTxNack => "BS11 END DATABASE TRANSMISSION",
            NmMsgType::Bs11CreateObjNack => "BS11 CREATE OBJECT",
            NmMsgType::Bs11DeleteObjNack => "BS11 DELETE OBJECT",
            _ => return None,
        };
        Some(name)
    }

    pub fn is_nack(self) -> bool {
        self.nack_name().is_some()
    }
}

/// Printable name for a raw message type, including values outside the table
pub fn msg_type_name(raw: u8) -> String {
    match NmMsgType::try_from(raw) {
        Ok(t) => t.name().to_string(),
        Err(_) => format!("MSGTYPE(0x{:02x})", raw),
    }
}
