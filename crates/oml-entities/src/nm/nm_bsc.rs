use std::fmt::Display;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Instant;

use oml_config::{BtsType, SharedConfig};
use oml_core::bytebuffer::hex;
use oml_core::{ObjectAddress, unimplemented_log};
use oml_pdus::attributes::AttrList;
use oml_pdus::commands::{self, AbisChannel};
use oml_pdus::enums::bs11::BS11_LMT_LOGON;
use oml_pdus::enums::event_type::{EventType, Severity};
use oml_pdus::enums::ipaccess_msg_type::IpaccMsgType;
use oml_pdus::enums::nack_cause::{NackCause, nack_cause_name};
use oml_pdus::enums::nm_attr::NmAttr;
use oml_pdus::enums::nm_msg_type::NmMsgType;
use oml_pdus::frame::{FomMessage, FrameErr, OmlBody, OmlFrame};

use crate::OmlQueue;
use crate::nm::components::classifier::{MsgClass, classify};
use crate::nm::components::object_registry::ObjectRegistry;
use crate::nm::events::{NmEvent, SwLoadEvent};
use crate::nm::swload::{FileOpener, FsOpener, ListSession, LoadSession, LoadState, SwLoadErr};

/// SW Activate Request carries the software description in its last 22 attribute bytes
const SW_DESCR_LEN: usize = 22;

/// Network management entity on the BSC side of one OML link.
/// Owns the object registry and the software-load slot of that link.
pub struct NmBsc {
    config: SharedConfig,
    pub registry: ObjectRegistry,
    swload: LoadSession,
    swl: Option<ListSession>,
    opener: Box<dyn FileOpener>,
}

impl NmBsc {
    pub fn new(config: SharedConfig) -> Self {
        Self::with_opener(config, Box::new(FsOpener))
    }

    /// Like `new`, reading software images through `opener`
    pub fn with_opener(config: SharedConfig, opener: Box<dyn FileOpener>) -> Self {
        let cfg = config.config();
        Self {
            registry: ObjectRegistry::new(cfg.bts.num_trx),
            swload: LoadSession::new(cfg.bts.bts_type, cfg.swload.ack_timeout),
            swl: None,
            opener,
            config,
        }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    fn bts_nr(&self) -> u8 {
        self.config.config().bts.bts_nr
    }

    /// Entry point for every OML frame received from the BTS.
    /// Malformed frames are logged and dropped.
    pub fn rx_frame(&mut self, queue: &mut OmlQueue, data: &[u8], now: Instant) {
        tracing::trace!("rx_frame");
        let frame = match OmlFrame::parse(data) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Failed parsing OML frame: {:?} {}", e, hex(data));
                return;
            }
        };

        match &frame.body {
            OmlBody::Fom(fom) => self.rx_fom(queue, fom, now),
            OmlBody::Manuf { fom, .. } => {
                if self.config.config().bts.bts_type == BtsType::NanoBts {
                    self.rx_ipacc(queue, fom);
                } else {
                    tracing::warn!("don't know how to parse OML for this BTS type: {}", frame);
                }
            }
            OmlBody::Raw(_) => unimplemented_log!("{} messages", frame.discriminator),
        }
    }

    fn rx_fom(&mut self, queue: &mut OmlQueue, fom: &FomMessage, now: Instant) {
        tracing::debug!("<- {}", fom);
        match classify(fom.msg_type) {
            MsgClass::Report => self.rx_report(queue, fom),
            MsgClass::Load => {
                let events = self.swload.rx_fom(queue, fom, now);
                self.dispatch_load_events(queue, events, now);
            }
            MsgClass::Nack => self.rx_nack(queue, fom),
            MsgClass::Generic => self.rx_generic(queue, fom),
        }
    }

    /// Routes load events through the software-list session, if one is running
    fn dispatch_load_events(&mut self, queue: &mut OmlQueue, events: Vec<SwLoadEvent>, now: Instant) {
        for ev in events {
            let Some(swl) = self.swl.as_mut() else {
                queue.push_event(NmEvent::SwLoad(ev));
                continue;
            };
            match swl.on_load_event(queue, &mut self.swload, self.opener.as_ref(), ev, now) {
                Ok(step) => {
                    if let Some(forward) = step.forward {
                        queue.push_event(NmEvent::SwLoad(forward));
                    }
                    if step.finished {
                        tracing::debug!("software list session finished");
                        self.swl = None;
                    }
                }
                Err(e) => {
                    tracing::error!("software list aborted: {}", e);
                    queue.push_event(NmEvent::SwlAborted { reason: e.to_string() });
                    self.swl = None;
                }
            }
        }
    }

    fn rx_report(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_report");
        match fom.known_type() {
            Some(NmMsgType::StateChgEventRep) => self.rx_statechg_rep(queue, fom),
            Some(NmMsgType::FailureEventRep) => self.rx_failure_rep(queue, fom),
            Some(NmMsgType::SwActivatedRep) => {
                tracing::info!("software activated on {}", fom.address);
                queue.push_event(NmEvent::SwActivated { address: fom.address });
            }
            Some(NmMsgType::TestRep) => {
                tracing::debug!("test report for {} [{}]", fom.address, hex(&fom.attr_data));
                queue.push_event(NmEvent::TestReport { address: fom.address, attr_data: fom.attr_data.clone() });
            }
            _ => tracing::warn!("unknown report {}", fom),
        }
    }

    fn parse_attrs(fom: &FomMessage) -> Option<AttrList> {
        match fom.attributes() {
            Ok(attrs) => Some(attrs),
            Err(e) => {
                tracing::warn!("Failed parsing attributes of {}: {:?} {}", fom, e, hex(&fom.attr_data));
                None
            }
        }
    }

    fn rx_statechg_rep(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_statechg_rep");
        let Some(attrs) = Self::parse_attrs(fom) else {
            return;
        };
        match self.registry.apply_state_report(&fom.address, &attrs) {
            Ok(Some(change)) => {
                tracing::debug!("{}: {} -> {}", fom.address, change.old, change.new);
                queue.push_event(NmEvent::OperationalChange(change));
            }
            Ok(None) => tracing::trace!("{}: state unchanged", fom.address),
            Err(e) => tracing::warn!("state change report: {}", e),
        }
    }

    fn rx_failure_rep(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_failure_rep");
        let Some(attrs) = Self::parse_attrs(fom) else {
            return;
        };
        let event_type = attrs.get_attr(NmAttr::EventType).and_then(|a| a.value_u8());
        let severity = attrs.get_attr(NmAttr::Severity).and_then(|a| a.value_u8());
        let probable_cause = attrs.get_attr(NmAttr::ProbCause).map(|a| a.value.clone());
        let text = attrs
            .get_attr(NmAttr::AddText)
            .map(|a| String::from_utf8_lossy(&a.value).trim_end_matches('\0').to_string());

        tracing::warn!(
            "failure event report {}: type={} severity={} text={:?}",
            fom.address,
            event_type.and_then(|t| EventType::try_from(t).ok()).map_or("unknown", |t| t.name()),
            severity.and_then(|s| Severity::try_from(s).ok()).map_or("unknown", |s| s.name()),
            text
        );
        queue.push_event(NmEvent::FailureReport { address: fom.address, event_type, severity, probable_cause, text });
    }

    fn rx_nack(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_nack");
        let name = fom.known_type().and_then(|t| t.nack_name()).unwrap_or("unknown request");
        // A NACK with an unparsable attribute block is still a NACK
        let cause = fom
            .attributes()
            .ok()
            .and_then(|attrs| attrs.get_attr(NmAttr::NackCauses).and_then(|a| a.value_u8()));
        match cause {
            Some(c) => tracing::warn!("{} NACK for {}, cause {}", name, fom.address, nack_cause_name(c)),
            None => tracing::warn!("{} NACK for {}", name, fom.address),
        }
        queue.push_event(NmEvent::Nack { msg_type: fom.msg_type, address: fom.address, cause });
    }

    fn rx_generic(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_generic");
        match fom.known_type() {
            Some(NmMsgType::ChgAdmStateAck) => self.rx_chg_adm_state_ack(queue, fom),
            Some(NmMsgType::SwActReq) => {
                if self.rx_sw_act_req(queue, fom).is_err() {
                    tracing::warn!("{} from {} left unanswered", NmMsgType::SwActReq, fom.address);
                }
            }
            Some(NmMsgType::Bs11LmtSession) => self.rx_lmt_session(queue, fom),
            Some(t) => tracing::debug!("{} from {}, nothing to do", t, fom.address),
            None => tracing::debug!("ignoring unknown message type 0x{:02x}", fom.msg_type),
        }
    }

    fn rx_chg_adm_state_ack(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_chg_adm_state_ack");
        let Some(attrs) = Self::parse_attrs(fom) else {
            return;
        };
        let Some(adm_state) = attrs.get_attr(NmAttr::AdmState).and_then(|a| a.value_u8()) else {
            tracing::warn!("Failed parsing {}: missing {}", fom, NmAttr::AdmState);
            return;
        };
        match self.registry.apply_adm_state_ack(&fom.address, adm_state) {
            Ok(change) => {
                tracing::debug!("{}: {} -> {}", fom.address, change.old, change.new);
                queue.push_event(NmEvent::AdministrativeChange(change));
            }
            Err(e) => tracing::warn!("administrative state ACK: {}", e),
        }
    }

    /// The BTS asks to activate software. GPRS objects are refused, everything else is
    /// acknowledged and told to activate the software it described.
    fn rx_sw_act_req(&mut self, queue: &mut OmlQueue, fom: &FomMessage) -> Result<(), FrameErr> {
        tracing::trace!("rx_sw_act_req");
        let addr = fom.address;

        if addr.obj_class.is_gprs() {
            let res = commands::sw_act_req_nack(addr, &fom.attr_data, NackCause::ObjclassNotsupp.into_raw());
            return Self::send(queue, NmMsgType::SwActReqNack, res);
        }

        Self::send(queue, NmMsgType::SwActReqAck, commands::sw_act_req_ack(addr, &fom.attr_data))?;
        let data = &fom.attr_data;
        let descr = &data[data.len().saturating_sub(SW_DESCR_LEN)..];
        Self::send(queue, NmMsgType::ActivateSw, commands::activate_sw_descr(addr, descr))
    }

    fn rx_lmt_session(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_lmt_session");
        let Some(attrs) = Self::parse_attrs(fom) else {
            return;
        };
        let logon = attrs.get_attr(NmAttr::Bs11LmtLogonSession).and_then(|a| a.value_u8()).map(|v| v == BS11_LMT_LOGON);
        let access_level = attrs.get_attr(NmAttr::Bs11LmtUserAccLev).and_then(|a| a.value_u8());
        let user_name = attrs
            .get_attr(NmAttr::Bs11LmtUserName)
            .map(|a| String::from_utf8_lossy(&a.value).trim_end_matches('\0').to_string());

        tracing::info!(
            "LMT {} user={:?} level={:?}",
            match logon {
                Some(true) => "logon",
                Some(false) => "logoff",
                None => "session",
            },
            user_name,
            access_level
        );
        queue.push_event(NmEvent::LmtSession { logon, access_level, user_name });
    }

    fn rx_ipacc(&mut self, queue: &mut OmlQueue, fom: &FomMessage) {
        tracing::trace!("rx_ipacc");
        let Ok(msg_type) = IpaccMsgType::try_from(fom.msg_type) else {
            unimplemented_log!("ip.access message type 0x{:02x}", fom.msg_type);
            return;
        };
        tracing::debug!("<- {} {}", msg_type, fom.address);
        let Some(attrs) = Self::parse_attrs(fom) else {
            return;
        };

        match msg_type {
            IpaccMsgType::RslConnectAck => {
                let ip = attrs
                    .get_attr(NmAttr::IpaccDstIp)
                    .and_then(|a| <[u8; 4]>::try_from(a.value.as_slice()).ok())
                    .map(Ipv4Addr::from);
                let port = attrs
                    .get_attr(NmAttr::IpaccDstIpPort)
                    .and_then(|a| <[u8; 2]>::try_from(a.value.as_slice()).ok())
                    .map(u16::from_be_bytes);
                let stream_id = attrs.get_attr(NmAttr::IpaccStreamId).and_then(|a| a.value_u8());
                tracing::info!("RSL connect ACK from {}: ip={:?} port={:?} stream={:?}", fom.address, ip, port, stream_id);
                queue.push_event(NmEvent::IpaccRslConnectAck { address: fom.address, ip, port, stream_id });
            }
            IpaccMsgType::RslConnectNack | IpaccMsgType::SetNvattrNack | IpaccMsgType::GetNvattrNack => {
                let cause = attrs.get_attr(NmAttr::NackCauses).and_then(|a| a.value_u8());
                match cause {
                    Some(c) => tracing::warn!("{} from {}, cause {}", msg_type, fom.address, nack_cause_name(c)),
                    None => tracing::warn!("{} from {}", msg_type, fom.address),
                }
                queue.push_event(NmEvent::IpaccNack { msg_type, address: fom.address, cause });
            }
            IpaccMsgType::SetNvattrAck | IpaccMsgType::GetNvattrAck => {
                queue.push_event(NmEvent::IpaccAck { msg_type, address: fom.address, attr_data: fom.attr_data.clone() });
            }
            _ => unimplemented_log!("{} from BTS", msg_type),
        }
    }

    // Software load

    /// Loads one image with the configured window size and forced flag
    pub fn software_load(&mut self, queue: &mut OmlQueue, path: &Path, now: Instant) -> Result<(), SwLoadErr> {
        let cfg = self.config.config();
        self.software_load_with(queue, path, cfg.swload.window_size, cfg.swload.forced, now)
    }

    pub fn software_load_with(
        &mut self,
        queue: &mut OmlQueue,
        path: &Path,
        window_size: u8,
        forced: bool,
        now: Instant,
    ) -> Result<(), SwLoadErr> {
        self.swload.start(queue, self.opener.as_ref(), path, window_size, forced, now)
    }

    /// Loads every image named in a software list, then activates the list
    pub fn software_list(&mut self, queue: &mut OmlQueue, manifest: &Path, now: Instant) -> Result<(), SwLoadErr> {
        let cfg = self.config.config();
        let swl = ListSession::start(
            queue,
            &mut self.swload,
            self.opener.as_ref(),
            manifest,
            cfg.swload.window_size,
            cfg.swload.forced,
            now,
        )?;
        if self.swl.is_some() {
            tracing::debug!("replacing finished software list session");
        }
        self.swl = Some(swl);
        Ok(())
    }

    pub fn software_activate(&mut self, queue: &mut OmlQueue, path: &Path, now: Instant) -> Result<(), SwLoadErr> {
        self.swload.activate(queue, self.opener.as_ref(), path, now)
    }

    /// Drops any load or list session without telling the BTS
    pub fn abort_load(&mut self) {
        self.swload.abort();
        self.swl = None;
    }

    /// Expires overdue ACK waits. Call periodically.
    pub fn tick(&mut self, queue: &mut OmlQueue, now: Instant) {
        let events = self.swload.tick(now);
        self.dispatch_load_events(queue, events, now);
    }

    pub fn load_state(&self) -> LoadState {
        self.swload.state()
    }

    pub fn load_progress(&self) -> Option<u8> {
        self.swload.progress_percent()
    }

    pub fn list_active(&self) -> bool {
        self.swl.is_some()
    }

    // Outbound commands

    fn send(queue: &mut OmlQueue, what: impl Display, frame: Result<Vec<u8>, FrameErr>) -> Result<(), FrameErr> {
        match frame {
            Ok(frame) => {
                tracing::debug!("-> {}", what);
                queue.push_frame(frame);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to build {}: {}", what, e);
                Err(e)
            }
        }
    }

    pub fn send_opstart(&self, queue: &mut OmlQueue, address: ObjectAddress) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::Opstart, commands::opstart(address))
    }

    pub fn send_chg_adm_state(&self, queue: &mut OmlQueue, address: ObjectAddress, adm_state: u8) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::ChgAdmState, commands::chg_adm_state(address, adm_state))
    }

    pub fn send_set_bts_attr(&self, queue: &mut OmlQueue, attr_data: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::SetBtsAttr, commands::set_bts_attr(self.bts_nr(), attr_data))
    }

    pub fn send_set_radio_attr(&self, queue: &mut OmlQueue, trx_nr: u8, attr_data: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::SetRadioAttr, commands::set_radio_attr(self.bts_nr(), trx_nr, attr_data))
    }

    pub fn send_set_channel_attr(&self, queue: &mut OmlQueue, trx_nr: u8, ts_nr: u8, attr_data: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::SetChanAttr, commands::set_channel_attr(self.bts_nr(), trx_nr, ts_nr, attr_data))
    }

    pub fn send_establish_tei(&self, queue: &mut OmlQueue, trx_nr: u8, chan: AbisChannel, tei: u8) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::EstablishTei, commands::establish_tei(self.bts_nr(), trx_nr, chan, tei))
    }

    pub fn send_conn_terr_sign(&self, queue: &mut OmlQueue, trx_nr: u8, chan: AbisChannel) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::ConnTerrSign, commands::conn_terr_sign(self.bts_nr(), trx_nr, chan))
    }

    pub fn send_conn_terr_traf(&self, queue: &mut OmlQueue, trx_nr: u8, ts_nr: u8, chan: AbisChannel) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::ConnTerrTraf, commands::conn_terr_traf(self.bts_nr(), trx_nr, ts_nr, chan))
    }

    pub fn send_event_report(&self, queue: &mut OmlQueue, on: bool) -> Result<(), FrameErr> {
        let what = if on { NmMsgType::RestEventRep } else { NmMsgType::StopEventRep };
        Self::send(queue, what, commands::event_report(on))
    }

    pub fn send_get_attr(&self, queue: &mut OmlQueue, address: ObjectAddress, attr_ids: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, NmMsgType::GetAttr, commands::get_attr(address, attr_ids))
    }

    pub fn send_simple_cmd(&self, queue: &mut OmlQueue, msg_type: u8) -> Result<(), FrameErr> {
        Self::send(queue, format_args!("cmd 0x{:02x}", msg_type), commands::simple_cmd(msg_type))
    }

    /// `raw` must start with a FOM sub-header
    pub fn send_raw(&self, queue: &mut OmlQueue, raw: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, format_args!("raw [{}]", hex(raw)), commands::raw_fom(raw))
    }

    pub fn send_ipaccess_msg(
        &self,
        queue: &mut OmlQueue,
        msg_type: IpaccMsgType,
        address: ObjectAddress,
        attr_data: &[u8],
    ) -> Result<(), FrameErr> {
        Self::send(queue, msg_type, commands::ipaccess_msg(msg_type, address, attr_data))
    }

    pub fn send_ipaccess_set_nvattr(&self, queue: &mut OmlQueue, attr_data: &[u8]) -> Result<(), FrameErr> {
        Self::send(queue, IpaccMsgType::SetNvattr, commands::ipaccess_set_nvattr(attr_data))
    }

    pub fn send_ipaccess_restart(&self, queue: &mut OmlQueue) -> Result<(), FrameErr> {
        Self::send(queue, IpaccMsgType::Restart, commands::ipaccess_restart())
    }

    pub fn send_ipaccess_rsl_connect(
        &self,
        queue: &mut OmlQueue,
        trx_nr: u8,
        ip: Option<Ipv4Addr>,
        port: u16,
        stream_id: u8,
    ) -> Result<(), FrameErr> {
        Self::send(
            queue,
            IpaccMsgType::RslConnect,
            commands::ipaccess_rsl_connect(self.bts_nr(), trx_nr, ip, port, stream_id),
        )
    }
}
