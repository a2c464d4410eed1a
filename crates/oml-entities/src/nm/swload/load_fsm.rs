use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use oml_config::BtsType;
use oml_core::{ObjectAddress, assert_warn};
use oml_pdus::commands;
use oml_pdus::enums::nm_msg_type::NmMsgType;
use oml_pdus::frame::{FomMessage, FrameErr};

use crate::OmlQueue;
use crate::nm::events::SwLoadEvent;
use crate::nm::swload::source::{FileHeader, FileOpener, SegmentSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    AwaitInitAck,
    AwaitSegAck,
    AwaitEndAck,
    AwaitActivateAck,
    Error,
}

impl LoadState {
    pub fn is_awaiting(self) -> bool {
        matches!(
            self,
            LoadState::AwaitInitAck | LoadState::AwaitSegAck | LoadState::AwaitEndAck | LoadState::AwaitActivateAck
        )
    }
}

#[derive(Debug)]
pub enum SwLoadErr {
    /// A load or activation is already waiting for the BTS
    Busy,
    FileOpen { path: PathBuf, reason: String },
    FileHeader { path: PathBuf },
    ManifestParse { path: PathBuf, reason: String },
    UnsupportedBtsType(BtsType),
    Frame(FrameErr),
}

impl fmt::Display for SwLoadErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwLoadErr::Busy => write!(f, "software load already in progress"),
            SwLoadErr::FileOpen { path, reason } => write!(f, "cannot open {}: {}", path.display(), reason),
            SwLoadErr::FileHeader { path } => write!(f, "{}: missing or invalid file header", path.display()),
            SwLoadErr::ManifestParse { path, reason } => write!(f, "manifest {}: {}", path.display(), reason),
            SwLoadErr::UnsupportedBtsType(t) => write!(f, "software load not supported for {:?}", t),
            SwLoadErr::Frame(e) => write!(f, "frame build failed: {}", e),
        }
    }
}

impl std::error::Error for SwLoadErr {}

impl From<FrameErr> for SwLoadErr {
    fn from(e: FrameErr) -> Self {
        SwLoadErr::Frame(e)
    }
}

/// One software load or activation towards the site manager.
///
/// Only one may be outstanding per link. Idle and Error accept a fresh start,
/// every Await state rejects it with `SwLoadErr::Busy`.
pub struct LoadSession {
    bts_type: BtsType,
    ack_timeout: Option<Duration>,
    target: ObjectAddress,

    state: LoadState,
    file_id: Vec<u8>,
    file_version: Vec<u8>,
    window_size: u8,
    segments_in_window: u8,
    forced: bool,
    last_seg: bool,
    source: Option<Box<dyn SegmentSource>>,
    deadline: Option<Instant>,
}

impl LoadSession {
    pub fn new(bts_type: BtsType, ack_timeout: Option<Duration>) -> Self {
        Self {
            bts_type,
            ack_timeout,
            target: ObjectAddress::site_manager(),
            state: LoadState::Idle,
            file_id: Vec::new(),
            file_version: Vec::new(),
            window_size: 0,
            segments_in_window: 0,
            forced: false,
            last_seg: false,
            source: None,
            deadline: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_awaiting()
    }

    pub fn file_id(&self) -> &[u8] {
        &self.file_id
    }

    pub fn file_version(&self) -> &[u8] {
        &self.file_version
    }

    /// Percentage of the image handed to the BTS so far, while a file is open
    pub fn progress_percent(&self) -> Option<u8> {
        self.source.as_ref().map(|s| s.progress_percent())
    }

    /// Opens `path`, reads its header and sends Load Data Initiate.
    /// On error nothing is sent and the session is left as it was.
    pub fn start(
        &mut self,
        queue: &mut OmlQueue,
        opener: &dyn FileOpener,
        path: &Path,
        window_size: u8,
        forced: bool,
        now: Instant,
    ) -> Result<(), SwLoadErr> {
        if self.is_busy() {
            return Err(SwLoadErr::Busy);
        }
        let (source, header) = self.open_image(opener, path)?;

        assert_warn!(window_size > 0, "window size 0, using 1");
        let window_size = window_size.max(1);
        let frame = commands::load_init(self.target, &header.file_id, &header.file_version, window_size)?;

        tracing::info!(
            "starting software load of {} ({}:{}), window {}{}",
            path.display(),
            String::from_utf8_lossy(&header.file_id),
            String::from_utf8_lossy(&header.file_version),
            window_size,
            if forced { ", forced" } else { "" }
        );

        self.source = Some(source);
        self.file_id = header.file_id;
        self.file_version = header.file_version;
        self.window_size = window_size;
        self.segments_in_window = 0;
        self.forced = forced;
        self.last_seg = false;
        self.enter(LoadState::AwaitInitAck, now);

        tracing::debug!("-> {} {}", NmMsgType::LoadInit, self.target);
        queue.push_frame(frame);
        Ok(())
    }

    /// Sends Activate Software for the image at `path`. Only the header is read.
    pub fn activate(&mut self, queue: &mut OmlQueue, opener: &dyn FileOpener, path: &Path, now: Instant) -> Result<(), SwLoadErr> {
        if self.is_busy() {
            return Err(SwLoadErr::Busy);
        }
        // The image is closed again when `_source` drops at the end of this scope
        let (_source, header) = self.open_image(opener, path)?;
        let frame = commands::activate_sw(self.target, &header.file_id, &header.file_version)?;

        tracing::info!("activating software {}", path.display());
        self.source = None;
        self.file_id = header.file_id;
        self.file_version = header.file_version;
        self.enter(LoadState::AwaitActivateAck, now);

        tracing::debug!("-> {} {}", NmMsgType::ActivateSw, self.target);
        queue.push_frame(frame);
        Ok(())
    }

    /// Local abort. Closes the image without telling the BTS.
    pub fn abort(&mut self) {
        if self.state != LoadState::Idle {
            tracing::info!("aborting software load in state {:?}", self.state);
        }
        self.source = None;
        self.deadline = None;
        self.state = LoadState::Idle;
    }

    /// Feeds a load-class message from the BTS into the session
    pub fn rx_fom(&mut self, queue: &mut OmlQueue, fom: &FomMessage, now: Instant) -> Vec<SwLoadEvent> {
        tracing::trace!("rx_fom");
        let mut events = Vec::new();

        let Some(msg_type) = fom.known_type() else {
            tracing::warn!("unexpected message type 0x{:02x} in software load", fom.msg_type);
            return events;
        };

        match (self.state, msg_type) {
            (LoadState::AwaitInitAck, NmMsgType::LoadInitAck) => {
                events.push(SwLoadEvent::InitAck);
                self.begin_segments(queue, now);
            }
            (LoadState::AwaitInitAck, NmMsgType::LoadInitNack) => {
                if self.forced {
                    tracing::warn!("forced mode, ignoring {}", msg_type);
                    events.push(SwLoadEvent::InitAck);
                    self.begin_segments(queue, now);
                } else {
                    tracing::warn!("software load rejected: {}", msg_type);
                    events.push(SwLoadEvent::InitNack);
                    self.fail();
                }
            }
            (LoadState::AwaitSegAck, NmMsgType::LoadSegAck) => {
                events.push(SwLoadEvent::SegAck);
                self.segments_in_window = 0;
                if self.last_seg {
                    self.send_end(queue, now);
                } else {
                    self.fill_window(queue, now);
                }
            }
            (LoadState::AwaitEndAck, NmMsgType::LoadEndAck) => {
                tracing::info!("software load of {} complete", String::from_utf8_lossy(&self.file_id));
                self.finish();
                events.push(SwLoadEvent::EndAck);
            }
            (LoadState::AwaitEndAck, NmMsgType::LoadEndNack) => {
                if self.forced {
                    tracing::warn!("forced mode, ignoring {}", msg_type);
                    self.finish();
                    events.push(SwLoadEvent::EndAck);
                } else {
                    tracing::warn!("software load end rejected: {}", msg_type);
                    events.push(SwLoadEvent::EndNack);
                    self.fail();
                }
            }
            (LoadState::AwaitActivateAck, NmMsgType::ActivateSwAck) => {
                tracing::info!("software {} activated", String::from_utf8_lossy(&self.file_id));
                self.finish();
                events.push(SwLoadEvent::ActivateAck);
            }
            (LoadState::AwaitActivateAck, NmMsgType::ActivateSwNack) => {
                tracing::warn!("software activation rejected: {}", msg_type);
                events.push(SwLoadEvent::ActivateNack);
                self.fail();
            }
            // Answer to an Activate Software we sent on a BTS SW Activate Request
            (LoadState::Idle, NmMsgType::ActivateSwAck) => {
                tracing::debug!("{} outside a load session", msg_type);
            }
            (LoadState::Error, _) => {
                tracing::debug!("ignoring {} in error state", msg_type);
            }
            (state, NmMsgType::LoadAbort) => {
                tracing::warn!("BTS sent {} in state {:?}", msg_type, state);
            }
            (state, _) => {
                tracing::warn!("unexpected {} in state {:?}", msg_type, state);
            }
        }
        events
    }

    /// Expires an Await state whose ACK is overdue
    pub fn tick(&mut self, now: Instant) -> Vec<SwLoadEvent> {
        match self.deadline {
            Some(deadline) if self.state.is_awaiting() && now >= deadline => {
                tracing::warn!("no ACK from BTS in state {:?}, giving up", self.state);
                self.fail();
                vec![SwLoadEvent::Timeout]
            }
            _ => Vec::new(),
        }
    }

    fn open_image(&self, opener: &dyn FileOpener, path: &Path) -> Result<(Box<dyn SegmentSource>, FileHeader), SwLoadErr> {
        if self.bts_type != BtsType::Bs11 {
            return Err(SwLoadErr::UnsupportedBtsType(self.bts_type));
        }
        let source = opener
            .open(path)
            .map_err(|e| SwLoadErr::FileOpen { path: path.to_path_buf(), reason: e.to_string() })?;
        let header = source
            .peek_line()
            .and_then(FileHeader::parse)
            .ok_or_else(|| SwLoadErr::FileHeader { path: path.to_path_buf() })?;
        Ok((source, header))
    }

    fn enter(&mut self, state: LoadState, now: Instant) {
        self.state = state;
        self.deadline = self.ack_timeout.map(|t| now + t);
    }

    fn finish(&mut self) {
        self.source = None;
        self.deadline = None;
        self.state = LoadState::Idle;
    }

    fn fail(&mut self) {
        self.source = None;
        self.deadline = None;
        self.state = LoadState::Error;
    }

    fn begin_segments(&mut self, queue: &mut OmlQueue, now: Instant) {
        self.segments_in_window = 0;
        self.fill_window(queue, now);
    }

    /// Sends segments until the window is full or the final segment is out
    fn fill_window(&mut self, queue: &mut OmlQueue, now: Instant) {
        while self.segments_in_window < self.window_size {
            if let Err(e) = self.send_segment(queue) {
                tracing::error!("software load aborted: {}", e);
                self.fail();
                return;
            }
            if self.last_seg {
                break;
            }
        }
        self.enter(LoadState::AwaitSegAck, now);
    }

    fn send_segment(&mut self, queue: &mut OmlQueue) -> Result<(), String> {
        let source = self.source.as_mut().ok_or("no open image")?;
        let line = match source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.last_seg = true;
                return Ok(());
            }
            Err(e) => return Err(format!("read failed: {}", e)),
        };
        self.last_seg = source.is_last_segment();

        let seq = if self.last_seg {
            0
        } else {
            self.segments_in_window += 1;
            self.segments_in_window
        };
        let frame = commands::load_segment_bs11(self.target, seq, &line).map_err(|e| e.to_string())?;
        tracing::trace!("-> {} seq {} len {}", NmMsgType::LoadSeg, seq, line.len());
        queue.push_frame(frame);
        Ok(())
    }

    fn send_end(&mut self, queue: &mut OmlQueue, now: Instant) {
        match commands::load_end(self.target, &self.file_id, &self.file_version) {
            Ok(frame) => {
                tracing::debug!("-> {} {}", NmMsgType::LoadEnd, self.target);
                queue.push_frame(frame);
                self.enter(LoadState::AwaitEndAck, now);
            }
            Err(e) => {
                tracing::error!("failed to build {}: {}", NmMsgType::LoadEnd, e);
                self.fail();
            }
        }
    }
}
