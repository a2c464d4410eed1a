use std::path::Path;
use std::time::{Duration, Instant};

use oml_config::{BscConfig, BtsType, SharedConfig};
use oml_core::ObjectAddress;
use oml_entities::OmlLink;
use oml_entities::nm::swload::{LoadState, MemOpener, SwLoadErr};
use oml_entities::nm::{NmBsc, NmEvent};
use oml_pdus::enums::nm_msg_type::NmMsgType;
use oml_pdus::frame::{FomMessage, build_fom_raw, build_manuf};

use super::sink::Sink;

/// Creates a default config for testing: two TRX, window of 4.
/// It can still be modified before passing it to the ComponentTest constructor
pub fn default_test_config(bts_type: BtsType) -> BscConfig {
    let mut cfg = BscConfig::new(bts_type, 2);
    cfg.swload.window_size = 4;
    cfg
}

/// Builds a software image with a valid header and `lines` body lines
pub fn sw_image(file_id: &str, version: &str, lines: usize) -> Vec<u8> {
    let mut data = format!("@(#){}:{}\r\n", file_id, version).into_bytes();
    for i in 0..lines {
        data.extend_from_slice(format!("S{:04}DEADBEEF\r\n", i).as_bytes());
    }
    data
}

/// One NM entity on a link to a fake BTS, with a manual clock and in-memory files
pub struct ComponentTest {
    pub config: SharedConfig,
    pub link: OmlLink<Sink>,
    now: Instant,
}

impl ComponentTest {
    pub fn new(config: BscConfig, files: MemOpener) -> Self {
        let shared_config = SharedConfig::from_config(config).expect("invalid test config");
        let nm = NmBsc::with_opener(shared_config.clone(), Box::new(files));
        Self {
            config: shared_config,
            link: OmlLink::new(nm, Sink::new()),
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Delivers a raw frame from the BTS
    pub fn rx_raw(&mut self, data: &[u8]) -> Vec<NmEvent> {
        let now = self.now;
        self.link.on_frame(data, now).expect("transport failed")
    }

    /// Delivers a FOM message from the BTS
    pub fn rx_fom(&mut self, msg_type: u8, address: ObjectAddress, attr_data: &[u8]) -> Vec<NmEvent> {
        let frame = build_fom_raw(msg_type, address, attr_data).expect("failed to build test frame");
        self.rx_raw(&frame)
    }

    /// Delivers an ip.access MANUF message from the BTS
    pub fn rx_manuf(&mut self, msg_type: u8, address: ObjectAddress, attr_data: &[u8]) -> Vec<NmEvent> {
        let frame = build_manuf(msg_type, address, attr_data).expect("failed to build test frame");
        self.rx_raw(&frame)
    }

    /// Attribute-less message from the site manager, as used by the load protocol
    pub fn rx_load_msg(&mut self, msg_type: NmMsgType) -> Vec<NmEvent> {
        self.rx_fom(msg_type.into_raw(), ObjectAddress::site_manager(), &[])
    }

    pub fn take_sent(&mut self) -> Vec<FomMessage> {
        self.link.transport_mut().take_foms()
    }

    pub fn software_load(&mut self, path: &str) -> Result<(), SwLoadErr> {
        let now = self.now;
        self.link
            .submit(|nm, q| nm.software_load(q, Path::new(path), now))
            .expect("transport failed")
    }

    pub fn software_list(&mut self, path: &str) -> Result<(), SwLoadErr> {
        let now = self.now;
        self.link
            .submit(|nm, q| nm.software_list(q, Path::new(path), now))
            .expect("transport failed")
    }

    pub fn software_activate(&mut self, path: &str) -> Result<(), SwLoadErr> {
        let now = self.now;
        self.link
            .submit(|nm, q| nm.software_activate(q, Path::new(path), now))
            .expect("transport failed")
    }

    pub fn load_state(&self) -> LoadState {
        self.link.nm().load_state()
    }

    /// Moves the clock forward and runs the periodic timer
    pub fn advance(&mut self, by: Duration) -> Vec<NmEvent> {
        self.now += by;
        let now = self.now;
        self.link.tick(now).expect("transport failed")
    }
}
