use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Vendor family of the BTS at the far end of the OML link.
/// Selects framing quirks and which software-load variant is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BtsType {
    /// Siemens BS-11: line-oriented software load, vendor objects in the registry
    Bs11,
    /// ip.access nanoBTS: manufacturer-specific messages with the "com.ipaccess" magic
    NanoBts,
}

/// Managed topology of the BTS
#[derive(Debug, Clone)]
pub struct CfgBts {
    pub bts_type: BtsType,
    /// BTS number used in object instances
    pub bts_nr: u8,
    /// Number of transceivers. Radio carrier, baseband transceiver and channel objects
    /// are created per TRX.
    pub num_trx: u8,
}

impl Default for CfgBts {
    fn default() -> Self {
        Self {
            bts_type: BtsType::Bs11,
            bts_nr: 0,
            num_trx: 1,
        }
    }
}

/// Software-load defaults
#[derive(Debug, Clone)]
pub struct CfgSwLoad {
    /// Number of segments sent before waiting for a SEG ACK
    pub window_size: u8,
    /// Treat INIT NACK and END NACK as success
    pub forced: bool,
    /// When set, a session awaiting an ACK for longer than this is moved to the error state
    pub ack_timeout: Option<Duration>,
}

impl Default for CfgSwLoad {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            forced: false,
            ack_timeout: None,
        }
    }
}

#[inline]
pub(crate) fn default_window_size() -> u8 {
    30
}

#[derive(Debug, Clone)]
pub struct BscConfig {
    pub debug_log: Option<String>,
    pub bts: CfgBts,
    pub swload: CfgSwLoad,
}

impl BscConfig {
    pub fn new(bts_type: BtsType, num_trx: u8) -> Self {
        BscConfig {
            debug_log: None,
            bts: CfgBts { bts_type, num_trx, ..Default::default() },
            swload: CfgSwLoad::default(),
        }
    }

    /// Validate that all configuration fields hold usable values.
    pub fn validate(&self) -> Result<(), &str> {
        if self.bts.num_trx == 0 {
            return Err("bts.num_trx must be at least 1");
        }
        // 0xff is reserved as "not applicable" in object instances
        if self.bts.num_trx == 0xff || self.bts.bts_nr == 0xff {
            return Err("bts.bts_nr and bts.num_trx must be below 255");
        }
        if self.swload.window_size == 0 {
            return Err("swload.window_size must be at least 1");
        }
        if let Some(t) = self.swload.ack_timeout {
            if t.is_zero() {
                return Err("swload.ack_timeout_secs must be positive when set");
            }
        }
        Ok(())
    }
}

/// Shared configuration handle. The config is immutable after construction.
#[derive(Clone)]
pub struct SharedConfig {
    cfg: Arc<BscConfig>,
}

impl SharedConfig {
    pub fn new(bts_type: BtsType, num_trx: u8) -> Result<Self, String> {
        Self::from_config(BscConfig::new(bts_type, num_trx))
    }

    /// Checks the config for validity before wrapping it
    pub fn from_config(cfg: BscConfig) -> Result<Self, String> {
        cfg.validate().map_err(|e| format!("Invalid configuration: {}", e))?;
        Ok(Self { cfg: Arc::new(cfg) })
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<BscConfig> {
        Arc::clone(&self.cfg)
    }
}
