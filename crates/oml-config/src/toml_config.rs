use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use toml::Value;

use super::bsc_config::{BscConfig, BtsType, CfgBts, CfgSwLoad, SharedConfig, default_window_size};

/// Build `SharedConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.bts.extra.is_empty() {
        return Err(format!("Unrecognized fields in bts: {:?}", sorted_keys(&root.bts.extra)).into());
    }
    if let Some(ref sw) = root.swload {
        if !sw.extra.is_empty() {
            return Err(format!("Unrecognized fields in swload: {:?}", sorted_keys(&sw.extra)).into());
        }
    }

    let mut cfg = BscConfig {
        debug_log: root.debug_log,
        bts: CfgBts::default(),
        swload: CfgSwLoad::default(),
    };

    apply_bts_patch(&mut cfg.bts, root.bts);
    if let Some(sw) = root.swload {
        apply_swload_patch(&mut cfg.swload, sw);
    }

    Ok(SharedConfig::from_config(cfg)?)
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_bts_patch(dst: &mut CfgBts, src: BtsDto) {
    dst.bts_type = src.bts_type;
    dst.num_trx = src.num_trx;
    if let Some(v) = src.bts_nr {
        dst.bts_nr = v;
    }
}

fn apply_swload_patch(dst: &mut CfgSwLoad, src: SwLoadDto) {
    dst.window_size = src.window_size;
    if let Some(v) = src.forced {
        dst.forced = v;
    }
    // 0 keeps the timeout disabled
    dst.ack_timeout = src.ack_timeout_secs.filter(|s| *s > 0).map(Duration::from_secs);
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    bts: BtsDto,

    #[serde(default)]
    swload: Option<SwLoadDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct BtsDto {
    bts_type: BtsType,
    num_trx: u8,
    bts_nr: Option<u8>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct SwLoadDto {
    #[serde(default = "default_window_size")]
    window_size: u8,
    forced: Option<bool>,
    ack_timeout_secs: Option<u64>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
config_version = "0.1"
debug_log = "/tmp/oml.log"

[bts]
bts_type = "Bs11"
num_trx = 2
bts_nr = 0

[swload]
window_size = 4
forced = true
ack_timeout_secs = 10
"#;

    #[test]
    fn test_full_config() {
        let cfg = from_toml_str(FULL).unwrap().config();
        assert_eq!(cfg.debug_log.as_deref(), Some("/tmp/oml.log"));
        assert_eq!(cfg.bts.bts_type, BtsType::Bs11);
        assert_eq!(cfg.bts.num_trx, 2);
        assert_eq!(cfg.swload.window_size, 4);
        assert!(cfg.swload.forced);
        assert_eq!(cfg.swload.ack_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_minimal_config_defaults() {
        let cfg = from_toml_str("config_version = \"0.1\"\n[bts]\nbts_type = \"NanoBts\"\nnum_trx = 1\n").unwrap().config();
        assert_eq!(cfg.bts.bts_type, BtsType::NanoBts);
        assert_eq!(cfg.bts.bts_nr, 0);
        assert_eq!(cfg.swload.window_size, default_window_size());
        assert!(!cfg.swload.forced);
        assert_eq!(cfg.swload.ack_timeout, None);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml = "config_version = \"0.1\"\n[bts]\nbts_type = \"Bs11\"\nnum_trx = 1\ncolour = 3\n";
        let err = from_toml_str(toml).err().unwrap().to_string();
        assert!(err.contains("colour"), "{}", err);

        let toml = "config_version = \"0.1\"\nfoo = 1\n[bts]\nbts_type = \"Bs11\"\nnum_trx = 1\n";
        assert!(from_toml_str(toml).is_err());
    }

    #[test]
    fn test_wrong_version_rejected() {
        let toml = "config_version = \"0.5\"\n[bts]\nbts_type = \"Bs11\"\nnum_trx = 1\n";
        let err = from_toml_str(toml).err().unwrap().to_string();
        assert!(err.contains("config_version"), "{}", err);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let toml = "config_version = \"0.1\"\n[bts]\nbts_type = \"Bs11\"\nnum_trx = 0\n";
        assert!(from_toml_str(toml).is_err());
    }
}
