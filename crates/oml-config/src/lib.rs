//! OML station configuration management
//!
//! This crate provides configuration loading and parsing:
//! - TOML configuration file parsing
//! - BTS topology and software-load settings

pub mod bsc_config;
pub mod toml_config;

pub use bsc_config::*;
pub use toml_config::*;
