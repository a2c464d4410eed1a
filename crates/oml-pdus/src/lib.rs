//! A-bis OML (GSM 12.21) message definitions
//!
//! - `enums`: code tables (discriminators, message types, attribute ids, NACK causes, ...)
//! - `attributes`: the attribute dictionary and TLV codec
//! - `frame`: OML header, FOM and ip.access MANUF frames
//! - `commands`: builders for outbound messages

pub mod attributes;
pub mod commands;
pub mod enums;
pub mod frame;
