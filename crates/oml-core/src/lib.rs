//! Core utilities for the OML station
//!
//! This crate provides fundamental types and utilities used across the A-bis OML stack:
//! - ByteBuffer for bounded byte-level frame manipulation
//! - Object addressing (object class + instance)
//! - The PDU parse error type
//! - Common macros and logging setup

pub mod address;
pub mod bytebuffer;
pub mod debug;
pub mod pdu_parse_error;

// Re-export commonly used items
pub use address::*;
pub use bytebuffer::ByteBuffer;
pub use pdu_parse_error::PduParseErr;
