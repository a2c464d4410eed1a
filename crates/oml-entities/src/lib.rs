//! Network management for the BSC side of an A-bis OML link
//!
//! - `nm`: the NM entity, object registry, message classifier and software load
//! - `queue`: frames and events produced by the entity
//! - `transport` and `link`: delivery of queued frames to the BTS

#![allow(dead_code)]

pub mod link;
pub mod nm;
pub mod queue;
pub mod transport;

pub use link::OmlLink;
pub use queue::OmlQueue;
pub use transport::{LoopbackTransport, OmlTransport, TransportErr};
