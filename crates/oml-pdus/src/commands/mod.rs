//! Outbound message builders. Each returns a complete, serialized OML frame.

pub mod ipaccess;
pub mod object;
pub mod swload;

pub use ipaccess::*;
pub use object::*;
pub use swload::*;
