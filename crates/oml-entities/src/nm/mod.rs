pub mod components;
pub mod events;
pub mod nm_bsc;
pub mod swload;

pub use events::{NmEvent, SwLoadEvent};
pub use nm_bsc::NmBsc;
