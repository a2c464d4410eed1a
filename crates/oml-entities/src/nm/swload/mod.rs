pub mod load_fsm;
pub mod source;
pub mod swl;

pub use load_fsm::{LoadSession, LoadState, SwLoadErr};
pub use source::{FileHeader, FileOpener, FsOpener, LineSource, MemOpener, SegmentSource};
pub use swl::{ListSession, SwlStep, parse_manifest};
