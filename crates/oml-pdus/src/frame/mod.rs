pub mod fom_message;
pub mod frame_err;
pub mod oml_frame;

pub use fom_message::FomMessage;
pub use frame_err::FrameErr;
pub use oml_frame::{IPACC_MAGIC, OmlBody, OmlFrame, OmlHeader, build_fom, build_fom_raw, build_manuf};
