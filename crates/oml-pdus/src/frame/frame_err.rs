use core::fmt;

use oml_core::PduParseErr;
use oml_core::bytebuffer::hex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameErr {
    /// Fewer bytes than the fixed header or FOM sub-header needs
    TooShort { len: usize },
    UnsupportedPlacement(u8),
    UnexpectedSequence(u8),
    UnknownDiscriminator(u8),
    /// Header length field claims more bytes than were received
    LengthMismatch { declared: usize, available: usize },
    /// MANUF frame whose vendor magic is not ip.access
    UnknownVendorFrame(Vec<u8>),
    /// FOM body does not fit in the 1-byte length field
    BodyTooLong(usize),
    Attr(PduParseErr),
}

impl fmt::Display for FrameErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameErr::TooShort { len } => write!(f, "frame too short ({} bytes)", len),
            FrameErr::UnsupportedPlacement(p) => write!(f, "placement 0x{:02x} not supported", p),
            FrameErr::UnexpectedSequence(s) => write!(f, "sequence number {} != 0", s),
            FrameErr::UnknownDiscriminator(d) => write!(f, "unknown message discriminator 0x{:02x}", d),
            FrameErr::LengthMismatch { declared, available } => {
                write!(f, "header length {} exceeds {} available bytes", declared, available)
            }
            FrameErr::UnknownVendorFrame(magic) => write!(f, "unknown manufacturer magic [{}]", hex(magic)),
            FrameErr::BodyTooLong(len) => write!(f, "FOM body of {} bytes exceeds 255", len),
            FrameErr::Attr(e) => write!(f, "attribute error: {}", e),
        }
    }
}

impl std::error::Error for FrameErr {}

impl From<PduParseErr> for FrameErr {
    fn from(e: PduParseErr) -> Self {
        FrameErr::Attr(e)
    }
}
