use oml_entities::{OmlTransport, TransportErr};
use oml_pdus::frame::{FomMessage, OmlFrame};

/// Stands in for the BTS end of the link.
/// Collects every frame the entity sends for later inspection.
#[derive(Default)]
pub struct Sink {
    frames: Vec<Vec<u8>>,
    closed: bool,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.frames)
    }

    /// Collected frames, parsed back into FOM messages
    pub fn take_foms(&mut self) -> Vec<FomMessage> {
        self.take_frames()
            .iter()
            .map(|bytes| {
                let frame = OmlFrame::parse(bytes).unwrap_or_else(|e| panic!("entity sent unparsable frame: {:?}", e));
                frame.fom_message().expect("frame without FOM").clone()
            })
            .collect()
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl OmlTransport for Sink {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportErr> {
        if self.closed {
            return Err(TransportErr::Closed);
        }
        tracing::debug!("sink: {:02x?}", frame);
        self.frames.push(frame.to_vec());
        Ok(())
    }
}
