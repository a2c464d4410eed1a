/// Outbound half of the A-bis link. Framing below OML (LAPD, IPA) is the transport's business.
pub trait OmlTransport {
    /// Send one complete OML frame
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportErr>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErr {
    SendFailed(String),
    Closed,
}

impl std::fmt::Display for TransportErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErr::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            TransportErr::Closed => write!(f, "Transport closed"),
        }
    }
}

impl std::error::Error for TransportErr {}

/// Records every frame instead of sending it. Used by tests and the load simulator.
#[derive(Default)]
pub struct LoopbackTransport {
    sent: Vec<Vec<u8>>,
    closed: bool,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.sent)
    }

    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Further sends fail with `TransportErr::Closed`
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl OmlTransport for LoopbackTransport {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportErr> {
        if self.closed {
            return Err(TransportErr::Closed);
        }
        self.sent.push(frame.to_vec());
        Ok(())
    }
}
