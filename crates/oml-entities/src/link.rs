use std::time::Instant;

use crate::OmlQueue;
use crate::nm::{NmBsc, NmEvent};
use crate::transport::{OmlTransport, TransportErr};

/// One OML link: the NM entity, its output queue and the transport the queue drains into.
/// Frames queued by a handler are sent before the call returns.
pub struct OmlLink<T: OmlTransport> {
    nm: NmBsc,
    transport: T,
    queue: OmlQueue,
}

impl<T: OmlTransport> OmlLink<T> {
    pub fn new(nm: NmBsc, transport: T) -> Self {
        Self { nm, transport, queue: OmlQueue::new() }
    }

    /// Handles one frame from the BTS and returns the events it produced
    pub fn on_frame(&mut self, data: &[u8], now: Instant) -> Result<Vec<NmEvent>, TransportErr> {
        self.nm.rx_frame(&mut self.queue, data, now);
        self.flush()?;
        Ok(self.queue.take_events())
    }

    /// Runs a local operation against the NM entity, then flushes what it queued
    pub fn submit<R>(&mut self, op: impl FnOnce(&mut NmBsc, &mut OmlQueue) -> R) -> Result<R, TransportErr> {
        let res = op(&mut self.nm, &mut self.queue);
        self.flush()?;
        Ok(res)
    }

    pub fn tick(&mut self, now: Instant) -> Result<Vec<NmEvent>, TransportErr> {
        self.nm.tick(&mut self.queue, now);
        self.flush()?;
        Ok(self.queue.take_events())
    }

    /// Sends every queued frame in order. On failure the unsent frames stay queued.
    pub fn flush(&mut self) -> Result<(), TransportErr> {
        while let Some(frame) = self.queue.pop_frame() {
            if let Err(e) = self.transport.send(&frame) {
                tracing::error!("OML send failed: {}", e);
                self.queue.push_frame_front(frame);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<NmEvent> {
        self.queue.take_events()
    }

    pub fn nm(&self) -> &NmBsc {
        &self.nm
    }

    pub fn nm_mut(&mut self) -> &mut NmBsc {
        &mut self.nm
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
