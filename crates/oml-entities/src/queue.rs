use std::collections::VecDeque;

use crate::nm::events::NmEvent;

/// Output of the NM entity: serialized frames bound for the BTS, and events for the upper layer.
/// Both are FIFO. The owner drains it after each inbound frame or command.
pub struct OmlQueue {
    frames: VecDeque<Vec<u8>>,
    events: VecDeque<NmEvent>,
}

impl OmlQueue {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    pub fn push_frame(&mut self, frame: Vec<u8>) {
        self.frames.push_back(frame);
    }

    /// Puts back a frame that could not be sent
    pub fn push_frame_front(&mut self, frame: Vec<u8>) {
        self.frames.push_front(frame);
    }

    pub fn push_event(&mut self, event: NmEvent) {
        self.events.push_back(event);
    }

    pub fn pop_frame(&mut self) -> Option<Vec<u8>> {
        self.frames.pop_front()
    }

    pub fn pop_event(&mut self) -> Option<NmEvent> {
        self.events.pop_front()
    }

    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        self.frames.drain(..).collect()
    }

    pub fn take_events(&mut self) -> Vec<NmEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.events.is_empty()
    }
}

impl Default for OmlQueue {
    fn default() -> Self {
        Self::new()
    }
}
