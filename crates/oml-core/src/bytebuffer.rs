use std::fmt;

use crate::pdu_parse_error::PduParseErr;

/// Byte-oriented read/write cursor for OML frames.
///
/// Reads never go beyond `end`; writes either stay inside the buffer or, for an
/// autoexpanding buffer, grow it.
pub struct ByteBuffer {
    buffer: Vec<u8>,
    pos: usize,         // next byte offset for read/write
    end: usize,         // bytes at or after this are out of window
    flag_autoexpand: bool,
}

impl ByteBuffer {
    /// Create an empty buffer meant for writing. Capacity grows as needed.
    pub fn new_autoexpand(initial_capacity: usize) -> Self {
        ByteBuffer {
            buffer: Vec::with_capacity(initial_capacity),
            pos: 0,
            end: 0,
            flag_autoexpand: true,
        }
    }

    /// Wrap received bytes for reading. The whole slice is readable.
    pub fn from_bytes(data: &[u8]) -> Self {
        ByteBuffer {
            buffer: data.to_vec(),
            pos: 0,
            end: data.len(),
            flag_autoexpand: false,
        }
    }

    /// Peek one byte at the current pos, without advancing.
    pub fn peek_u8(&self) -> Option<u8> {
        if self.pos < self.end { Some(self.buffer[self.pos]) } else { None }
    }

    /// Peek a byte at `offset` from the current pos, without advancing.
    pub fn peek_u8_at(&self, offset: usize) -> Option<u8> {
        let p = self.pos.checked_add(offset)?;
        if p < self.end { Some(self.buffer[p]) } else { None }
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, PduParseErr> {
        let v = self.peek_u8().ok_or(PduParseErr::BufferEnded { field: Some(field) })?;
        self.pos += 1;
        Ok(v)
    }

    /// Reads a big-endian 16-bit value
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, PduParseErr> {
        let s = self.read_slice(2, field)?;
        Ok(u16::from_be_bytes([s[0], s[1]]))
    }

    /// Returns the next `len` bytes and advances, or BufferEnded if fewer remain.
    pub fn read_slice(&mut self, len: usize, field: &'static str) -> Result<&[u8], PduParseErr> {
        if len > self.get_len_remaining() {
            return Err(PduParseErr::BufferEnded { field: Some(field) });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buffer[start..self.pos])
    }

    /// Returns everything from pos to end and advances to end.
    pub fn read_remaining(&mut self) -> &[u8] {
        let start = self.pos;
        self.pos = self.end;
        &self.buffer[start..self.end]
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_slice(&[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_slice(&value.to_be_bytes());
    }

    pub fn write_slice(&mut self, data: &[u8]) {
        let new_pos = self.pos + data.len();
        if new_pos > self.buffer.len() {
            assert!(self.flag_autoexpand, "write beyond end of fixed ByteBuffer");
            self.buffer.resize(new_pos, 0);
        }
        self.buffer[self.pos..new_pos].copy_from_slice(data);
        self.pos = new_pos;
        if self.pos > self.end {
            self.end = self.pos;
        }
    }

    /// Overwrites a single byte at absolute offset `at`, leaving pos untouched.
    /// Used to patch length fields once the body size is known.
    pub fn patch_u8(&mut self, at: usize, value: u8) {
        assert!(at < self.end, "patch out of window: {} >= {}", at, self.end);
        self.buffer[at] = value;
    }

    /// Total length of the readable window
    pub fn get_len(&self) -> usize {
        self.end
    }

    /// Number of bytes left, from pos to end
    pub fn get_len_remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Get the current position
    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Seek `pos` to `offset` from the start
    pub fn seek(&mut self, offset: usize) {
        assert!(offset <= self.end, "seek out of window: got {}, allowed [0,{}]", offset, self.end);
        self.pos = offset;
    }

    /// Shrinks the readable window so that it ends `len` bytes after the current pos.
    /// Fails if that would extend the window.
    pub fn limit(&mut self, len: usize) -> Result<(), PduParseErr> {
        if len > self.get_len_remaining() {
            return Err(PduParseErr::InconsistentLength { expected: len, found: self.get_len_remaining() });
        }
        self.end = self.pos + len;
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.end]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.end);
        self.buffer
    }

    /// Dump the window as a hex string (lowercase, space separated),
    /// with a ^ marker before the current pos.
    pub fn dump_hex(&self) -> String {
        let mut s = String::with_capacity(self.end * 3 + 1);
        for (i, b) in self.buffer[..self.end].iter().enumerate() {
            if i == self.pos {
                s.push('^');
            } else if i > 0 {
                s.push(' ');
            }
            s.push_str(&format!("{:02x}", b));
        }
        if self.pos == self.end {
            s.push('^');
        }
        s
    }
}

/// Hex-dump a byte slice as "aa bb cc"
pub fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteBuffer {{ len: {} pos: {} [{}] }}", self.end, self.pos, self.dump_hex())
    }
}
