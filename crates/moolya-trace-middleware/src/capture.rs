//! Bounded body capture
//!
//! The handler and the client always see complete bodies; only the copy kept
//! for the log record is capped.

/// Bounded copy of a body's bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyCapture {
    buf: Vec<u8>,
    limit: usize,
    total: usize,
}

impl BodyCapture {
    /// Capture at most `limit` bytes; 0 disables capture
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
            total: 0,
        }
    }

    /// Copy as much of `chunk` as still fits under the limit
    pub fn push(&mut self, chunk: &[u8]) {
        self.total = self.total.saturating_add(chunk.len());
        let room = self.limit.saturating_sub(self.buf.len());
        let take = room.min(chunk.len());
        self.buf.extend_from_slice(&chunk[..take]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes seen, captured or not
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn is_truncated(&self) -> bool {
        self.total > self.buf.len()
    }
}
