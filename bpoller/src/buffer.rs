// bpoller/src/buffer.rs

use crate::{Error, Result};

/// Fixed-capacity byte buffer reused across radio exchanges.
///
/// Pollers own one buffer for transmit and one for receive. Every exchange
/// overwrites the previous contents, so data read out of a buffer must be
/// copied before the next exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl FrameBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a buffer whose capacity is exactly the length of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            capacity: bytes.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    pub fn append_byte(&mut self, byte: u8) -> Result<()> {
        self.append(&[byte])
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let requested = self.data.len() + bytes.len();
        if requested > self.capacity {
            return Err(Error::BufferOverflow {
                capacity: self.capacity,
                requested,
            });
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Overwrite the whole buffer with `bytes`. On overflow the buffer is
    /// left empty.
    pub fn set(&mut self, bytes: &[u8]) -> Result<()> {
        self.reset();
        self.append(bytes)
    }

    pub fn first(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Drop the last `n` bytes. Returns false if the buffer is shorter.
    pub fn truncate_end(&mut self, n: usize) -> bool {
        match self.data.len().checked_sub(n) {
            Some(len) => {
                self.data.truncate(len);
                true
            }
            None => false,
        }
    }
}
