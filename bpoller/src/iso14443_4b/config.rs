// bpoller/src/iso14443_4b/config.rs

//! ISO 14443-4B poller configuration

/// FWT used for the ATS request, in carrier cycles
pub const ATS_FWT_FC: u32 = 12000;

/// RATS: start byte, FSDI = 8 (256 bytes), CID 0
pub const RATS: &[u8] = &[0xE0, 0x80];

/// Tx/rx buffer capacity
pub const BUFFER_SIZE: usize = 256;
