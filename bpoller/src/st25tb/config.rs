// bpoller/src/st25tb/config.rs

//! ST25TB-specific configuration

use crate::transceiver::Timing;

/// RF timing; ST25TB shares the ISO 14443-2 Type B physical layer
pub const TIMING: Timing = Timing {
    guard_time_us: 5000,
    fdt_poll_fc: 4205,
    fdt_poll_poll_us: 1280,
};

/// FWT for regular commands, in carrier cycles
pub const FWT_FC: u32 = 4205;

/// Write cycle time (7 ms) expressed in carrier cycles
pub const WRITE_FWT_FC: u32 = 95000;

/// Tx/rx buffer capacity (largest frame: GET_UID response + CRC)
pub const BUFFER_SIZE: usize = 16;

/// Pause after an error has been reported to the callback, in milliseconds
pub const ERROR_BACKOFF_MS: u32 = 100;

pub const CMD_INITIATE: &[u8] = &[0x06, 0x00];
pub const CMD_SELECT: u8 = 0x0E;
pub const CMD_GET_UID: u8 = 0x0B;
pub const CMD_READ_BLOCK: u8 = 0x08;
pub const CMD_WRITE_BLOCK: u8 = 0x09;
pub const CMD_COMPLETION: u8 = 0x0F;

/// Address of the system/OTP block
pub const SYSTEM_BLOCK: u8 = 0xFF;
