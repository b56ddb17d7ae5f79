// bpoller/src/protocol/crc.rs

use crate::buffer::FrameBuffer;
use crate::Result;

/// Length of the CRC_B trailer in bytes.
pub const CRC_LEN: usize = 2;

/// Compute ISO 14443-3 CRC_B (init 0xFFFF, reflected, inverted output).
pub fn crc_b(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &b in data {
        let mut x = b ^ (crc as u8);
        x ^= x << 4;
        let x = x as u16;
        crc = (crc >> 8) ^ (x << 8) ^ (x << 3) ^ (x >> 4);
    }
    !crc
}

/// Append CRC_B (LSB first) to the buffer contents.
pub fn append_crc_b(buf: &mut FrameBuffer) -> Result<()> {
    let crc = crc_b(buf.as_slice());
    buf.append(&crc.to_le_bytes())
}

/// Check the trailing CRC_B of a received frame.
pub fn check_crc_b(frame: &[u8]) -> bool {
    if frame.len() < CRC_LEN {
        return false;
    }
    let (payload, trailer) = frame.split_at(frame.len() - CRC_LEN);
    crc_b(payload).to_le_bytes() == [trailer[0], trailer[1]]
}

/// Verify and strip the trailing CRC_B. Returns false (and leaves the
/// buffer untouched) when the check fails.
pub fn trim_crc_b(buf: &mut FrameBuffer) -> bool {
    if !check_crc_b(buf.as_slice()) {
        return false;
    }
    buf.truncate_end(CRC_LEN)
}

/// Convenience for building expected frames: payload followed by its CRC_B.
pub fn with_crc_b(payload: &[u8]) -> Vec<u8> {
    let mut out = payload.to_vec();
    out.extend_from_slice(&crc_b(payload).to_le_bytes());
    out
}
