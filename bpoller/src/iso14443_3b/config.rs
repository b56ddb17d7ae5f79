// bpoller/src/iso14443_3b/config.rs

//! ISO 14443-3B poller configuration

use crate::transceiver::Timing;

/// RF timing for Type B polling
pub const TIMING: Timing = Timing {
    guard_time_us: 5000,
    fdt_poll_fc: 9000,
    fdt_poll_poll_us: 1280,
};

/// FWT for WUPB/ATTRIB/HLTB, in carrier cycles
pub const FDT_ACTIVATION_FC: u32 = 65000;

/// Buffer capacity (frame + CRC)
pub const MAX_BUFFER_SIZE: usize = 258;

/// WUPB: APf, AFI (all families), PARAM with the WUP bit (0x08) set and a
/// single slot. Cards in HALT answer too.
pub const WUPB: &[u8] = &[0x05, 0x00, 0x08];

/// ATTRIB parameters following the PUPI: default TR0/TR1, max frame 256
/// bytes at 106 kbit/s, ISO 14443-4 compliant, CID 0
pub const ATTRIB_PARAMS: [u8; 4] = [0x00, 0x08, 0x01, 0x00];

pub const CMD_ATTRIB: u8 = 0x1D;
pub const CMD_HLTB: u8 = 0x50;
pub const ATQB_HEADER: u8 = 0x50;
