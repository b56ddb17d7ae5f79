// bpoller/src/protocol/block.rs

//! ISO 14443-4 block prologue (PCB) helpers.

/// I-block PCB with block number 0.
pub const PCB_I_BLOCK: u8 = 0x02;
pub const PCB_BLOCK_NUMBER_MASK: u8 = 0x01;

const PCB_I_BLOCK_TYPE_MASK: u8 = 0xE2;
const PCB_CHAINING: u8 = 0x10;
const PCB_CID_FOLLOWING: u8 = 0x08;
const PCB_NAD_FOLLOWING: u8 = 0x04;

/// PCB for an I-block carrying `block_number` (only bit 0 is used).
pub fn i_block_pcb(block_number: u8) -> u8 {
    PCB_I_BLOCK | (block_number & PCB_BLOCK_NUMBER_MASK)
}

/// Return the block number of a plain I-block PCB.
///
/// Chained blocks and blocks with CID or NAD are not plain and yield `None`,
/// as do R- and S-blocks.
pub fn parse_i_block_pcb(pcb: u8) -> Option<u8> {
    if pcb & PCB_I_BLOCK_TYPE_MASK != PCB_I_BLOCK {
        return None;
    }
    if pcb & (PCB_CHAINING | PCB_CID_FOLLOWING | PCB_NAD_FOLLOWING) != 0 {
        return None;
    }
    Some(pcb & PCB_BLOCK_NUMBER_MASK)
}
