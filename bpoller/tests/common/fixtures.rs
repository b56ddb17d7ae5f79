// fixtures.rs: provides commonly used test payloads/frames

use bpoller::iso14443_3b::Iso14443_3bData;
use bpoller::protocol::block::i_block_pcb;
use bpoller::types::{Pupi, St25tbUid};

pub const CHIP_ID: u8 = 0x42;

pub fn sample_pupi() -> Pupi {
    Pupi::from_bytes([0x11, 0x22, 0x33, 0x44])
}

/// ATQB of an ISO 14443-4 capable card (CRC stripped).
pub fn atqb_payload() -> Vec<u8> {
    let mut payload = vec![0x50u8];
    payload.extend_from_slice(sample_pupi().as_bytes());
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // application data
    payload.extend_from_slice(&[0x00, 0x81, 0x81]); // protocol info
    payload
}

pub fn sample_iso14443_3b_data() -> Iso14443_3bData {
    Iso14443_3bData::from_atqb(&atqb_payload()).unwrap()
}

/// ATS with FSCI 7, TA/TB/TC present and two historical bytes.
pub fn ats_payload() -> Vec<u8> {
    hex::decode("07778070024a43").unwrap()
}

/// I-block response carrying `block_number` and `payload`.
pub fn i_block(block_number: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![i_block_pcb(block_number)];
    frame.extend_from_slice(payload);
    frame
}

/// ST25TB UID bytes, most significant first, for the given product code.
pub fn st25tb_uid(product_code: u8) -> St25tbUid {
    St25tbUid::from_bytes([0xD0, 0x02, product_code << 2, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E])
}

/// GET_UID response payload: UID least significant byte first.
pub fn st25tb_uid_wire(product_code: u8) -> Vec<u8> {
    let mut wire = st25tb_uid(product_code).as_bytes().to_vec();
    wire.reverse();
    wire
}

pub fn block_value(index: usize) -> u32 {
    0xA5A5_0000 | index as u32
}
