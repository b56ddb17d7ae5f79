// bpoller/src/protocol/mod.rs

pub mod ats;
pub mod block;
pub mod crc;

pub use ats::Ats;
pub use crc::{append_crc_b, check_crc_b, crc_b, trim_crc_b, with_crc_b};
