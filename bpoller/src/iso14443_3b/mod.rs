// bpoller/src/iso14443_3b/mod.rs

//! ISO 14443-3B transceiver adapter: anti-collision select, CRC-framed
//! exchange and halt, consumed by the ISO 14443-4B poller.

pub mod config;
mod poller;

pub use poller::Iso14443_3bPoller;

use thiserror::Error;

use crate::buffer::FrameBuffer;
use crate::error::NfcError;
use crate::types::Pupi;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso14443_3bError {
    #[error("card not present")]
    NotPresent,

    #[error("collision resolution failed")]
    ColResFailed,

    #[error("buffer overflow")]
    BufferOverflow,

    #[error("communication error")]
    Communication,

    #[error("field off")]
    FieldOff,

    #[error("wrong crc")]
    WrongCrc,

    #[error("timeout")]
    Timeout,
}

impl Iso14443_3bError {
    /// Every lower-layer outcome, for exhaustive tests over the error space.
    pub const ALL: [Iso14443_3bError; 7] = [
        Iso14443_3bError::NotPresent,
        Iso14443_3bError::ColResFailed,
        Iso14443_3bError::BufferOverflow,
        Iso14443_3bError::Communication,
        Iso14443_3bError::FieldOff,
        Iso14443_3bError::WrongCrc,
        Iso14443_3bError::Timeout,
    ];
}

impl From<NfcError> for Iso14443_3bError {
    fn from(err: NfcError) -> Self {
        match err {
            NfcError::Timeout => Self::Timeout,
            NfcError::Collision => Self::ColResFailed,
            NfcError::IncompleteFrame => Self::Communication,
            NfcError::BufferOverflow => Self::BufferOverflow,
            NfcError::FieldOff => Self::FieldOff,
            NfcError::Communication => Self::Communication,
        }
    }
}

/// Card identification from the ATQB.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Iso14443_3bData {
    pub pupi: Pupi,
    pub app_data: [u8; 4],
    pub protocol_info: [u8; 3],
}

impl Iso14443_3bData {
    /// Parse an ATQB (CRC stripped): `50 PUPI(4) APP(4) INFO(3) [INFO4]`.
    pub fn from_atqb(atqb: &[u8]) -> Option<Self> {
        if !(12..=13).contains(&atqb.len()) || atqb[0] != config::ATQB_HEADER {
            return None;
        }
        let mut pupi = [0u8; 4];
        pupi.copy_from_slice(&atqb[1..5]);
        let mut app_data = [0u8; 4];
        app_data.copy_from_slice(&atqb[5..9]);
        let mut protocol_info = [0u8; 3];
        protocol_info.copy_from_slice(&atqb[9..12]);
        Some(Self {
            pupi: Pupi::from_bytes(pupi),
            app_data,
            protocol_info,
        })
    }

    /// Protocol_Type bit of the ATQB.
    pub fn supports_iso14443_4(&self) -> bool {
        self.protocol_info[1] & 0x01 != 0
    }
}

/// Lower-layer poller as seen by the ISO 14443-4B poller.
pub trait Iso14443_3bTransceiver {
    /// Select exactly one card. With `Some(pupi)` the answering card must
    /// carry that PUPI.
    fn select(&mut self, target: Option<Pupi>) -> Result<(), Iso14443_3bError>;

    /// Exchange one frame. CRC_B is appended to `tx` and checked and
    /// stripped from the response written into `rx`.
    fn send_frame(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), Iso14443_3bError>;

    /// Put the selected card into HALT.
    fn halt(&mut self) -> Result<(), Iso14443_3bError>;

    /// Data of the selected card, if any.
    fn data(&self) -> Option<&Iso14443_3bData>;
}
