// bpoller/src/st25tb/mod.rs

//! ST25TB memory card poller: select, full memory read, per-step events.

pub mod config;
mod poller;

pub use poller::St25tbPoller;

use derive_more::Display;
use thiserror::Error;

use crate::error::NfcError;
use crate::types::St25tbUid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum St25tbError {
    #[error("timeout")]
    Timeout,

    #[error("crc error")]
    Crc,

    /// Truncated or wrongly sized response
    #[error("framing error")]
    Framing,

    #[error("collision or select failure")]
    CollisionOrSelect,

    #[error("protocol error")]
    Protocol,
}

impl From<NfcError> for St25tbError {
    fn from(err: NfcError) -> Self {
        match err {
            NfcError::Timeout => Self::Timeout,
            NfcError::Collision => Self::CollisionOrSelect,
            NfcError::IncompleteFrame => Self::Framing,
            NfcError::BufferOverflow => Self::Protocol,
            NfcError::FieldOff => Self::Protocol,
            NfcError::Communication => Self::Protocol,
        }
    }
}

/// ST25TB family member, identified by the UID product code.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum St25tbType {
    #[display(fmt = "ST25TB512-AT")]
    Type512At,
    #[display(fmt = "ST25TB512-AC")]
    Type512Ac,
    #[display(fmt = "SRIX512")]
    X512,
    #[display(fmt = "ST25TB02K")]
    Type02k,
    #[display(fmt = "ST25TB04K")]
    Type04k,
    #[display(fmt = "SRIX2K")]
    X2k,
    #[display(fmt = "SRIX4K")]
    X4k,
}

impl St25tbType {
    pub fn from_product_code(code: u8) -> Option<Self> {
        match code {
            0x00 | 0x03 => Some(Self::X4k),
            0x02 => Some(Self::X2k),
            0x04 => Some(Self::X512),
            0x06 => Some(Self::Type512Ac),
            0x07 => Some(Self::Type04k),
            0x0C => Some(Self::Type512At),
            0x0F => Some(Self::Type02k),
            _ => None,
        }
    }

    pub fn from_uid(uid: &St25tbUid) -> Option<Self> {
        Self::from_product_code(uid.product_code())
    }

    /// Number of 32-bit user blocks, system block excluded.
    pub fn block_count(&self) -> usize {
        match self {
            Self::Type512At | Self::Type512Ac | Self::X512 => 16,
            Self::Type02k | Self::X2k => 64,
            Self::Type04k | Self::X4k => 128,
        }
    }
}

/// Memory image recovered by a full read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct St25tbData {
    pub uid: St25tbUid,
    pub card_type: St25tbType,
    pub blocks: Vec<u32>,
    pub system_otp_block: u32,
}

impl St25tbData {
    pub fn block(&self, index: usize) -> Option<u32> {
        self.blocks.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum St25tbPollerState {
    #[default]
    Idle,
    Selected,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum St25tbPollerEvent {
    /// A card has been selected
    Ready,
    /// Card memory is available through `data()`
    ReadSuccessful,
    Error(St25tbError),
}
