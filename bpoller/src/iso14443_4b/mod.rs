// bpoller/src/iso14443_4b/mod.rs

//! ISO 14443-4 transport poller over Type B.

pub mod config;
mod poller;

pub use poller::Iso14443_4bPoller;

use thiserror::Error;

use crate::iso14443_3b::{Iso14443_3bData, Iso14443_3bError};
use crate::protocol::Ats;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso14443_4bError {
    #[error("timeout")]
    Timeout,

    #[error("crc error")]
    Crc,

    /// Unexpected block number or malformed prologue
    #[error("framing error")]
    Framing,

    #[error("collision or select failure")]
    CollisionOrSelect,

    #[error("protocol error")]
    Protocol,
}

impl From<Iso14443_3bError> for Iso14443_4bError {
    fn from(err: Iso14443_3bError) -> Self {
        match err {
            Iso14443_3bError::Timeout => Self::Timeout,
            Iso14443_3bError::WrongCrc => Self::Crc,
            Iso14443_3bError::ColResFailed => Self::CollisionOrSelect,
            Iso14443_3bError::NotPresent => Self::CollisionOrSelect,
            Iso14443_3bError::Communication => Self::Framing,
            Iso14443_3bError::BufferOverflow => Self::Protocol,
            Iso14443_3bError::FieldOff => Self::Protocol,
        }
    }
}

/// Per-exchange state of the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Iso14443_4bPollerState {
    #[default]
    Idle,
    ReadAts,
    Error,
    Ready,
}

/// Logical application session, opened by the ATS and closed by halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Iso14443_4bSessionState {
    #[default]
    Idle,
    Active,
    StopRequested,
}

/// Block-numbering state of the block protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtocolState {
    pub block_number: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso14443_4bPollerEvent {
    Ready,
    Error(Iso14443_4bError),
}

/// Card data recovered by the ATS step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Iso14443_4bData {
    pub iso14443_3b: Option<Iso14443_3bData>,
    pub ats: Ats,
}

impl Iso14443_4bData {
    pub fn historical_bytes(&self) -> &[u8] {
        self.ats.historical_bytes()
    }
}
