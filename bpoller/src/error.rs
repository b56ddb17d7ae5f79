// bpoller/src/error.rs

use thiserror::Error;

use crate::iso14443_3b::Iso14443_3bError;
use crate::iso14443_4b::Iso14443_4bError;
use crate::st25tb::St25tbError;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("buffer overflow: capacity {capacity}, requested {requested}")]
    BufferOverflow { capacity: usize, requested: usize },

    #[error("iso14443-3b error: {0}")]
    Iso14443_3b(#[from] Iso14443_3bError),

    #[error("iso14443-4b error: {0}")]
    Iso14443_4b(#[from] Iso14443_4bError),

    #[error("st25tb error: {0}")]
    St25tb(#[from] St25tbError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a single radio exchange, as reported by the transceiver driver.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfcError {
    #[error("no response within frame wait time")]
    Timeout,

    #[error("bit collision on the field")]
    Collision,

    #[error("incomplete frame")]
    IncompleteFrame,

    #[error("response does not fit the receive buffer")]
    BufferOverflow,

    #[error("field is off")]
    FieldOff,

    #[error("communication error")]
    Communication,
}

impl NfcError {
    /// Every radio outcome, for exhaustive tests over the error space.
    pub const ALL: [NfcError; 6] = [
        NfcError::Timeout,
        NfcError::Collision,
        NfcError::IncompleteFrame,
        NfcError::BufferOverflow,
        NfcError::FieldOff,
        NfcError::Communication,
    ];
}
