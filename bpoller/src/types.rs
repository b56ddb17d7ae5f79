// bpoller/src/types.rs

use crate::Error;
use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Protocol identifier carried in every generic event.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    #[display(fmt = "ISO14443-4B")]
    Iso14443_4b,
    #[display(fmt = "ST25TB")]
    St25tb,
}

/// Command returned by a poller callback to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Continue,
    Stop,
}

/// Event fed into a poller by the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfcEvent {
    FieldOn,
    FieldOff,
    /// The field is up and the poller may run its next step.
    PollerReady,
}

/// PUPI - Newtype Pattern (4 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pupi([u8; 4]);

impl Pupi {
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Pupi {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// ST25TB UID, stored most significant byte first (0xD0 0x02 ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct St25tbUid([u8; 8]);

impl St25tbUid {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Build from the wire order, which is least significant byte first.
    pub fn from_wire(bytes: [u8; 8]) -> Self {
        let mut arr = bytes;
        arr.reverse();
        Self(arr)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// 6-bit product code identifying the ST25TB variant.
    pub fn product_code(&self) -> u8 {
        self.0[2] >> 2
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for St25tbUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}
