// bpoller/src/protocol/ats.rs

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const T0_TA_PRESENT: u8 = 0x10;
const T0_TB_PRESENT: u8 = 0x20;
const T0_TC_PRESENT: u8 = 0x40;
const T0_FSCI_MASK: u8 = 0x0F;

/// FWI used when the card omits TB(1).
const DEFAULT_FWI: u8 = 4;

/// Frame size for the card indexed by FSCI. Values above 8 are RFU and
/// are read as 256.
const FSC_TABLE: [usize; 9] = [16, 24, 32, 40, 48, 64, 96, 128, 256];

/// Answer To Select as returned by the card after a RATS request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ats {
    pub tl: u8,
    pub t0: u8,
    pub ta_1: Option<u8>,
    pub tb_1: Option<u8>,
    pub tc_1: Option<u8>,
    pub historical_bytes: Vec<u8>,
}

impl Ats {
    /// Parse an ATS (CRC already stripped).
    ///
    /// A lone TL byte of 1 is a valid ATS with no format byte.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let tl = *bytes.first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        if tl as usize != bytes.len() {
            return Err(Error::InvalidLength {
                expected: tl as usize,
                actual: bytes.len(),
            });
        }
        if tl == 1 {
            return Ok(Self {
                tl,
                ..Self::default()
            });
        }

        let t0 = bytes[1];
        let mut rest = &bytes[2..];
        let mut take = |present: bool| -> Result<Option<u8>> {
            if !present {
                return Ok(None);
            }
            let (&b, tail) = rest.split_first().ok_or(Error::InvalidLength {
                expected: tl as usize + 1,
                actual: bytes.len(),
            })?;
            rest = tail;
            Ok(Some(b))
        };
        let ta_1 = take(t0 & T0_TA_PRESENT != 0)?;
        let tb_1 = take(t0 & T0_TB_PRESENT != 0)?;
        let tc_1 = take(t0 & T0_TC_PRESENT != 0)?;

        Ok(Self {
            tl,
            t0,
            ta_1,
            tb_1,
            tc_1,
            historical_bytes: rest.to_vec(),
        })
    }

    pub fn historical_bytes(&self) -> &[u8] {
        &self.historical_bytes
    }

    /// Maximum frame size the card accepts, in bytes.
    pub fn fsc(&self) -> usize {
        let fsci = if self.tl > 1 { self.t0 & T0_FSCI_MASK } else { 2 };
        FSC_TABLE[(fsci as usize).min(FSC_TABLE.len() - 1)]
    }

    /// Frame waiting integer from TB(1).
    pub fn fwi(&self) -> u8 {
        match self.tb_1.map(|tb| tb >> 4) {
            Some(fwi) if fwi <= 14 => fwi,
            _ => DEFAULT_FWI,
        }
    }

    /// Frame wait time for block exchanges, in carrier cycles.
    pub fn fwt_fc(&self) -> u32 {
        (256 * 16) << self.fwi()
    }
}
