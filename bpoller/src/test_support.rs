//! Test support helpers intended for use by unit and integration tests.
//!
//! The radio-level double lives in `transceiver::mock`; this module holds
//! the scripted lower poller used to drive the ISO 14443-4B poller without
//! CRC framing, plus sample card data.

use crate::buffer::FrameBuffer;
use crate::iso14443_3b::{Iso14443_3bData, Iso14443_3bError, Iso14443_3bTransceiver};
use crate::types::Pupi;

/// Scripted ISO 14443-3B layer. `send_frame` returns queued payloads (no
/// CRC) or errors and records what was sent; an empty queue times out.
#[derive(Debug)]
pub struct ScriptedIso14443_3b {
    pub sent: Vec<Vec<u8>>,
    pub fwts: Vec<u32>,
    pub responses: Vec<Result<Vec<u8>, Iso14443_3bError>>,
    pub select_results: Vec<Result<Iso14443_3bData, Iso14443_3bError>>,
    pub selects: usize,
    pub halt_result: Result<(), Iso14443_3bError>,
    pub halts: usize,
    pub data: Option<Iso14443_3bData>,
}

impl Default for ScriptedIso14443_3b {
    fn default() -> Self {
        Self {
            sent: Vec::new(),
            fwts: Vec::new(),
            responses: Vec::new(),
            select_results: Vec::new(),
            selects: 0,
            halt_result: Ok(()),
            halts: 0,
            data: None,
        }
    }
}

impl ScriptedIso14443_3b {
    /// A lower layer whose card has already been selected.
    pub fn selected(data: Iso14443_3bData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(Ok(resp));
    }

    pub fn push_error(&mut self, err: Iso14443_3bError) {
        self.responses.push(Err(err));
    }

    pub fn push_select(&mut self, result: Result<Iso14443_3bData, Iso14443_3bError>) {
        self.select_results.push(result);
    }
}

impl Iso14443_3bTransceiver for ScriptedIso14443_3b {
    fn select(&mut self, target: Option<Pupi>) -> Result<(), Iso14443_3bError> {
        self.selects += 1;
        self.data = None;
        if self.select_results.is_empty() {
            return Err(Iso14443_3bError::Timeout);
        }
        let data = self.select_results.remove(0)?;
        if target.is_some_and(|pupi| pupi != data.pupi) {
            return Err(Iso14443_3bError::ColResFailed);
        }
        self.data = Some(data);
        Ok(())
    }

    fn send_frame(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), Iso14443_3bError> {
        self.sent.push(tx.to_vec());
        self.fwts.push(fwt_fc);
        rx.reset();
        if self.responses.is_empty() {
            return Err(Iso14443_3bError::Timeout);
        }
        let resp = self.responses.remove(0)?;
        rx.set(&resp).map_err(|_| Iso14443_3bError::BufferOverflow)
    }

    fn halt(&mut self) -> Result<(), Iso14443_3bError> {
        self.halts += 1;
        self.data = None;
        self.halt_result
    }

    fn data(&self) -> Option<&Iso14443_3bData> {
        self.data.as_ref()
    }
}

/// ATQB contents of an ISO 14443-4 capable Type B card.
pub fn sample_iso14443_3b_data() -> Iso14443_3bData {
    Iso14443_3bData {
        pupi: Pupi::from_bytes([0x01, 0x02, 0x03, 0x04]),
        app_data: [0x00, 0x00, 0x00, 0x00],
        protocol_info: [0x00, 0x81, 0x81],
    }
}
