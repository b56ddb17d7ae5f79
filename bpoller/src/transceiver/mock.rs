// bpoller/src/transceiver/mock.rs

use crate::buffer::FrameBuffer;
use crate::error::NfcError;
use crate::protocol::crc::with_crc_b;
use crate::transceiver::traits::{Timing, Transceiver};

/// Mock radio for unit tests. It records transmitted frames and returns
/// queued responses; an empty queue behaves like a silent field (timeout).
#[derive(Debug, Default)]
pub struct MockTransceiver {
    pub sent: Vec<Vec<u8>>,
    pub responses: Vec<Result<Vec<u8>, NfcError>>,
    /// FWT passed with each transceive call, in order
    pub fwts: Vec<u32>,
    pub guard_time_us: Option<u32>,
    pub fdt_poll_fc: Option<u32>,
    pub fdt_poll_poll_us: Option<u32>,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(Ok(resp));
    }

    /// Queue a response with a valid CRC_B trailer appended.
    pub fn push_response_with_crc(&mut self, payload: &[u8]) {
        self.responses.push(Ok(with_crc_b(payload)));
    }

    pub fn push_error(&mut self, err: NfcError) {
        self.responses.push(Err(err));
    }

    /// Timing configured through the setters, once all three are set.
    pub fn timing(&self) -> Option<Timing> {
        Some(Timing {
            guard_time_us: self.guard_time_us?,
            fdt_poll_fc: self.fdt_poll_fc?,
            fdt_poll_poll_us: self.fdt_poll_poll_us?,
        })
    }
}

impl Transceiver for MockTransceiver {
    fn set_guard_time_us(&mut self, guard_time_us: u32) {
        self.guard_time_us = Some(guard_time_us);
    }

    fn set_fdt_poll_fc(&mut self, fdt_poll_fc: u32) {
        self.fdt_poll_fc = Some(fdt_poll_fc);
    }

    fn set_fdt_poll_poll_us(&mut self, fdt_poll_poll_us: u32) {
        self.fdt_poll_poll_us = Some(fdt_poll_poll_us);
    }

    fn transceive(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), NfcError> {
        self.sent.push(tx.to_vec());
        self.fwts.push(fwt_fc);
        rx.reset();

        if self.responses.is_empty() {
            return Err(NfcError::Timeout);
        }
        let resp = self.responses.remove(0)?;
        rx.set(&resp).map_err(|_| NfcError::BufferOverflow)
    }
}
