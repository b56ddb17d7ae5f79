// bpoller/src/transceiver/traits.rs

use crate::buffer::FrameBuffer;
use crate::error::NfcError;

/// Transceiver abstracts the radio driver away from protocol logic.
///
/// Implementations block the calling thread for at most the frame wait time
/// of a single exchange.
pub trait Transceiver {
    /// Guard time before the first command after field on, in microseconds.
    fn set_guard_time_us(&mut self, guard_time_us: u32);

    /// Frame delay time between the end of a poller frame and the card's
    /// response, in carrier cycles.
    fn set_fdt_poll_fc(&mut self, fdt_poll_fc: u32);

    /// Minimum delay between two consecutive poller frames, in microseconds.
    fn set_fdt_poll_poll_us(&mut self, fdt_poll_poll_us: u32);

    /// Transmit `tx` and wait up to `fwt_fc` carrier cycles for a response.
    /// The response overwrites `rx`.
    fn transceive(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), NfcError>;
}

impl<T: Transceiver + ?Sized> Transceiver for Box<T> {
    fn set_guard_time_us(&mut self, guard_time_us: u32) {
        (**self).set_guard_time_us(guard_time_us)
    }

    fn set_fdt_poll_fc(&mut self, fdt_poll_fc: u32) {
        (**self).set_fdt_poll_fc(fdt_poll_fc)
    }

    fn set_fdt_poll_poll_us(&mut self, fdt_poll_poll_us: u32) {
        (**self).set_fdt_poll_poll_us(fdt_poll_poll_us)
    }

    fn transceive(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), NfcError> {
        (**self).transceive(tx, rx, fwt_fc)
    }
}

/// RF timing applied once when a poller is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub guard_time_us: u32,
    pub fdt_poll_fc: u32,
    pub fdt_poll_poll_us: u32,
}

impl Timing {
    pub fn apply<T: Transceiver + ?Sized>(&self, transceiver: &mut T) {
        transceiver.set_guard_time_us(self.guard_time_us);
        transceiver.set_fdt_poll_fc(self.fdt_poll_fc);
        transceiver.set_fdt_poll_poll_us(self.fdt_poll_poll_us);
    }
}
