// bpoller/src/iso14443_3b/poller.rs

use log::{debug, trace};

use super::config;
use super::{Iso14443_3bData, Iso14443_3bError, Iso14443_3bTransceiver};
use crate::buffer::FrameBuffer;
use crate::protocol::crc;
use crate::transceiver::Transceiver;
use crate::types::Pupi;
use crate::utils::bytes_to_hex_spaced;

/// ISO 14443-3B poller over a radio `Transceiver`.
pub struct Iso14443_3bPoller<T> {
    transceiver: T,
    tx_buffer: FrameBuffer,
    rx_buffer: FrameBuffer,
    data: Option<Iso14443_3bData>,
}

impl<T: Transceiver> Iso14443_3bPoller<T> {
    pub fn new(mut transceiver: T) -> Self {
        config::TIMING.apply(&mut transceiver);
        Self {
            transceiver,
            tx_buffer: FrameBuffer::new(config::MAX_BUFFER_SIZE),
            rx_buffer: FrameBuffer::new(config::MAX_BUFFER_SIZE),
            data: None,
        }
    }

    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }

    pub fn into_inner(self) -> T {
        self.transceiver
    }

    /// Send a command built from `parts` and leave the CRC-checked response
    /// in the internal receive buffer.
    fn exchange(&mut self, parts: &[&[u8]], fwt_fc: u32) -> Result<(), Iso14443_3bError> {
        self.tx_buffer.reset();
        for part in parts {
            self.tx_buffer
                .append(part)
                .map_err(|_| Iso14443_3bError::BufferOverflow)?;
        }
        self.transceive_crc(fwt_fc)
    }

    /// Append CRC_B to the transmit buffer, exchange it and check/strip the
    /// CRC of the response left in the receive buffer.
    fn transceive_crc(&mut self, fwt_fc: u32) -> Result<(), Iso14443_3bError> {
        crc::append_crc_b(&mut self.tx_buffer).map_err(|_| Iso14443_3bError::BufferOverflow)?;
        trace!("3b tx: {}", bytes_to_hex_spaced(self.tx_buffer.as_slice()));

        self.transceiver
            .transceive(&self.tx_buffer, &mut self.rx_buffer, fwt_fc)?;
        trace!("3b rx: {}", bytes_to_hex_spaced(self.rx_buffer.as_slice()));

        if !crc::trim_crc_b(&mut self.rx_buffer) {
            return Err(Iso14443_3bError::WrongCrc);
        }
        Ok(())
    }
}

impl<T: Transceiver> Iso14443_3bTransceiver for Iso14443_3bPoller<T> {
    fn select(&mut self, target: Option<Pupi>) -> Result<(), Iso14443_3bError> {
        self.data = None;

        self.exchange(&[config::WUPB], config::FDT_ACTIVATION_FC)?;
        let data = Iso14443_3bData::from_atqb(self.rx_buffer.as_slice())
            .ok_or(Iso14443_3bError::Communication)?;
        if let Some(pupi) = target {
            if pupi != data.pupi {
                debug!("3b: PUPI {} answered, expected {}", data.pupi.to_hex(), pupi.to_hex());
                return Err(Iso14443_3bError::ColResFailed);
            }
        }

        let pupi = *data.pupi.as_bytes();
        self.exchange(
            &[&[config::CMD_ATTRIB], &pupi, &config::ATTRIB_PARAMS],
            config::FDT_ACTIVATION_FC,
        )?;
        if self.rx_buffer.is_empty() {
            return Err(Iso14443_3bError::Communication);
        }

        debug!("3b: selected PUPI {}", data.pupi.to_hex());
        self.data = Some(data);
        Ok(())
    }

    fn send_frame(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), Iso14443_3bError> {
        self.tx_buffer
            .set(tx.as_slice())
            .map_err(|_| Iso14443_3bError::BufferOverflow)?;
        self.transceive_crc(fwt_fc)?;
        rx.set(self.rx_buffer.as_slice())
            .map_err(|_| Iso14443_3bError::BufferOverflow)
    }

    fn halt(&mut self) -> Result<(), Iso14443_3bError> {
        let pupi = match self.data.take() {
            Some(data) => *data.pupi.as_bytes(),
            None => return Err(Iso14443_3bError::NotPresent),
        };
        self.exchange(&[&[config::CMD_HLTB], &pupi], config::FDT_ACTIVATION_FC)?;
        if self.rx_buffer.as_slice() != [0x00] {
            return Err(Iso14443_3bError::Communication);
        }
        Ok(())
    }

    fn data(&self) -> Option<&Iso14443_3bData> {
        self.data.as_ref()
    }
}
