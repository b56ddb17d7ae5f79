// bpoller/src/st25tb/poller.rs

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use super::config;
use super::{St25tbData, St25tbError, St25tbPollerEvent, St25tbPollerState, St25tbType};
use crate::buffer::FrameBuffer;
use crate::poller::{notify, CallbackSlot, GenericEvent, Poller, PollerCallback};
use crate::protocol::crc;
use crate::transceiver::Transceiver;
use crate::types::{Command, NfcEvent, Protocol, St25tbUid};
use crate::utils::{bytes_to_hex_spaced, StdDelay};

/// ST25TB poller driving `Idle -> Selected -> Read`.
///
/// Any step error sends the poller back to `Idle`; the error is reported
/// to the callback and followed by `config::ERROR_BACKOFF_MS` on `delay`.
pub struct St25tbPoller<T, D = StdDelay> {
    transceiver: T,
    delay: D,
    state: St25tbPollerState,
    chip_id: Option<u8>,
    error: Option<St25tbError>,
    data: Option<St25tbData>,
    tx_buffer: FrameBuffer,
    rx_buffer: FrameBuffer,
    callback: Option<PollerCallback<St25tbPoller<T, D>, St25tbPollerEvent>>,
}

impl<T: Transceiver> St25tbPoller<T> {
    pub fn new(transceiver: T) -> Self {
        Self::with_delay(transceiver, StdDelay)
    }
}

impl<T: Transceiver, D: DelayNs> St25tbPoller<T, D> {
    pub fn with_delay(mut transceiver: T, delay: D) -> Self {
        config::TIMING.apply(&mut transceiver);
        Self {
            transceiver,
            delay,
            state: St25tbPollerState::Idle,
            chip_id: None,
            error: None,
            data: None,
            tx_buffer: FrameBuffer::new(config::BUFFER_SIZE),
            rx_buffer: FrameBuffer::new(config::BUFFER_SIZE),
            callback: None,
        }
    }

    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn into_inner(self) -> T {
        self.transceiver
    }

    pub fn state(&self) -> St25tbPollerState {
        self.state
    }

    pub fn last_error(&self) -> Option<St25tbError> {
        self.error
    }

    /// Chip id of the currently selected card.
    pub fn chip_id(&self) -> Option<u8> {
        self.chip_id
    }

    /// Send INITIATE and return the chip id of the answering card.
    pub fn initiate(&mut self) -> Result<u8, St25tbError> {
        self.exchange(&[config::CMD_INITIATE], config::FWT_FC)?;
        self.expect_len(1)?;
        Ok(self.rx_buffer.as_slice()[0])
    }

    /// Select the card with `chip_id`, or the card answering INITIATE.
    pub fn select(&mut self, chip_id: Option<u8>) -> Result<u8, St25tbError> {
        self.chip_id = None;
        let chip_id = match chip_id {
            Some(id) => id,
            None => self.initiate()?,
        };
        self.exchange(&[&[config::CMD_SELECT, chip_id]], config::FWT_FC)?;
        if self.rx_buffer.as_slice() != [chip_id] {
            debug!(
                "st25tb: select {:#04x} answered {}",
                chip_id,
                bytes_to_hex_spaced(self.rx_buffer.as_slice())
            );
            return Err(St25tbError::CollisionOrSelect);
        }
        debug!("st25tb: selected chip {:#04x}", chip_id);
        self.chip_id = Some(chip_id);
        Ok(chip_id)
    }

    pub fn get_uid(&mut self) -> Result<St25tbUid, St25tbError> {
        self.exchange(&[&[config::CMD_GET_UID]], config::FWT_FC)?;
        self.expect_len(8)?;
        let mut wire = [0u8; 8];
        wire.copy_from_slice(self.rx_buffer.as_slice());
        Ok(St25tbUid::from_wire(wire))
    }

    pub fn read_block(&mut self, block: u8) -> Result<u32, St25tbError> {
        self.exchange(&[&[config::CMD_READ_BLOCK, block]], config::FWT_FC)?;
        self.expect_len(4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.rx_buffer.as_slice());
        Ok(u32::from_le_bytes(bytes))
    }

    /// Write a block and verify it by reading it back.
    ///
    /// The card never answers WRITE_BLOCK, so a timeout is the expected
    /// outcome of the write itself.
    pub fn write_block(&mut self, block: u8, value: u32) -> Result<(), St25tbError> {
        match self.exchange(
            &[&[config::CMD_WRITE_BLOCK, block], &value.to_le_bytes()],
            config::WRITE_FWT_FC,
        ) {
            Err(St25tbError::Timeout) => {}
            Ok(()) => return Err(St25tbError::Protocol),
            Err(err) => return Err(err),
        }
        let stored = self.read_block(block)?;
        if stored != value {
            debug!(
                "st25tb: block {} reads {:#010x} after writing {:#010x}",
                block, stored, value
            );
            return Err(St25tbError::Protocol);
        }
        Ok(())
    }

    /// Send COMPLETION, deactivating the selected card until the field is
    /// reset. The poller returns to `Idle`.
    pub fn completion(&mut self) -> Result<(), St25tbError> {
        let result = match self.exchange(&[&[config::CMD_COMPLETION]], config::FWT_FC) {
            Err(St25tbError::Timeout) => Ok(()),
            Ok(()) => Err(St25tbError::Protocol),
            Err(err) => Err(err),
        };
        self.chip_id = None;
        self.state = St25tbPollerState::Idle;
        result
    }

    /// Read the whole memory of the selected card.
    pub fn read(&mut self) -> Result<St25tbData, St25tbError> {
        let uid = self.get_uid()?;
        let card_type = St25tbType::from_uid(&uid).ok_or_else(|| {
            debug!("st25tb: unknown product code {:#04x}", uid.product_code());
            St25tbError::Protocol
        })?;
        debug!("st25tb: {} uid {}", card_type, uid.to_hex());

        let mut blocks = Vec::with_capacity(card_type.block_count());
        for block in 0..card_type.block_count() {
            blocks.push(self.read_block(block as u8)?);
        }
        let system_otp_block = self.read_block(config::SYSTEM_BLOCK)?;

        Ok(St25tbData {
            uid,
            card_type,
            blocks,
            system_otp_block,
        })
    }

    fn handle_idle(&mut self) -> Result<St25tbPollerState, St25tbError> {
        self.select(None)?;
        Ok(St25tbPollerState::Selected)
    }

    fn handle_selected(&mut self) -> Result<St25tbPollerState, St25tbError> {
        let data = self.read()?;
        self.data = Some(data);
        Ok(St25tbPollerState::Read)
    }

    /// Build a frame from `parts`, append CRC_B, exchange it and leave the
    /// checked payload in the receive buffer.
    fn exchange(&mut self, parts: &[&[u8]], fwt_fc: u32) -> Result<(), St25tbError> {
        self.tx_buffer.reset();
        for part in parts {
            self.tx_buffer
                .append(part)
                .map_err(|_| St25tbError::Protocol)?;
        }
        crc::append_crc_b(&mut self.tx_buffer).map_err(|_| St25tbError::Protocol)?;
        trace!("st25tb tx: {}", bytes_to_hex_spaced(self.tx_buffer.as_slice()));

        self.transceiver
            .transceive(&self.tx_buffer, &mut self.rx_buffer, fwt_fc)?;
        trace!("st25tb rx: {}", bytes_to_hex_spaced(self.rx_buffer.as_slice()));

        if !crc::trim_crc_b(&mut self.rx_buffer) {
            return Err(St25tbError::Crc);
        }
        Ok(())
    }

    fn expect_len(&self, len: usize) -> Result<(), St25tbError> {
        if self.rx_buffer.len() != len {
            debug!(
                "st25tb: expected {} bytes, got {}",
                len,
                self.rx_buffer.len()
            );
            return Err(St25tbError::Framing);
        }
        Ok(())
    }
}

impl<T: Transceiver, D: DelayNs> Poller for St25tbPoller<T, D> {
    type Event = St25tbPollerEvent;
    type Data = St25tbData;

    const PROTOCOL: Protocol = Protocol::St25tb;

    fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(GenericEvent<'_, Self, Self::Event>) -> Command + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    fn run(&mut self, event: NfcEvent) -> Command {
        if event != NfcEvent::PollerReady {
            return Command::Continue;
        }

        let (result, success_event) = match self.state {
            St25tbPollerState::Idle => (self.handle_idle(), St25tbPollerEvent::Ready),
            St25tbPollerState::Selected => {
                (self.handle_selected(), St25tbPollerEvent::ReadSuccessful)
            }
            St25tbPollerState::Read => (
                Ok(St25tbPollerState::Read),
                St25tbPollerEvent::ReadSuccessful,
            ),
        };

        match result {
            Ok(next) => {
                if next != self.state {
                    debug!("st25tb: {:?} -> {:?}", self.state, next);
                }
                self.state = next;
                self.error = None;
                notify(self, success_event)
            }
            Err(err) => {
                debug!("st25tb: {:?} failed ({}), back to Idle", self.state, err);
                self.state = St25tbPollerState::Idle;
                self.chip_id = None;
                self.error = Some(err);
                let command = notify(self, St25tbPollerEvent::Error(err));
                self.delay.delay_ms(config::ERROR_BACKOFF_MS);
                command
            }
        }
    }

    fn detect(&mut self, event: NfcEvent) -> bool {
        if event != NfcEvent::PollerReady {
            return false;
        }
        if self.state != St25tbPollerState::Idle {
            warn!("st25tb: detect in state {:?}", self.state);
            return false;
        }
        match self.initiate() {
            Ok(chip_id) => {
                trace!("st25tb: detected chip {:#04x}", chip_id);
                true
            }
            Err(err) => {
                trace!("st25tb: detect failed: {}", err);
                false
            }
        }
    }

    fn data(&self) -> Option<&St25tbData> {
        self.data.as_ref()
    }
}

impl<T: Transceiver, D: DelayNs> CallbackSlot for St25tbPoller<T, D> {
    fn callback_slot(&mut self) -> &mut Option<PollerCallback<Self, Self::Event>> {
        &mut self.callback
    }
}
