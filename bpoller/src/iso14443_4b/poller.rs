// bpoller/src/iso14443_4b/poller.rs

use log::{debug, trace, warn};

use super::config;
use super::{
    Iso14443_4bData, Iso14443_4bError, Iso14443_4bPollerEvent, Iso14443_4bPollerState,
    Iso14443_4bSessionState, ProtocolState,
};
use crate::buffer::FrameBuffer;
use crate::iso14443_3b::Iso14443_3bTransceiver;
use crate::poller::{notify, CallbackSlot, GenericEvent, Poller, PollerCallback};
use crate::protocol::block::{i_block_pcb, parse_i_block_pcb};
use crate::protocol::Ats;
use crate::types::{Command, NfcEvent, Protocol};
use crate::utils::bytes_to_hex_spaced;

/// ISO 14443-4B poller layered over an ISO 14443-3B transceiver.
///
/// The lower layer must already have selected the card (see `detect`).
/// The owning layer opens a session with `request_ats` (or `read_ats`) and
/// then exchanges blocks from its callback while the poller is `Ready`.
pub struct Iso14443_4bPoller<L> {
    lower: L,
    poller_state: Iso14443_4bPollerState,
    session_state: Iso14443_4bSessionState,
    protocol_state: ProtocolState,
    error: Option<Iso14443_4bError>,
    data: Option<Iso14443_4bData>,
    tx_buffer: FrameBuffer,
    rx_buffer: FrameBuffer,
    callback: Option<PollerCallback<Iso14443_4bPoller<L>, Iso14443_4bPollerEvent>>,
}

impl<L: Iso14443_3bTransceiver> Iso14443_4bPoller<L> {
    pub fn new(lower: L) -> Self {
        Self {
            lower,
            poller_state: Iso14443_4bPollerState::Idle,
            session_state: Iso14443_4bSessionState::Idle,
            protocol_state: ProtocolState::default(),
            error: None,
            data: None,
            tx_buffer: FrameBuffer::new(config::BUFFER_SIZE),
            rx_buffer: FrameBuffer::new(config::BUFFER_SIZE),
            callback: None,
        }
    }

    pub fn lower(&self) -> &L {
        &self.lower
    }

    pub fn lower_mut(&mut self) -> &mut L {
        &mut self.lower
    }

    pub fn into_inner(self) -> L {
        self.lower
    }

    pub fn poller_state(&self) -> Iso14443_4bPollerState {
        self.poller_state
    }

    pub fn session_state(&self) -> Iso14443_4bSessionState {
        self.session_state
    }

    /// Block number the next I-block will carry.
    pub fn block_number(&self) -> u8 {
        self.protocol_state.block_number
    }

    pub fn last_error(&self) -> Option<Iso14443_4bError> {
        self.error
    }

    /// Ask for the ATS on the next tick. Only valid from `Idle`.
    pub fn request_ats(&mut self) -> Result<(), Iso14443_4bError> {
        if self.poller_state != Iso14443_4bPollerState::Idle {
            warn!("4b: ATS requested in state {:?}", self.poller_state);
            return Err(Iso14443_4bError::Protocol);
        }
        self.poller_state = Iso14443_4bPollerState::ReadAts;
        Ok(())
    }

    /// Request and parse the ATS, opening a session.
    ///
    /// Overwrites the result data on success. No retry is attempted; on
    /// failure the poller enters `Error`.
    pub fn read_ats(&mut self) -> Result<Ats, Iso14443_4bError> {
        let state_ok = matches!(
            self.poller_state,
            Iso14443_4bPollerState::Idle | Iso14443_4bPollerState::ReadAts
        );
        if !state_ok || self.session_state != Iso14443_4bSessionState::Idle {
            warn!(
                "4b: read_ats in state {:?}/{:?}",
                self.poller_state, self.session_state
            );
            return Err(Iso14443_4bError::Protocol);
        }

        self.tx_buffer
            .set(config::RATS)
            .map_err(|_| Iso14443_4bError::Protocol)?;
        if let Err(err) =
            self.lower
                .send_frame(&self.tx_buffer, &mut self.rx_buffer, config::ATS_FWT_FC)
        {
            return Err(self.fail(err.into()));
        }

        let ats = match Ats::parse(self.rx_buffer.as_slice()) {
            Ok(ats) => ats,
            Err(err) => {
                debug!("4b: malformed ATS: {}", err);
                return Err(self.fail(Iso14443_4bError::Framing));
            }
        };
        debug!(
            "4b: ATS received, historical bytes {}",
            bytes_to_hex_spaced(ats.historical_bytes())
        );

        self.data = Some(Iso14443_4bData {
            iso14443_3b: self.lower.data().cloned(),
            ats: ats.clone(),
        });
        self.session_state = Iso14443_4bSessionState::Active;
        self.protocol_state = ProtocolState::default();
        self.poller_state = Iso14443_4bPollerState::Ready;
        self.error = None;
        Ok(ats)
    }

    /// Exchange one I-block.
    ///
    /// `tx` is sent behind a PCB carrying the current block number. The
    /// response must be a plain I-block carrying the toggled block number;
    /// its payload overwrites `rx`. The block number toggles only when the
    /// whole exchange succeeds. Outside an active session the call fails
    /// without touching the transceiver.
    pub fn send_block(
        &mut self,
        tx: &[u8],
        rx: &mut FrameBuffer,
        fwt_fc: u32,
    ) -> Result<(), Iso14443_4bError> {
        if self.session_state != Iso14443_4bSessionState::Active {
            debug!("4b: send_block without active session ({:?})", self.session_state);
            return Err(Iso14443_4bError::Protocol);
        }

        let block_number = self.protocol_state.block_number;
        self.tx_buffer.reset();
        self.tx_buffer
            .append_byte(i_block_pcb(block_number))
            .and_then(|_| self.tx_buffer.append(tx))
            .map_err(|_| Iso14443_4bError::Protocol)?;

        if let Err(err) = self
            .lower
            .send_frame(&self.tx_buffer, &mut self.rx_buffer, fwt_fc)
        {
            return Err(self.fail(err.into()));
        }

        let expected = block_number ^ 1;
        match self.rx_buffer.first().and_then(parse_i_block_pcb) {
            Some(received) if received == expected => {}
            _ => {
                debug!(
                    "4b: unexpected prologue in {}, expected block {}",
                    bytes_to_hex_spaced(self.rx_buffer.as_slice()),
                    expected
                );
                return Err(self.fail(Iso14443_4bError::Framing));
            }
        }

        if rx.set(&self.rx_buffer.as_slice()[1..]).is_err() {
            return Err(self.fail(Iso14443_4bError::Protocol));
        }
        self.protocol_state.block_number = expected;
        trace!("4b: block exchanged, next block number {}", expected);
        Ok(())
    }

    /// Halt the card. The session is closed whatever the outcome.
    pub fn halt(&mut self) -> Result<(), Iso14443_4bError> {
        let result = self.lower.halt().map_err(Iso14443_4bError::from);
        self.session_state = Iso14443_4bSessionState::Idle;
        self.poller_state = Iso14443_4bPollerState::Idle;
        self.protocol_state = ProtocolState::default();
        debug!("4b: halted ({:?})", result);
        result
    }

    /// Leave `Error` and return to `Idle`. Result data is kept.
    pub fn reset(&mut self) {
        self.poller_state = Iso14443_4bPollerState::Idle;
        self.session_state = Iso14443_4bSessionState::Idle;
        self.protocol_state = ProtocolState::default();
        self.error = None;
    }

    fn fail(&mut self, err: Iso14443_4bError) -> Iso14443_4bError {
        debug!("4b: {:?} -> Error ({})", self.poller_state, err);
        self.poller_state = Iso14443_4bPollerState::Error;
        self.session_state = Iso14443_4bSessionState::Idle;
        self.error = Some(err);
        err
    }
}

impl<L: Iso14443_3bTransceiver> Poller for Iso14443_4bPoller<L> {
    type Event = Iso14443_4bPollerEvent;
    type Data = Iso14443_4bData;

    const PROTOCOL: Protocol = Protocol::Iso14443_4b;

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

        match self.poller_state {
            Iso14443_4bPollerState::Idle => Command::Continue,
            Iso14443_4bPollerState::ReadAts => {
                let event = match self.read_ats() {
                    Ok(_) => Iso14443_4bPollerEvent::Ready,
                    Err(err) => Iso14443_4bPollerEvent::Error(err),
                };
                notify(self, event)
            }
            Iso14443_4bPollerState::Error => {
                let err = self.error.unwrap_or(Iso14443_4bError::Protocol);
                notify(self, Iso14443_4bPollerEvent::Error(err))
            }
            Iso14443_4bPollerState::Ready => {
                let command = notify(self, Iso14443_4bPollerEvent::Ready);
                if command == Command::Stop
                    && self.session_state == Iso14443_4bSessionState::Active
                {
                    debug!("4b: stop requested");
                    self.session_state = Iso14443_4bSessionState::StopRequested;
                }
                command
            }
        }
    }

    fn detect(&mut self, event: NfcEvent) -> bool {
        if event != NfcEvent::PollerReady {
            return false;
        }
        if self.poller_state != Iso14443_4bPollerState::Idle {
            warn!("4b: detect in state {:?}", self.poller_state);
            return false;
        }
        match self.lower.select(None) {
            Ok(()) => self
                .lower
                .data()
                .is_some_and(|data| data.supports_iso14443_4()),
            Err(err) => {
                trace!("4b: detect failed: {}", err);
                false
            }
        }
    }

    fn data(&self) -> Option<&Iso14443_4bData> {
        self.data.as_ref()
    }
}

impl<L: Iso14443_3bTransceiver> CallbackSlot for Iso14443_4bPoller<L> {
    fn callback_slot(&mut self) -> &mut Option<PollerCallback<Self, Self::Event>> {
        &mut self.callback
    }
}
