// bpoller/src/prelude.rs

pub use crate::buffer::FrameBuffer;
pub use crate::iso14443_3b::{
    Iso14443_3bData, Iso14443_3bError, Iso14443_3bPoller, Iso14443_3bTransceiver,
};
pub use crate::iso14443_4b::{
    Iso14443_4bData, Iso14443_4bError, Iso14443_4bPoller, Iso14443_4bPollerEvent,
    Iso14443_4bPollerState, Iso14443_4bSessionState,
};
pub use crate::poller::{run_until_stop, GenericEvent, Poller};
pub use crate::protocol::Ats;
pub use crate::st25tb::{
    St25tbData, St25tbError, St25tbPoller, St25tbPollerEvent, St25tbPollerState, St25tbType,
};
pub use crate::transceiver::{Timing, Transceiver};
pub use crate::{Command, Error, NfcError, NfcEvent, Protocol, Pupi, Result, St25tbUid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, RecordingDelay, StdDelay};
