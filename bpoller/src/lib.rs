// bpoller/src/lib.rs

//! bpoller
//!
//! Polling-side protocol state machines for ISO 14443-4B cards and ST25TB
//! memory tags, driven one step at a time by an external dispatch loop.

pub mod buffer;
pub mod error;
pub mod iso14443_3b;
pub mod iso14443_4b;
pub mod poller;
pub mod prelude;
pub mod protocol;
pub mod st25tb;
pub mod test_support;
pub mod transceiver;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available everywhere.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
