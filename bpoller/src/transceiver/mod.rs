// bpoller/src/transceiver/mod.rs

pub mod mock;
pub mod traits;

pub use mock::MockTransceiver;
pub use traits::{Timing, Transceiver};
