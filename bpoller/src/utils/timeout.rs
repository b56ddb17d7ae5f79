//! Delay providers for the pause that follows an error report.
//!
//! Pollers take any `embedded_hal::delay::DelayNs`; `StdDelay` sleeps the
//! current thread and `RecordingDelay` only records what was requested.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}

/// `DelayNs` that records requested pauses instead of sleeping.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    pub pauses: Vec<Duration>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.pauses.push(Duration::from_nanos(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        self.pauses.push(Duration::from_micros(us.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.pauses.push(Duration::from_millis(ms.into()));
    }
}
