//! Utilities for bpoller: small, reusable helpers used across the crate.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
