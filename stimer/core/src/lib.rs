#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # stimer core
//!
//! Shared vocabulary for the stimer software timer pool: the error type,
//! timer modes and run states, and tick-period arithmetic.
//! Everything here is `no_std` and allocation free so it can be used from
//! interrupt handlers on bare-metal targets.

use core::fmt;

pub mod mode;
pub mod time;

pub use mode::*;
pub use time::*;

#[cfg(test)]
mod tests;

/// stimer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout stimer
pub type TimerResult<T> = Result<T, TimerError>;

/// Error types for timer pool operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Every slot of the pool is allocated
    PoolExhausted,
    /// Handle does not refer to a live timer (never created, destroyed,
    /// or its slot has been recycled)
    InvalidHandle,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::PoolExhausted => write!(f, "Timer pool exhausted"),
            TimerError::InvalidHandle => write!(f, "Invalid or stale timer handle"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimerError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerError::PoolExhausted => defmt::write!(fmt, "PoolExhausted"),
            TimerError::InvalidHandle => defmt::write!(fmt, "InvalidHandle"),
        }
    }
}
