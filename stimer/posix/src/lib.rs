//! Host port for stimer.
//!
//! On a microcontroller a hardware timer interrupt calls
//! [`SharedTimerPool::tick`](stimer_pool::SharedTimerPool::tick). On a
//! POSIX host this crate stands in for that interrupt with a dedicated
//! thread, and pulls in the `std` implementation of `critical-section`
//! so shared pools work across threads.

pub mod ticker;

pub use ticker::{Ticker, TickerError};
