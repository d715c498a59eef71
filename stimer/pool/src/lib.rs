#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # stimer pool
//!
//! A fixed-capacity pool of software timers driven by a periodic tick.
//! Suitable for bare-metal targets: no heap, no OS, every operation runs in
//! bounded time so [`TimerPool::tick`] can be called from a timer interrupt.
//!
//! ```
//! use stimer_pool::{TimerMode, TimerPool};
//!
//! let mut pool: TimerPool = TimerPool::new();
//! let timer = pool.create(TimerMode::Loop, None).unwrap();
//! pool.set_time(timer, 10).unwrap();
//! pool.start(timer).unwrap();
//!
//! for _ in 0..10 {
//!     pool.tick();
//! }
//! assert_eq!(pool.overflow(timer), Ok(1));
//! ```
//!
//! ## Concurrency
//!
//! [`TimerPool`] has no internal locking. `tick` and the configuration
//! calls must not interleave on the same pool: either run both from one
//! execution context, or wrap the pool in [`SharedTimerPool`], which
//! serializes every access through a `critical-section`.

pub mod callback;
pub mod handle;
pub mod pool;
pub mod shared;
pub mod stats;

pub use stimer_core::*;
pub use callback::*;
pub use handle::*;
pub use pool::*;
pub use shared::*;
pub use stats::*;

/// Number of timers in a pool when no capacity is given
pub const DEFAULT_CAPACITY: usize = 10;

/// Number of callback faults retained until read with
/// [`TimerPool::take_fault`]
pub const FAULT_LOG_LEN: usize = 8;
