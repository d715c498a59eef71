//! Timer pool shared between interrupt and thread context

use core::cell::RefCell;
use critical_section::Mutex;

use crate::{
    Argument, Callback, TimerHandle, TimerMode, TimerPool, TimerResult, DEFAULT_CAPACITY,
    DEFAULT_TICK_US,
};

/// A [`TimerPool`] guarded by a critical section
///
/// Meant to live in a `static` so the tick interrupt and the application
/// can both reach it. Each call enters a critical section for its whole
/// duration, so a `tick` never observes a half-applied configuration.
///
/// Callbacks run while the pool is borrowed and must act on their own
/// timer through [`Expiry`](crate::Expiry); calling back into the shared
/// pool from a callback panics.
///
/// ```
/// use stimer_pool::{SharedTimerPool, TimerMode};
///
/// static TIMERS: SharedTimerPool = SharedTimerPool::new();
///
/// let led = TIMERS.create(TimerMode::Loop, None).unwrap();
/// TIMERS.set_time(led, 500).unwrap();
/// TIMERS.start(led).unwrap();
///
/// // from the SysTick handler
/// TIMERS.tick();
/// ```
pub struct SharedTimerPool<A = (), const N: usize = DEFAULT_CAPACITY, const TICK_US: u32 = DEFAULT_TICK_US> {
    pool: Mutex<RefCell<TimerPool<A, N, TICK_US>>>,
}

impl<A, const N: usize, const TICK_US: u32> SharedTimerPool<A, N, TICK_US> {
    /// Create a shared pool with every slot free
    pub const fn new() -> Self {
        Self {
            pool: Mutex::new(RefCell::new(TimerPool::new())),
        }
    }

    /// Run `f` with exclusive access to the pool
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TimerPool<A, N, TICK_US>) -> R,
    {
        critical_section::with(|cs| {
            let mut pool = self.pool.borrow_ref_mut(cs);
            f(&mut pool)
        })
    }

    /// Advance every timer by one tick; call from the tick interrupt
    pub fn tick(&self) {
        self.with(|pool| pool.tick())
    }

    pub fn create(&self, mode: TimerMode, callback: Option<Callback<A>>) -> TimerResult<TimerHandle> {
        self.with(|pool| pool.create(mode, callback))
    }

    pub fn destroy(&self, handle: TimerHandle) -> TimerResult<()> {
        self.with(|pool| pool.destroy(handle))
    }

    pub fn set_time(&self, handle: TimerHandle, ms: u32) -> TimerResult<()> {
        self.with(|pool| pool.set_time(handle, ms))
    }

    pub fn start(&self, handle: TimerHandle) -> TimerResult<()> {
        self.with(|pool| pool.start(handle))
    }

    pub fn stop(&self, handle: TimerHandle) -> TimerResult<()> {
        self.with(|pool| pool.stop(handle))
    }

    pub fn reset(&self, handle: TimerHandle) -> TimerResult<()> {
        self.with(|pool| pool.reset(handle))
    }

    pub fn overflow(&self, handle: TimerHandle) -> TimerResult<u8> {
        self.with(|pool| pool.overflow(handle))
    }

    pub fn set_argument(&self, handle: TimerHandle, argument: Argument<A>) -> TimerResult<()> {
        self.with(|pool| pool.set_argument(handle, argument))
    }
}

impl<A, const N: usize, const TICK_US: u32> Default for SharedTimerPool<A, N, TICK_US> {
    fn default() -> Self {
        Self::new()
    }
}
