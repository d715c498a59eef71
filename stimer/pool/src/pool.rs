//! The timer pool and its tick engine

use heapless::Deque;
use log::{debug, trace, warn};

use crate::callback::{Argument, ArgumentRef, Callback, CallbackFault, Expiry};
use crate::{
    PoolStats, TickCounter, TickPeriod, TimerError, TimerHandle, TimerMode, TimerResult,
    TimerState, DEFAULT_CAPACITY, DEFAULT_TICK_US, FAULT_LOG_LEN,
};

/// One pool position
pub(crate) struct Slot<A> {
    /// Configured period in milliseconds
    pub(crate) time_ms: u32,
    /// `time_ms` converted to ticks, reloaded on every expiry
    pub(crate) period: u32,
    pub(crate) counter: TickCounter,
    pub(crate) state: TimerState,
    pub(crate) mode: TimerMode,
    pub(crate) overflows: u8,
    pub(crate) callback: Option<Callback<A>>,
    pub(crate) argument: Argument<A>,
    pub(crate) generation: u32,
}

impl<A> Slot<A> {
    pub(crate) const FREE: Self = Self {
        time_ms: 0,
        period: 0,
        counter: TickCounter::ZERO,
        state: TimerState::Free,
        mode: TimerMode::OneShot,
        overflows: 0,
        callback: None,
        argument: Argument::Handle,
        generation: 0,
    };

    fn holds(&self, handle: TimerHandle) -> bool {
        self.state.is_allocated() && self.generation == handle.generation()
    }

    /// Set up a fresh tenant. The period starts at zero so a timer started
    /// without `set_time` expires on its first tick.
    fn configure(&mut self, mode: TimerMode, callback: Option<Callback<A>>) {
        self.state = TimerState::Stopped;
        self.mode = mode;
        self.callback = callback;
        self.argument = Argument::Handle;
        self.overflows = 0;
        self.time_ms = 0;
        self.period = 0;
        self.counter = TickCounter::ZERO;
    }

    fn release(&mut self) {
        self.state = TimerState::Free;
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn set_time(&mut self, ms: u32, ticks: u32) {
        self.time_ms = ms;
        self.period = ticks;
        self.counter = TickCounter::new(ticks);
    }

    pub(crate) fn reload(&mut self) {
        self.counter = TickCounter::new(self.period);
    }

    pub(crate) fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.overflows = 0;
        self.reload();
    }

    /// Read and clear the overflow count. A one-shot timer that did expire
    /// is stopped and rearmed for a full period.
    pub(crate) fn take_overflow(&mut self) -> u8 {
        let overflows = core::mem::take(&mut self.overflows);
        if self.mode.is_one_shot() && overflows > 0 {
            self.state = TimerState::Stopped;
            self.reload();
        }
        overflows
    }

    /// Saturating increment; false once the count is pinned at `u8::MAX`
    fn record_overflow(&mut self) -> bool {
        match self.overflows.checked_add(1) {
            Some(overflows) => {
                self.overflows = overflows;
                true
            }
            None => false,
        }
    }
}

/// Fixed-capacity pool of software timers
///
/// `N` is the number of timers, `TICK_US` the interval in microseconds at
/// which [`tick`](Self::tick) is called, and `A` the type of custom
/// callback arguments. A `TICK_US` outside `1..=1000` is rejected at build
/// time.
///
/// Slots are handed out first in index order until every slot has been
/// used once, then by scanning for the lowest free slot.
///
/// ```compile_fail
/// use stimer_pool::TimerPool;
///
/// // zero tick period
/// let _pool = TimerPool::<(), 4, 0>::new();
/// ```
///
/// ```compile_fail
/// use stimer_pool::TimerPool;
///
/// // tick period above 1000 us
/// let _pool = TimerPool::<(), 4, 1001>::new();
/// ```
///
/// ```compile_fail
/// use stimer_pool::TimerPool;
///
/// // more slots than a handle can index
/// let _pool = TimerPool::<(), 65_536>::new();
/// ```
///
/// ```
/// use stimer_pool::TimerPool;
///
/// let pool = TimerPool::<(), 4, 1000>::new();
/// assert_eq!(pool.capacity(), 4);
/// ```
pub struct TimerPool<A = (), const N: usize = DEFAULT_CAPACITY, const TICK_US: u32 = DEFAULT_TICK_US> {
    slots: [Slot<A>; N],
    /// Slots below this index have been handed out at least once
    fresh: usize,
    faults: Deque<CallbackFault, FAULT_LOG_LEN>,
    stats: PoolStats,
}

impl<A, const N: usize, const TICK_US: u32> TimerPool<A, N, TICK_US> {
    const VALID: () = {
        assert!(N <= u16::MAX as usize, "timer pool capacity must fit in 16 bits");
        TickPeriod::<TICK_US>::VALID
    };

    /// Create a pool with every slot free
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self {
            slots: [const { Slot::<A>::FREE }; N],
            fresh: 0,
            faults: Deque::new(),
            stats: PoolStats::new(N),
        }
    }

    /// Ticks this pool counts for a period of `ms` milliseconds
    pub const fn ticks_for(ms: u32) -> u32 {
        TickPeriod::<TICK_US>::ticks_for_ms(ms)
    }

    /// Allocate a timer in the `Stopped` state
    ///
    /// The timer has a zero period until [`set_time`](Self::set_time) is
    /// called. Fails with [`TimerError::PoolExhausted`] when every slot is
    /// in use.
    pub fn create(&mut self, mode: TimerMode, callback: Option<Callback<A>>) -> TimerResult<TimerHandle> {
        let Some(index) = self.take() else {
            warn!("timer pool exhausted ({} slots in use)", N);
            return Err(TimerError::PoolExhausted);
        };

        let slot = &mut self.slots[index];
        slot.configure(mode, callback);
        let handle = TimerHandle::new(index, slot.generation);
        self.stats.on_alloc();

        debug!("created {} ({:?})", handle, mode);
        Ok(handle)
    }

    fn take(&mut self) -> Option<usize> {
        if self.fresh < N {
            let index = self.fresh;
            self.fresh += 1;
            return Some(index);
        }

        self.slots.iter().position(|slot| slot.state == TimerState::Free)
    }

    /// Release a timer; its handle becomes invalid
    pub fn destroy(&mut self, handle: TimerHandle) -> TimerResult<()> {
        self.slot_mut(handle)?.release();
        self.stats.on_dealloc();

        debug!("destroyed {}", handle);
        Ok(())
    }

    /// Set the period in milliseconds and restart the countdown from it
    ///
    /// A running timer keeps running with the new countdown.
    pub fn set_time(&mut self, handle: TimerHandle, ms: u32) -> TimerResult<()> {
        let ticks = Self::ticks_for(ms);
        self.slot_mut(handle)?.set_time(ms, ticks);
        Ok(())
    }

    /// Start (or resume) counting
    pub fn start(&mut self, handle: TimerHandle) -> TimerResult<()> {
        self.slot_mut(handle)?.state = TimerState::Running;
        Ok(())
    }

    /// Pause counting; the remaining countdown is kept
    pub fn stop(&mut self, handle: TimerHandle) -> TimerResult<()> {
        self.slot_mut(handle)?.state = TimerState::Stopped;
        Ok(())
    }

    /// Stop, discard pending overflows and rearm a full period
    pub fn reset(&mut self, handle: TimerHandle) -> TimerResult<()> {
        self.slot_mut(handle)?.reset();
        Ok(())
    }

    /// Read and clear the number of expirations since the last read
    ///
    /// A one-shot timer that expired is also stopped and rearmed, ready
    /// for the next [`start`](Self::start).
    pub fn overflow(&mut self, handle: TimerHandle) -> TimerResult<u8> {
        Ok(self.slot_mut(handle)?.take_overflow())
    }

    /// Non-blocking [`overflow`](Self::overflow): `WouldBlock` until the
    /// timer has expired
    pub fn poll_overflow(&mut self, handle: TimerHandle) -> nb::Result<u8, TimerError> {
        match self.overflow(handle)? {
            0 => Err(nb::Error::WouldBlock),
            overflows => Ok(overflows),
        }
    }

    /// Replace the value passed to the callback
    pub fn set_argument(&mut self, handle: TimerHandle, argument: Argument<A>) -> TimerResult<()> {
        self.slot_mut(handle)?.argument = argument;
        Ok(())
    }

    pub fn argument(&self, handle: TimerHandle) -> TimerResult<ArgumentRef<'_, A>> {
        Ok(match &self.slot(handle)?.argument {
            Argument::Handle => ArgumentRef::Handle(handle),
            Argument::Custom(value) => ArgumentRef::Custom(value),
        })
    }

    pub fn state(&self, handle: TimerHandle) -> TimerResult<TimerState> {
        Ok(self.slot(handle)?.state)
    }

    pub fn mode(&self, handle: TimerHandle) -> TimerResult<TimerMode> {
        Ok(self.slot(handle)?.mode)
    }

    pub fn is_running(&self, handle: TimerHandle) -> TimerResult<bool> {
        Ok(self.slot(handle)?.state.is_running())
    }

    /// Configured period in milliseconds
    pub fn time(&self, handle: TimerHandle) -> TimerResult<u32> {
        Ok(self.slot(handle)?.time_ms)
    }

    /// Ticks left before the next expiry
    pub fn remaining_ticks(&self, handle: TimerHandle) -> TimerResult<u32> {
        Ok(self.slot(handle)?.counter.ticks())
    }

    /// Advance time by one tick period
    ///
    /// Every running timer counts down; a timer reaching zero records an
    /// overflow (saturating at 255), runs its callback if it has one, and
    /// reloads its full period. One-shot timers with a callback are stopped
    /// before the callback runs, and the overflow count is cleared after it
    /// returns. A failing callback is logged to the fault log and does not
    /// affect the remaining timers.
    pub fn tick(&mut self) {
        let Self {
            slots,
            faults,
            stats,
            ..
        } = self;

        for (index, slot) in slots.iter_mut().enumerate() {
            if !slot.state.is_running() || !slot.counter.tick() {
                continue;
            }

            let handle = TimerHandle::new(index, slot.generation);
            if !slot.record_overflow() {
                trace!("{} overflow count saturated", handle);
            }
            stats.on_expire();
            trace!("{} expired", handle);

            if let Some(callback) = slot.callback {
                if slot.mode.is_one_shot() {
                    slot.state = TimerState::Stopped;
                }

                let mut expiry = Expiry::new(handle, slot, Self::ticks_for);
                if let Err(error) = callback(&mut expiry) {
                    warn!("{} callback failed: {}", handle, error);
                    stats.on_fault();
                    if faults.is_full() {
                        faults.pop_front();
                    }
                    let _ = faults.push_back(CallbackFault { handle, error });
                }
                slot.overflows = 0;
            }

            slot.reload();
        }
    }

    /// Oldest callback failure not yet read
    pub fn take_fault(&mut self) -> Option<CallbackFault> {
        self.faults.pop_front()
    }

    /// Callback failures waiting in the fault log
    pub fn fault_count(&self) -> usize {
        self.faults.len()
    }

    /// Number of timers currently allocated
    pub fn len(&self) -> usize {
        self.stats.used_slots
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stats.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots that have been handed out at least once
    pub fn high_water(&self) -> usize {
        self.fresh
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    fn slot(&self, handle: TimerHandle) -> TimerResult<&Slot<A>> {
        match self.slots.get(handle.index()) {
            Some(slot) if slot.holds(handle) => Ok(slot),
            _ => Err(rejected(handle)),
        }
    }

    fn slot_mut(&mut self, handle: TimerHandle) -> TimerResult<&mut Slot<A>> {
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.holds(handle) => Ok(slot),
            _ => Err(rejected(handle)),
        }
    }
}

impl<A, const N: usize, const TICK_US: u32> Default for TimerPool<A, N, TICK_US> {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(handle: TimerHandle) -> TimerError {
    warn!("rejected {}: no such live timer", handle);
    TimerError::InvalidHandle
}
