//! Expiry callbacks and their arguments

use core::fmt;

use crate::pool::Slot;
use crate::{TimerHandle, TimerMode, TimerState};

/// Function invoked from [`TimerPool::tick`](crate::TimerPool::tick) when a
/// timer expires
///
/// The callback runs synchronously inside `tick`, so it must be short and
/// must not block. It gets exclusive access to the expiring timer through
/// [`Expiry`]; other timers are out of reach until `tick` returns.
pub type Callback<A> = fn(&mut Expiry<'_, A>) -> Result<(), CallbackError>;

/// Failure reported by a callback
///
/// The code is opaque to the pool and only travels to the fault log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackError(pub u16);

impl CallbackError {
    /// Application defined error code
    pub const fn code(self) -> u16 {
        self.0
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "callback failed with code {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CallbackError {}

#[cfg(feature = "defmt")]
impl defmt::Format for CallbackError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CallbackError({})", self.0);
    }
}

/// A callback failure captured during `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackFault {
    /// Timer whose callback failed
    pub handle: TimerHandle,
    /// What the callback returned
    pub error: CallbackError,
}

impl fmt::Display for CallbackFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.handle, self.error)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CallbackFault {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}: {}", self.handle, self.error);
    }
}

/// Value handed to a timer's callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument<A> {
    /// The timer's own handle (the default)
    Handle,
    /// A caller supplied value
    Custom(A),
}

impl<A> Default for Argument<A> {
    fn default() -> Self {
        Self::Handle
    }
}

/// `None` restores the default argument.
impl<A> From<Option<A>> for Argument<A> {
    fn from(value: Option<A>) -> Self {
        match value {
            Some(value) => Self::Custom(value),
            None => Self::Handle,
        }
    }
}

/// Argument as seen by a running callback
#[derive(Debug, PartialEq, Eq)]
pub enum ArgumentRef<'a, A> {
    /// No custom argument was set; carries the expiring timer's handle
    Handle(TimerHandle),
    /// The custom argument
    Custom(&'a A),
}

impl<A> Clone for ArgumentRef<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ArgumentRef<'_, A> {}

impl<'a, A> ArgumentRef<'a, A> {
    /// The custom argument, if one was set
    pub fn custom(self) -> Option<&'a A> {
        match self {
            Self::Custom(value) => Some(value),
            Self::Handle(_) => None,
        }
    }
}

/// A callback's view of the timer that just expired
///
/// Offers the same controls as the pool API, restricted to this timer.
/// Whatever the callback does, `tick` clears the pending overflow count
/// once the callback returns and then reloads the countdown from the
/// (possibly updated) configured time.
pub struct Expiry<'a, A> {
    handle: TimerHandle,
    slot: &'a mut Slot<A>,
    ticks_for_ms: fn(u32) -> u32,
}

impl<'a, A> Expiry<'a, A> {
    pub(crate) fn new(handle: TimerHandle, slot: &'a mut Slot<A>, ticks_for_ms: fn(u32) -> u32) -> Self {
        Self {
            handle,
            slot,
            ticks_for_ms,
        }
    }

    /// Handle of the expiring timer
    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    /// Mode the timer was created with
    pub fn mode(&self) -> TimerMode {
        self.slot.mode
    }

    /// Current run state; a one-shot timer is already `Stopped` here
    pub fn state(&self) -> TimerState {
        self.slot.state
    }

    /// The configured argument, with the default resolved to the handle
    pub fn argument(&self) -> ArgumentRef<'_, A> {
        match &self.slot.argument {
            Argument::Handle => ArgumentRef::Handle(self.handle),
            Argument::Custom(value) => ArgumentRef::Custom(value),
        }
    }

    /// Overflow count pending, without consuming it
    pub fn pending(&self) -> u8 {
        self.slot.overflows
    }

    /// Consume the pending overflow count, like
    /// [`TimerPool::overflow`](crate::TimerPool::overflow)
    pub fn overflow(&mut self) -> u8 {
        self.slot.take_overflow()
    }

    /// Keep (or resume) counting
    pub fn start(&mut self) {
        self.slot.state = TimerState::Running;
    }

    /// Stop counting after this expiry
    pub fn stop(&mut self) {
        self.slot.state = TimerState::Stopped;
    }

    /// Stop and clear the pending overflow count
    pub fn reset(&mut self) {
        self.slot.reset();
    }

    /// Change the period used from this expiry on
    pub fn set_time(&mut self, ms: u32) {
        let ticks = (self.ticks_for_ms)(ms);
        self.slot.set_time(ms, ticks);
    }

    /// Configured period in milliseconds
    pub fn time(&self) -> u32 {
        self.slot.time_ms
    }
}
