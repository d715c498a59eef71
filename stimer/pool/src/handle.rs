//! Generational timer handles

use core::fmt;

/// Caller-held reference to an allocated timer
///
/// A handle names a slot and the generation of the timer living in it.
/// Destroying a timer bumps the slot generation, so handles kept past
/// `destroy` are rejected instead of reaching the slot's next tenant.
///
/// The generation is 32 bits wide: a stale handle could only match again
/// after 2^32 destroy/create cycles of the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    index: u16,
    generation: u32,
}

impl TimerHandle {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u16,
            generation,
        }
    }

    /// Slot position inside the pool
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this timer was created
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}.{}", self.index, self.generation)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerHandle {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "timer#{}.{}", self.index, self.generation);
    }
}
