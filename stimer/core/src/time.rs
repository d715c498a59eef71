//! Tick period arithmetic and time unit helpers

use core::fmt;

/// Largest supported tick period in microseconds
pub const MAX_TICK_PERIOD_US: u32 = 1000;

/// Tick period used when none is configured (1 ms)
pub const DEFAULT_TICK_US: u32 = 1000;

/// Compile-time validated tick period of `US` microseconds
///
/// Any use of a period outside `(0, MAX_TICK_PERIOD_US]` fails the build.
///
/// ```
/// use stimer_core::TickPeriod;
///
/// assert_eq!(TickPeriod::<1000>::ticks_for_ms(10), 10);
/// assert_eq!(TickPeriod::<1>::micros(), 1);
/// ```
///
/// A zero period is rejected:
///
/// ```compile_fail
/// use stimer_core::TickPeriod;
///
/// let _ = TickPeriod::<0>::ticks_for_ms(10);
/// ```
///
/// So is anything above one millisecond:
///
/// ```compile_fail
/// use stimer_core::TickPeriod;
///
/// let _ = TickPeriod::<1001>::rate_hz();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickPeriod<const US: u32>;

impl<const US: u32> TickPeriod<US> {
    /// Evaluating this constant rejects out of range periods at build time
    pub const VALID: () = assert!(
        US > 0 && US <= MAX_TICK_PERIOD_US,
        "tick period must be between 1 and 1000 microseconds"
    );

    /// Period in microseconds
    pub const fn micros() -> u32 {
        let () = Self::VALID;
        US
    }

    /// Number of ticks in `ms` milliseconds
    ///
    /// Truncates, and saturates at `u32::MAX` for very long durations.
    pub const fn ticks_for_ms(ms: u32) -> u32 {
        let () = Self::VALID;
        let ticks = (ms as u64 * 1000) / US as u64;
        if ticks > u32::MAX as u64 {
            u32::MAX
        } else {
            ticks as u32
        }
    }

    /// Ticks issued per second
    pub const fn rate_hz() -> u32 {
        let () = Self::VALID;
        1_000_000 / US
    }
}

/// Remaining ticks until a timer expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TickCounter(pub u32);

impl TickCounter {
    /// Zero ticks
    pub const ZERO: Self = Self(0);

    /// Create a new counter
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick count
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Check if the counter is zero
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Count one tick down and report whether the counter is now zero
    ///
    /// A counter already at zero stays there and still reports expiry.
    pub fn tick(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

impl fmt::Display for TickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ticks", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickCounter {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ticks", self.0);
    }
}

/// Seconds to milliseconds, saturating
pub const fn secs_to_ms(secs: u32) -> u32 {
    secs.saturating_mul(1000)
}

/// Minutes to milliseconds, saturating
pub const fn mins_to_ms(mins: u32) -> u32 {
    mins.saturating_mul(60_000)
}

/// Hours to milliseconds, saturating
pub const fn hours_to_ms(hours: u32) -> u32 {
    hours.saturating_mul(3_600_000)
}

/// Macro to write timer durations in milliseconds with a unit suffix
#[macro_export]
macro_rules! millis {
    ($value:literal ms) => {
        ($value as u32)
    };
    ($value:literal s) => {
        $crate::secs_to_ms($value)
    };
    ($value:literal min) => {
        $crate::mins_to_ms($value)
    };
    ($value:literal h) => {
        $crate::hours_to_ms($value)
    };
}
