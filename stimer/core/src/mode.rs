//! Timer modes and slot run states

/// What a timer does after it expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Stops itself after the first expiry
    #[default]
    OneShot,
    /// Reloads and keeps counting indefinitely
    Loop,
}

impl TimerMode {
    /// Check if this is a one-shot timer
    pub const fn is_one_shot(&self) -> bool {
        matches!(self, Self::OneShot)
    }

    /// Check if this is a repeating timer
    pub const fn is_loop(&self) -> bool {
        matches!(self, Self::Loop)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerMode::OneShot => defmt::write!(fmt, "OneShot"),
            TimerMode::Loop => defmt::write!(fmt, "Loop"),
        }
    }
}

/// Run state of a pool slot
///
/// ```text
/// Free --create--> Stopped --start--> Running
///                  ^    |               |
///                  |    +----<--stop----+
///                  +------<--expiry (one-shot)
/// any --destroy--> Free
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Available for allocation
    #[default]
    Free,
    /// Allocated but not counting
    Stopped,
    /// Allocated and counting down on every tick
    Running,
}

impl TimerState {
    /// Check if the slot holds a timer
    pub const fn is_allocated(&self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Check if the slot is counting
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerState::Free => defmt::write!(fmt, "Free"),
            TimerState::Stopped => defmt::write!(fmt, "Stopped"),
            TimerState::Running => defmt::write!(fmt, "Running"),
        }
    }
}
