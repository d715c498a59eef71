//! Pool usage statistics

/// Timer pool statistics for debugging and monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of slots in the pool
    pub total_slots: usize,
    /// Number of free slots currently available
    pub free_slots: usize,
    /// Number of slots currently holding a timer
    pub used_slots: usize,
    /// Minimum number of free slots ever reached
    pub min_free_slots: usize,
    /// Expirations seen by `tick` (wraps)
    pub expirations: u32,
    /// Callbacks that returned an error (wraps)
    pub callback_faults: u32,
}

impl PoolStats {
    /// Create new pool statistics
    pub const fn new(total_slots: usize) -> Self {
        Self {
            total_slots,
            free_slots: total_slots,
            used_slots: 0,
            min_free_slots: total_slots,
            expirations: 0,
            callback_faults: 0,
        }
    }

    /// A slot was handed to `create`
    pub(crate) fn on_alloc(&mut self) {
        self.used_slots += 1;
        self.free_slots -= 1;
        if self.free_slots < self.min_free_slots {
            self.min_free_slots = self.free_slots;
        }
    }

    /// A slot was released by `destroy`
    pub(crate) fn on_dealloc(&mut self) {
        if self.used_slots > 0 {
            self.used_slots -= 1;
            self.free_slots += 1;
        }
    }

    pub(crate) fn on_expire(&mut self) {
        self.expirations = self.expirations.wrapping_add(1);
    }

    pub(crate) fn on_fault(&mut self) {
        self.callback_faults = self.callback_faults.wrapping_add(1);
    }

    /// Check if every slot is in use
    pub const fn is_full(&self) -> bool {
        self.free_slots == 0
    }

    /// Check if no timer is allocated
    pub const fn is_empty(&self) -> bool {
        self.used_slots == 0
    }

    /// Share of slots holding a timer, in percent
    pub fn utilization(&self) -> u8 {
        if self.total_slots == 0 {
            0
        } else {
            ((self.used_slots * 100) / self.total_slots) as u8
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PoolStats {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PoolStats{{ total: {}, free: {}, used: {}, min_free: {}, expired: {}, faults: {} }}",
            self.total_slots,
            self.free_slots,
            self.used_slots,
            self.min_free_slots,
            self.expirations,
            self.callback_faults
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_stats() {
        let mut stats = PoolStats::new(4);

        assert_eq!(stats.total_slots, 4);
        assert_eq!(stats.free_slots, 4);
        assert!(stats.is_empty());
        assert!(!stats.is_full());

        stats.on_alloc();
        stats.on_alloc();
        assert_eq!(stats.used_slots, 2);
        assert_eq!(stats.min_free_slots, 2);
        assert_eq!(stats.utilization(), 50);

        stats.on_dealloc();
        assert_eq!(stats.free_slots, 3);
        assert_eq!(stats.min_free_slots, 2);
    }

    #[test]
    fn test_dealloc_on_empty_is_ignored() {
        let mut stats = PoolStats::new(2);
        stats.on_dealloc();
        assert_eq!(stats.free_slots, 2);
        assert_eq!(stats.used_slots, 0);
    }

    #[test]
    fn test_counters_wrap() {
        let mut stats = PoolStats::new(1);
        stats.expirations = u32::MAX;
        stats.on_expire();
        assert_eq!(stats.expirations, 0);
        stats.on_fault();
        assert_eq!(stats.callback_faults, 1);
    }

    #[test]
    fn test_zero_capacity_utilization() {
        assert_eq!(PoolStats::new(0).utilization(), 0);
        assert!(PoolStats::new(0).is_full());
    }
}
