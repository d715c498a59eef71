use super::*;

#[test]
fn test_error_display() {
    assert_eq!(TimerError::PoolExhausted.to_string(), "Timer pool exhausted");
    assert_eq!(
        TimerError::InvalidHandle.to_string(),
        "Invalid or stale timer handle"
    );
}

#[test]
fn test_mode_predicates() {
    assert!(TimerMode::OneShot.is_one_shot());
    assert!(!TimerMode::OneShot.is_loop());
    assert!(TimerMode::Loop.is_loop());
    assert_eq!(TimerMode::default(), TimerMode::OneShot);
}

#[test]
fn test_state_predicates() {
    assert!(!TimerState::Free.is_allocated());
    assert!(TimerState::Stopped.is_allocated());
    assert!(!TimerState::Stopped.is_running());
    assert!(TimerState::Running.is_running());
    assert_eq!(TimerState::default(), TimerState::Free);
}

#[test]
fn test_counter_tick_saturates_at_zero() {
    let mut counter = TickCounter::new(2);
    assert!(!counter.tick());
    assert!(counter.tick());
    assert!(counter.is_zero());
    // a zero counter keeps reporting expiry
    assert!(counter.tick());
    assert_eq!(counter, TickCounter::ZERO);
}
