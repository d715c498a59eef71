//! Expiry callback tests for stimer-pool

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use stimer_pool::{
    Argument, ArgumentRef, CallbackError, Expiry, TimerMode, TimerPool, TimerState,
};

#[test]
fn test_one_shot_callback_receives_own_handle() {
    static SEEN: Mutex<Vec<(String, TimerState, u8)>> = Mutex::new(Vec::new());

    fn on_expiry(expiry: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        let argument = match expiry.argument() {
            ArgumentRef::Handle(handle) => handle.to_string(),
            ArgumentRef::Custom(_) => "custom".to_string(),
        };
        SEEN.lock()
            .unwrap()
            .push((argument, expiry.state(), expiry.pending()));
        Ok(())
    }

    let mut pool: TimerPool = TimerPool::new();
    let timer = pool.create(TimerMode::OneShot, Some(on_expiry)).unwrap();
    pool.set_time(timer, 10).unwrap();
    pool.start(timer).unwrap();

    for _ in 0..10 {
        pool.tick();
    }

    let seen = SEEN.lock().unwrap().clone();
    assert_eq!(seen, vec![(timer.to_string(), TimerState::Stopped, 1)]);
    // consumed by the callback path
    assert_eq!(pool.overflow(timer), Ok(0));
    assert_eq!(pool.state(timer), Ok(TimerState::Stopped));

    for _ in 0..50 {
        pool.tick();
    }
    assert_eq!(SEEN.lock().unwrap().len(), 1);
}

#[test]
fn test_one_shot_with_callback_rearms_full_period() {
    static CALLS: AtomicU32 = AtomicU32::new(0);

    fn count(_: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    let mut pool: TimerPool = TimerPool::new();
    let timer = pool.create(TimerMode::OneShot, Some(count)).unwrap();
    pool.set_time(timer, 5).unwrap();
    pool.start(timer).unwrap();

    for _ in 0..5 {
        pool.tick();
    }
    assert_eq!(pool.remaining_ticks(timer), Ok(5));

    pool.start(timer).unwrap();
    for _ in 0..4 {
        pool.tick();
    }
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    pool.tick();
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

struct Probe {
    name: &'static str,
    calls: AtomicU32,
}

#[test]
fn test_custom_argument_and_self_stop() {
    static PROBE: Probe = Probe {
        name: "Timer1",
        calls: AtomicU32::new(0),
    };

    fn on_expiry(expiry: &mut Expiry<'_, &'static Probe>) -> Result<(), CallbackError> {
        let probe = expiry.argument().custom().copied().ok_or(CallbackError(1))?;
        assert_eq!(probe.name, "Timer1");
        if probe.calls.fetch_add(1, Ordering::SeqCst) + 1 == 2 {
            expiry.stop();
        }
        Ok(())
    }

    let mut pool = TimerPool::<&'static Probe>::new();
    let timer = pool.create(TimerMode::Loop, Some(on_expiry)).unwrap();
    pool.set_argument(timer, Argument::Custom(&PROBE)).unwrap();
    pool.set_time(timer, 10).unwrap();
    pool.start(timer).unwrap();

    for _ in 0..50 {
        pool.tick();
    }
    assert_eq!(PROBE.calls.load(Ordering::SeqCst), 2);
    assert_eq!(pool.state(timer), Ok(TimerState::Stopped));
    assert_eq!(pool.remaining_ticks(timer), Ok(10));

    // clearing the argument falls back to the handle
    pool.set_argument(timer, Option::<&'static Probe>::None.into()).unwrap();
    assert!(matches!(pool.argument(timer), Ok(ArgumentRef::Handle(h)) if h == timer));
}

#[test]
fn test_callback_consumes_overflow_and_resets() {
    static CONSUMED: AtomicU32 = AtomicU32::new(0);

    fn on_expiry(expiry: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        let overflows = expiry.overflow();
        CONSUMED.fetch_add(overflows as u32, Ordering::SeqCst);
        expiry.reset();
        Ok(())
    }

    let mut pool: TimerPool = TimerPool::new();
    let timer = pool.create(TimerMode::OneShot, Some(on_expiry)).unwrap();
    pool.set_time(timer, 10).unwrap();
    pool.start(timer).unwrap();

    for _ in 0..40 {
        pool.tick();
    }
    assert_eq!(CONSUMED.load(Ordering::SeqCst), 1);
    assert_eq!(pool.overflow(timer), Ok(0));
}

#[test]
fn test_callback_can_change_period() {
    static PERIODS: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    fn stretch(expiry: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        PERIODS.lock().unwrap().push(expiry.time());
        let next = expiry.time() * 2;
        expiry.set_time(next);
        Ok(())
    }

    let mut pool: TimerPool = TimerPool::new();
    let timer = pool.create(TimerMode::Loop, Some(stretch)).unwrap();
    pool.set_time(timer, 2).unwrap();
    pool.start(timer).unwrap();

    // expiries at 2, 2+4, 2+4+8
    for _ in 0..14 {
        pool.tick();
    }
    assert_eq!(*PERIODS.lock().unwrap(), vec![2, 4, 8]);
    assert_eq!(pool.remaining_ticks(timer), Ok(16));
}

#[test]
fn test_failing_callback_is_isolated() {
    static HEALTHY: AtomicU32 = AtomicU32::new(0);

    fn broken(_: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        Err(CallbackError(42))
    }

    fn healthy(_: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        HEALTHY.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    let mut pool: TimerPool = TimerPool::new();
    let bad = pool.create(TimerMode::Loop, Some(broken)).unwrap();
    let good = pool.create(TimerMode::Loop, Some(healthy)).unwrap();
    for timer in [bad, good] {
        pool.set_time(timer, 1).unwrap();
        pool.start(timer).unwrap();
    }

    for _ in 0..3 {
        pool.tick();
    }

    assert_eq!(HEALTHY.load(Ordering::SeqCst), 3);
    assert_eq!(pool.stats().callback_faults, 3);
    assert_eq!(pool.overflow(bad), Ok(0));
    assert_eq!(pool.remaining_ticks(bad), Ok(1));

    let fault = pool.take_fault().unwrap();
    assert_eq!(fault.handle, bad);
    assert_eq!(fault.error.code(), 42);
    assert_eq!(fault.to_string(), format!("{bad}: callback failed with code 42"));
}

#[test]
fn test_fault_log_keeps_newest() {
    static SEQ: AtomicU32 = AtomicU32::new(0);

    fn broken(_: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
        Err(CallbackError(SEQ.fetch_add(1, Ordering::SeqCst) as u16))
    }

    let mut pool: TimerPool = TimerPool::new();
    let timer = pool.create(TimerMode::Loop, Some(broken)).unwrap();
    pool.set_time(timer, 1).unwrap();
    pool.start(timer).unwrap();

    for _ in 0..20 {
        pool.tick();
    }

    assert_eq!(pool.fault_count(), stimer_pool::FAULT_LOG_LEN);
    let mut codes = Vec::new();
    while let Some(fault) = pool.take_fault() {
        codes.push(fault.error.code());
    }
    assert_eq!(codes.len(), stimer_pool::FAULT_LOG_LEN);
    assert_eq!(codes.first(), Some(&(20 - stimer_pool::FAULT_LOG_LEN as u16)));
    assert_eq!(codes.last(), Some(&19));
    assert_eq!(pool.stats().callback_faults, 20);
    assert_eq!(pool.fault_count(), 0);
}
