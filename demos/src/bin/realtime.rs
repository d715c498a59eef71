//! Timers driven in real time by a ticker thread.
//!
//! A looping heartbeat is polled from the main thread while a one-shot
//! timer re-arms itself from its callback. Runs for five seconds or until
//! Ctrl+C.

use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use stimer_demos::{banner, init_logging, TICK_US};
use stimer_pool::{CallbackError, Expiry, SharedTimerPool, TimerMode, DEFAULT_CAPACITY};
use stimer_posix::Ticker;

const RUN_FOR: Duration = Duration::from_secs(5);
const HEARTBEAT_MS: u32 = 500;
const REARM_MS: u32 = 1_300;

static TIMERS: SharedTimerPool<(), DEFAULT_CAPACITY, TICK_US> = SharedTimerPool::new();
static RUNNING: AtomicBool = AtomicBool::new(true);
static REARMS: AtomicU32 = AtomicU32::new(0);

fn rearm(expiry: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
    let count = REARMS.fetch_add(1, Ordering::Relaxed) + 1;
    println!("{} fired ({count})", expiry.handle());
    expiry.start();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    ctrlc::set_handler(|| RUNNING.store(false, Ordering::SeqCst))?;

    let heartbeat = TIMERS.create(TimerMode::Loop, None)?;
    TIMERS.set_time(heartbeat, HEARTBEAT_MS)?;
    TIMERS.start(heartbeat)?;

    let one_shot = TIMERS.create(TimerMode::OneShot, Some(rearm))?;
    TIMERS.set_time(one_shot, REARM_MS)?;
    TIMERS.start(one_shot)?;

    banner(&[("heartbeat", HEARTBEAT_MS), ("one-shot", REARM_MS)]);

    let ticker = Ticker::for_pool(&TIMERS)?;
    let started = Instant::now();

    while RUNNING.load(Ordering::SeqCst) && started.elapsed() < RUN_FOR {
        let overflows = TIMERS.overflow(heartbeat)?;
        if overflows > 0 {
            println!("heartbeat at {:?} ({overflows})", started.elapsed());
        }
        thread::sleep(Duration::from_millis(10));
    }

    let ticks = ticker.stop()?;
    println!("stopped after {ticks} ticks");

    let stats = TIMERS.with(|pool| pool.stats());
    println!(
        "pool: {}% in use ({} of {} slots), {} expirations, {} callback faults",
        stats.utilization(),
        stats.used_slots,
        stats.total_slots,
        stats.expirations,
        stats.callback_faults
    );

    while let Some(fault) = TIMERS.with(|pool| pool.take_fault()) {
        eprintln!("callback fault: {fault}");
    }

    TIMERS.destroy(heartbeat)?;
    TIMERS.destroy(one_shot)?;
    Ok(())
}
