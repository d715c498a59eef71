//! A looping timer whose callback stops it on the second expiry; the main
//! loop restarts it from tick 35 on.

use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};

use stimer_demos::{banner, init_logging, DemoPool};
use stimer_pool::{CallbackError, Expiry, TimerMode};

static CALLS: AtomicU32 = AtomicU32::new(0);

fn timer_cb(expiry: &mut Expiry<'_, ()>) -> Result<(), CallbackError> {
    let calls = CALLS.fetch_add(1, Ordering::Relaxed);
    println!("timer callback {calls}");

    if calls + 1 == 2 {
        expiry.stop();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut pool = DemoPool::new();
    let timer = pool.create(TimerMode::Loop, Some(timer_cb))?;
    pool.set_time(timer, 10)?;
    pool.start(timer)?;

    banner(&[("timer", 10)]);

    for tick in 1..=50 {
        println!("tick {tick}");
        pool.tick();

        if tick >= 35 {
            pool.start(timer)?;
        }
    }

    pool.destroy(timer)?;
    Ok(())
}
