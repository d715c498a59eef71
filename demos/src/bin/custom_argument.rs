//! A callback receiving application data instead of the timer handle.

use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};

use stimer_demos::{banner, init_logging, DemoPool};
use stimer_pool::{Argument, ArgumentRef, CallbackError, Expiry, TimerMode};

struct MyData {
    name: &'static str,
    calls: AtomicU32,
}

static TIMER1: MyData = MyData {
    name: "Timer1",
    calls: AtomicU32::new(0),
};

fn timer_cb(expiry: &mut Expiry<'_, &'static MyData>) -> Result<(), CallbackError> {
    let ArgumentRef::Custom(&data) = expiry.argument() else {
        return Err(CallbackError(1));
    };

    let calls = data.calls.fetch_add(1, Ordering::Relaxed);
    println!("{} callback {calls}", data.name);

    if calls + 1 == 2 {
        expiry.stop();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut pool = DemoPool::<&'static MyData>::new();
    let timer = pool.create(TimerMode::Loop, Some(timer_cb))?;
    pool.set_argument(timer, Argument::Custom(&TIMER1))?;
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

    while let Some(fault) = pool.take_fault() {
        eprintln!("callback fault: {fault}");
    }

    pool.destroy(timer)?;
    Ok(())
}
