//! A looping timer that is paused between ticks 26 and 40.

use std::error::Error;

use stimer_demos::{banner, init_logging, DemoPool};
use stimer_pool::TimerMode;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut pool: DemoPool = DemoPool::new();
    let timer = pool.create(TimerMode::Loop, None)?;
    pool.set_time(timer, 10)?;
    pool.start(timer)?;

    banner(&[("timer", 10)]);

    for tick in 1..=50 {
        println!("tick {tick}");
        pool.tick();

        if pool.overflow(timer)? > 0 {
            println!("timer overflow");
        }

        match tick {
            26 => pool.stop(timer)?,
            40 => pool.start(timer)?,
            _ => {}
        }
    }

    pool.destroy(timer)?;
    Ok(())
}
