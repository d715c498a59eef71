//! A one-shot timer polled every tick; it overflows once and then stays
//! stopped.

use std::error::Error;

use stimer_demos::{banner, init_logging, DemoPool};
use stimer_pool::TimerMode;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut pool: DemoPool = DemoPool::new();
    let timer = pool.create(TimerMode::OneShot, None)?;
    pool.set_time(timer, 10)?;
    pool.start(timer)?;

    banner(&[("timer", 10)]);

    for tick in 1..=30 {
        pool.tick();
        println!("tick {tick}");

        if pool.overflow(timer)? > 0 {
            println!("timer overflow");
        }
    }

    pool.destroy(timer)?;
    Ok(())
}
