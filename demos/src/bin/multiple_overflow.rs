//! Overflows accumulate while nobody reads them.

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

    let mut tick = 0;
    loop {
        tick += 1;
        println!("tick {tick}");
        pool.tick();

        if tick >= 30 {
            let overflows = pool.overflow(timer)?;
            if overflows > 0 {
                println!("timer overflow: {overflows}");
                break;
            }
        }
    }

    pool.destroy(timer)?;
    Ok(())
}
