//! Three timers with different periods; the second one destroys the first
//! when it expires and the third one ends the demo.

use std::error::Error;

use stimer_demos::{banner, init_logging, DemoPool};
use stimer_pool::TimerMode;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut pool: DemoPool = DemoPool::new();
    let timer1 = pool.create(TimerMode::Loop, None)?;
    let timer2 = pool.create(TimerMode::OneShot, None)?;
    let timer3 = pool.create(TimerMode::OneShot, None)?;

    for (timer, ms) in [(timer1, 10), (timer2, 20), (timer3, 30)] {
        pool.set_time(timer, ms)?;
        pool.start(timer)?;
    }

    banner(&[("timer1", 10), ("timer2", 20), ("timer3", 30)]);

    let mut timer1 = Some(timer1);
    let mut tick = 0;
    loop {
        pool.tick();
        tick += 1;
        println!("tick {tick}");

        if let Some(timer) = timer1 {
            if pool.overflow(timer)? > 0 {
                println!("timer1 overflow");
            }
        }

        if pool.overflow(timer2)? > 0 {
            println!("timer2 overflow");
            if let Some(timer) = timer1.take() {
                pool.destroy(timer)?;
            }
        }

        if pool.overflow(timer3)? > 0 {
            println!("timer3 overflow");
            break;
        }
    }

    pool.destroy(timer2)?;
    pool.destroy(timer3)?;
    Ok(())
}
