//! Shared helpers for the stimer demonstration programs.
//!
//! Each binary mirrors a small embedded main loop: it calls `tick` itself
//! (standing in for the timer interrupt) and polls or reacts to expiries,
//! printing progress along the way. Set `STIMER_LOG=debug` to also see the
//! pool's own log output.

use stimer_pool::{TimerPool, DEFAULT_CAPACITY, DEFAULT_TICK_US};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tick period used by every demo, in microseconds
pub const TICK_US: u32 = DEFAULT_TICK_US;

/// Pool type used by the polling demos
pub type DemoPool<A = ()> = TimerPool<A, DEFAULT_CAPACITY, TICK_US>;

/// Install a stderr subscriber for the `log` records emitted by the pool
///
/// The filter comes from `STIMER_LOG` (`EnvFilter` syntax, e.g.
/// `stimer_pool=trace`) and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("STIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    // a second call (or a logger installed elsewhere) leaves the first one in place
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init();
}

/// Print the demo configuration header
pub fn banner(timers: &[(&str, u32)]) {
    println!("timer tick period: {}us", TICK_US);
    for (name, ms) in timers {
        println!("{name} set to: {ms}ms");
    }
}
