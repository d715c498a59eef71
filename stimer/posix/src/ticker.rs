//! Clock Tick Service for POSIX
//!
//! Generates periodic ticks from a dedicated thread using the monotonic
//! clock. Each deadline is computed from the previous one rather than from
//! the wake-up time, so sleep jitter does not accumulate into drift.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};
use stimer_core::TickPeriod;
use stimer_pool::SharedTimerPool;
use thiserror::Error;

/// Errors raised while driving ticks
#[derive(Debug, Error)]
pub enum TickerError {
    #[error("tick period must be greater than zero")]
    ZeroPeriod,
    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("ticker thread panicked")]
    Panicked,
}

struct TickerState {
    running: AtomicBool,
    ticks: AtomicU64,
}

/// Handle to a running ticker thread
///
/// Dropping the handle stops the thread.
///
/// # Examples
///
/// ```no_run
/// use stimer_pool::{SharedTimerPool, TimerMode};
/// use stimer_posix::Ticker;
///
/// static TIMERS: SharedTimerPool = SharedTimerPool::new();
///
/// let ticker = Ticker::for_pool(&TIMERS).unwrap();
/// let blink = TIMERS.create(TimerMode::Loop, None).unwrap();
/// TIMERS.set_time(blink, 250).unwrap();
/// TIMERS.start(blink).unwrap();
///
/// std::thread::sleep(std::time::Duration::from_secs(1));
/// assert!(TIMERS.overflow(blink).unwrap() >= 3);
/// ticker.stop().unwrap();
/// ```
pub struct Ticker {
    state: Arc<TickerState>,
    period: Duration,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a thread calling `tick` once per `period`
    pub fn spawn<F>(period: Duration, tick: F) -> Result<Self, TickerError>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(TickerError::ZeroPeriod);
        }

        let state = Arc::new(TickerState {
            running: AtomicBool::new(true),
            ticks: AtomicU64::new(0),
        });

        let thread = thread::Builder::new().name("stimer-tick".into()).spawn({
            let state = Arc::clone(&state);
            move || ticker_thread(period, &state, tick)
        })?;

        debug!("ticker started with a {:?} period", period);
        Ok(Self {
            state,
            period,
            thread: Some(thread),
        })
    }

    /// Drive a shared pool at the tick period it was built for
    pub fn for_pool<A, const N: usize, const TICK_US: u32>(
        pool: &'static SharedTimerPool<A, N, TICK_US>,
    ) -> Result<Self, TickerError>
    where
        A: Send,
    {
        let period = Duration::from_micros(u64::from(TickPeriod::<TICK_US>::micros()));
        Self::spawn(period, move || pool.tick())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks issued so far
    pub fn ticks(&self) -> u64 {
        self.state.ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Relaxed)
    }

    /// Stop the thread and return the number of ticks it issued
    pub fn stop(mut self) -> Result<u64, TickerError> {
        self.shutdown()?;
        Ok(self.ticks())
    }

    fn shutdown(&mut self) -> Result<(), TickerError> {
        self.state.running.store(false, Ordering::SeqCst);

        if let Some(thread) = self.thread.take() {
            thread.join().map_err(|_| TickerError::Panicked)?;
            debug!("ticker stopped after {} ticks", self.ticks());
        }
        Ok(())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!("{err}");
        }
    }
}

fn ticker_thread<F: FnMut()>(period: Duration, state: &TickerState, mut tick: F) {
    let mut next_tick = Instant::now();

    while state.running.load(Ordering::Relaxed) {
        next_tick += period;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        if !state.running.load(Ordering::Relaxed) {
            break;
        }
        tick();
        state.ticks.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn wait_for(mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = Ticker::spawn(Duration::ZERO, || {}).err();
        assert!(matches!(err, Some(TickerError::ZeroPeriod)));
    }

    #[test]
    fn test_ticker_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticker = Ticker::spawn(Duration::from_millis(2), {
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        })
        .unwrap();

        assert!(ticker.is_running());
        assert_eq!(ticker.period(), Duration::from_millis(2));
        assert!(wait_for(|| count.load(Ordering::SeqCst) >= 10));

        let issued = ticker.stop().unwrap();
        assert_eq!(issued, count.load(Ordering::SeqCst) as u64);
    }

    #[test]
    fn test_drop_stops_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = Arc::clone(&count);
            let _ticker = Ticker::spawn(Duration::from_millis(1), move || {
                count.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn test_panicking_tick_reported() {
        let ticker = Ticker::spawn(Duration::from_millis(1), || panic!("tick failed")).unwrap();
        assert!(wait_for(|| ticker.thread.as_ref().is_some_and(|t| t.is_finished())));
        assert!(matches!(ticker.stop(), Err(TickerError::Panicked)));
    }
}
