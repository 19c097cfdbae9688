//! Progress dots while the document is fetched and analysed.
//!
//! [`DotTicker`] writes one `.` per interval on a background thread until it
//! is stopped. Stopping is cooperative: the thread polls a shared flag and
//! exits on its own, and `stop` joins it. The ticker never touches any
//! analysis state.

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default time between dots
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

/// Upper bound on how long `stop` waits for the thread to notice
const POLL_SLICE: Duration = Duration::from_millis(10);

/// Background dot printer with an explicit stop signal
#[derive(Debug)]
pub struct DotTicker {
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
}

impl DotTicker {
    /// Start printing dots to `out` every `interval`
    ///
    /// If the thread cannot be spawned the ticker is inert; progress output
    /// is cosmetic and never fails the run.
    pub fn start<W>(mut out: W, interval: Duration) -> Self
    where
        W: Write + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicUsize::new(0));
        let thread_stop = stop.clone();
        let thread_ticks = ticks.clone();

        let spawned = thread::Builder::new()
            .name("dot-ticker".to_string())
            .spawn(move || {
                while sleep_unless_stopped(&thread_stop, interval) {
                    if out.write_all(b".").and_then(|_| out.flush()).is_err() {
                        break;
                    }
                    thread_ticks.fetch_add(1, Ordering::Relaxed);
                }
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "could not start progress ticker");
                None
            }
        };

        Self {
            stop,
            ticks,
            handle,
        }
    }

    /// Start a ticker on stdout with the default interval
    pub fn stdout() -> Self {
        Self::start(std::io::stdout(), DEFAULT_INTERVAL)
    }

    /// Number of dots written so far
    pub fn ticks(&self) -> usize {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Whether the background thread is still expected to run
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signal the thread to stop and wait for it to exit
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("progress ticker thread panicked");
            }
        }
    }
}

impl Drop for DotTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleep for `interval` in short slices; returns `false` once stopped
fn sleep_unless_stopped(stop: &AtomicBool, interval: Duration) -> bool {
    let mut waited = Duration::ZERO;
    while waited < interval {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let step = POLL_SLICE.min(interval - waited);
        thread::sleep(step);
        waited += step;
    }
    !stop.load(Ordering::Relaxed)
}
