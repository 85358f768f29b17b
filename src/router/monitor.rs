use std::fmt;
use std::sync::Arc;
use std::time::Instant;

pub type StopTimer = Box<dyn FnOnce() + Send>;

/// Timing hook. `start` returns the function that stops the timer.
pub trait Monitor: Send + Sync + fmt::Debug {
    fn start(&self, label: &str) -> StopTimer;
}

/// Reports timer durations as `debug` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitor;

impl Monitor for TracingMonitor {
    fn start(&self, label: &str) -> StopTimer {
        let label = label.to_string();
        let started = Instant::now();
        Box::new(move || {
            tracing::debug!(
                label = %label,
                elapsed_us = started.elapsed().as_micros() as u64,
                "timer stopped"
            );
        })
    }
}

/// Stops its timer when dropped, whichever way the bracketed work ends.
pub(crate) struct TimerGuard {
    stop: Option<StopTimer>,
}

impl TimerGuard {
    pub(crate) fn start(monitor: Option<&Arc<dyn Monitor>>, label: &str) -> Self {
        Self {
            stop: monitor.map(|m| m.start(label)),
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}
