//! Scoped wall-clock timing.
//!
//! Measures the duration of a scoped block and hands it to a reporting
//! callback when the scope exits, keeping instrumentation out of the
//! solver procedures themselves.

use log::info;
use std::time::{Duration, Instant};

/// Times its own lifetime and invokes the reporting callback on drop
pub struct ScopedTimer<F: FnOnce(Duration)> {
    start: Instant,
    report: Option<F>,
}

impl<F: FnOnce(Duration)> ScopedTimer<F> {
    pub fn new(report: F) -> Self {
        ScopedTimer {
            start: Instant::now(),
            report: Some(report),
        }
    }

    /// Time elapsed so far, without consuming the timer
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl<F: FnOnce(Duration)> Drop for ScopedTimer<F> {
    fn drop(&mut self) {
        if let Some(report) = self.report.take() {
            report(self.start.elapsed());
        }
    }
}

/// Stock timer that reports `"<label> took <ms> ms"` through the log
pub fn logged(label: &str) -> ScopedTimer<impl FnOnce(Duration)> {
    let label = label.to_string();
    ScopedTimer::new(move |elapsed| {
        info!("{} took {:.3} ms", label, elapsed.as_secs_f64() * 1000.0);
    })
}
