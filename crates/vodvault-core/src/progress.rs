//! Transfer progress reporting.
//!
//! Progress is an integer percentage handed to a caller-supplied callback.
//! The reporter enforces the one guarantee callers get: values never
//! decrease within a single transfer.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Callback invoked with transfer progress, 0–100.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Compute `done` out of `total` as a rounded percentage.
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (done as f64 / total as f64 * 100.0).round() as u64;
    pct.min(100) as u8
}

/// Wraps a [`ProgressFn`] with a high-water mark so reported values are
/// monotonically non-decreasing. Clones share the mark, which lets
/// per-part closures and the enclosing transfer feed one reporter.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: ProgressFn,
    high_water: Arc<AtomicU8>,
}

impl ProgressReporter {
    pub fn new(callback: ProgressFn) -> Self {
        Self {
            callback,
            high_water: Arc::new(AtomicU8::new(0)),
        }
    }

    /// Report `pct`, clamped to 100. Values at or below the high-water
    /// mark are dropped.
    pub fn report(&self, pct: u8) {
        let pct = pct.min(100);
        let prev = self.high_water.fetch_max(pct, Ordering::AcqRel);
        if pct > prev {
            (self.callback)(pct);
        }
    }

    /// Report completion.
    pub fn finish(&self) {
        // The high-water mark starts at 0, so a zero-byte transfer still
        // lands on 100 here.
        let prev = self.high_water.swap(100, Ordering::AcqRel);
        if prev < 100 {
            (self.callback)(100);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collecting_reporter() -> (ProgressReporter, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ProgressReporter::new(Arc::new(move |pct| {
            sink.lock().unwrap().push(pct);
        }));
        (reporter, seen)
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0, 100), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(100, 100), 100);
    }

    #[test]
    fn percent_of_zero_total_is_complete() {
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn reporter_drops_regressions() {
        let (reporter, seen) = collecting_reporter();
        for pct in [10, 5, 10, 40, 30, 100] {
            reporter.report(pct);
        }
        assert_eq!(*seen.lock().unwrap(), vec![10, 40, 100]);
    }

    #[test]
    fn finish_emits_once() {
        let (reporter, seen) = collecting_reporter();
        reporter.report(80);
        reporter.finish();
        reporter.finish();
        assert_eq!(*seen.lock().unwrap(), vec![80, 100]);
    }

    #[test]
    fn clones_share_the_high_water_mark() {
        let (reporter, seen) = collecting_reporter();
        let other = reporter.clone();
        reporter.report(50);
        other.report(40);
        other.report(60);
        assert_eq!(*seen.lock().unwrap(), vec![50, 60]);
    }
}
