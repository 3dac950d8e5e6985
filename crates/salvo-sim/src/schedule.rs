//! Fixed-interval cadence for work that runs coarser than the frame rate.

/// Slack when comparing against due times, so that a due time landing on a
/// frame boundary is not missed by float rounding.
const DUE_EPSILON: f64 = 1e-9;

/// A task that comes due every `interval_secs`, starting `start_delay_secs` in.
///
/// Due times are computed from the occurrence index, not accumulated, so the
/// cadence does not drift. Occurrences missed by a long frame are skipped
/// rather than replayed.
#[derive(Debug, Clone)]
pub struct RecurringTask {
    interval_secs: f64,
    start_secs: f64,
    /// Index of the next occurrence.
    next_index: u64,
    runs: u64,
}

impl RecurringTask {
    pub fn new(interval_secs: f64, start_delay_secs: f64) -> Self {
        Self {
            interval_secs: interval_secs.max(f64::EPSILON),
            start_secs: start_delay_secs.max(0.0),
            next_index: 0,
            runs: 0,
        }
    }

    /// Time at which the task next comes due.
    pub fn next_due(&self) -> f64 {
        self.start_secs + self.next_index as f64 * self.interval_secs
    }

    /// Returns true (once) if the task is due at `now`.
    pub fn poll(&mut self, now: f64) -> bool {
        if now + DUE_EPSILON < self.next_due() {
            return false;
        }
        let elapsed = now - self.start_secs + DUE_EPSILON;
        let passed = (elapsed / self.interval_secs).floor().max(0.0) as u64;
        self.next_index = (passed + 1).max(self.next_index + 1);
        self.runs += 1;
        true
    }

    /// How many times the task has come due.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }
}
