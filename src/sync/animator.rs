use std::time::{Duration, Instant};

/// Linear interpolation from a start position toward a target over a fixed
/// run time. A passive value: the owner advances it by asking for the value
/// at a given instant, and cancels it by dropping it.
#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    from: f64,
    to: f64,
    started: Instant,
    run_for: Duration,
}

impl ProgressAnimator {
    pub fn new(from: f64, to: f64, run_for: Duration, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
            run_for,
        }
    }

    /// Interpolated value at `now`, clamped to the `[from, to]` segment.
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.run_for.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let fraction = (elapsed.as_secs_f64() / self.run_for.as_secs_f64()).min(1.0);
        self.from + (self.to - self.from) * fraction
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.run_for
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn run_for(&self) -> Duration {
        self.run_for
    }
}
