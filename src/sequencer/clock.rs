use std::time::Duration;

// Tick interval for a tempo: one step per beat, `(60 / bpm) * 1000` ms.
pub fn interval_for_bpm(bpm: f32) -> Duration {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(60.0 / bpm as f64)
}

// Repeating interval timer fed with wall-clock time by the host loop.
//
// Dropping it is the cancellation; nothing fires after that.
#[derive(Clone, Debug)]
pub struct Timer {
    interval: Duration,
    pending: Duration, // time accumulated since the last tick
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Duration::ZERO,
        }
    }

    pub fn for_bpm(bpm: f32) -> Self {
        Self::new(interval_for_bpm(bpm))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // Returns how many ticks are due after `elapsed` more time.
    // Late calls get every missed tick back, in one batch.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_at_150_bpm() {
        assert_eq!(interval_for_bpm(150.0), Duration::from_millis(400));
        assert_eq!(interval_for_bpm(60.0), Duration::from_secs(1));
    }

    #[test]
    fn test_degenerate_bpm_never_ticks() {
        let mut timer = Timer::for_bpm(0.0);
        assert_eq!(timer.advance(Duration::from_secs(10)), 0);
        let mut timer = Timer::for_bpm(f32::NAN);
        assert_eq!(timer.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut timer = Timer::new(Duration::from_millis(400));
        assert_eq!(timer.advance(Duration::from_millis(300)), 0);
        assert_eq!(timer.advance(Duration::from_millis(300)), 1); // 600 -> one tick, 200 left
        assert_eq!(timer.advance(Duration::from_millis(200)), 1);
        assert_eq!(timer.advance(Duration::from_millis(399)), 0);
    }

    #[test]
    fn test_late_call_catches_up() {
        let mut timer = Timer::new(Duration::from_millis(100));
        assert_eq!(timer.advance(Duration::from_millis(350)), 3);
        assert_eq!(timer.advance(Duration::from_millis(50)), 1);
    }
}
