use std::time::{Duration, Instant};

// A tempo drag counts as finished once the tempo keys have been quiet this long
pub const TEMPO_COMMIT_DELAY: Duration = Duration::from_millis(400);

// state local to the tui, between key presses
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    // last tempo key press of a gesture that hasn't been committed yet
    pub tempo_touched: Option<Instant>,
}

impl TuiState {
    pub fn touch_tempo(&mut self, now: Instant) {
        self.tempo_touched = Some(now);
    }

    // true exactly once per gesture, when it has gone quiet
    pub fn take_tempo_commit(&mut self, now: Instant) -> bool {
        match self.tempo_touched {
            Some(at) if now.saturating_duration_since(at) >= TEMPO_COMMIT_DELAY => {
                self.tempo_touched = None;
                true
            }
            _ => false,
        }
    }
}
