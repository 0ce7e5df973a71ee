//! Wall-clock to simulation-time mapping, supporting pause, resume and
//! seek operations.

use std::time::Instant;

pub struct TimeManager {
    epoch: Instant,
    /// Wall-clock seconds corresponding to simulation time 0.
    start_time: f64,
    /// If paused, the wall-clock seconds at which the pause began.
    pause_time: Option<f64>,
}

impl TimeManager {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            start_time: 0.0,
            pause_time: None,
        }
    }

    fn real_time_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Current simulation time in seconds.
    pub fn now(&self) -> f64 {
        let wall = self.pause_time.unwrap_or_else(|| self.real_time_secs());
        wall - self.start_time
    }

    pub fn paused(&self) -> bool {
        self.pause_time.is_some()
    }

    pub fn pause(&mut self) {
        if self.pause_time.is_none() {
            self.pause_time = Some(self.real_time_secs());
        }
    }

    pub fn resume(&mut self) {
        if let Some(pt) = self.pause_time.take() {
            self.start_time += self.real_time_secs() - pt;
        }
    }

    /// Jump simulation time to `pos` (in seconds).
    pub fn seek_to(&mut self, pos: f64) {
        let wall = self.pause_time.unwrap_or_else(|| self.real_time_secs());
        self.start_time = wall - pos;
    }

    /// Reset to simulation time 0.
    pub fn reset(&mut self) {
        self.start_time = self.real_time_secs();
        self.pause_time = None;
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new()
    }
}
