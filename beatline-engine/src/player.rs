//! Chart session glue: load, clock, simulate.

use crate::{LineFrame, Scheduler, Simulator, TimeManager};
use anyhow::{Context, Result};
use beatline_common::parse::parse_chart;

/// One chart session: clock, simulator and note schedule.
///
/// Created paused at time 0; the host resumes when audio playback starts
/// and calls [`Player::frame`] once per tick.
pub struct Player {
    pub time: TimeManager,
    pub simulator: Simulator,
    pub scheduler: Scheduler,
}

impl Player {
    pub fn load(source: &str) -> Result<Self> {
        let chart = parse_chart(source).context("failed to load chart")?;
        log::debug!(
            "chart loaded: {} lines, {} notes",
            chart.line_count(),
            chart.note_count()
        );
        let scheduler = Scheduler::new(&chart);
        let mut time = TimeManager::new();
        time.pause();
        time.seek_to(0.0);
        Ok(Self {
            time,
            simulator: Simulator::new(chart),
            scheduler,
        })
    }

    pub fn pause(&mut self) {
        self.time.pause();
    }

    pub fn resume(&mut self) {
        self.time.resume();
    }

    /// Jump to `seconds`; works paused or playing, forward or backward.
    pub fn seek(&mut self, seconds: f64) {
        self.time.seek_to(seconds);
        self.scheduler.seek(seconds);
        self.simulator.tick(seconds);
    }

    /// Advance the session to the current clock and evaluate all notes.
    pub fn frame(&mut self) -> Vec<LineFrame> {
        self.simulator.tick(self.time.now());
        self.simulator.frame()
    }
}
