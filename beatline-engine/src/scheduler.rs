//! Appear-time scheduling.
//!
//! Precomputes, at chart load, when each note first becomes visible so a
//! host can spawn note objects lazily instead of scanning every note on
//! every frame. Appear offsets are stated directly in beats; the timeline
//! converts them to seconds for wall-clock comparison.

use beatline_common::core::Chart;

/// Precomputed spawn entry for one note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSchedule {
    pub line: usize,
    pub note: usize,
    /// Seconds at which the note reaches its judgment line.
    pub hit_seconds: f64,
    /// Seconds at which the note becomes visible; `None` means the note is
    /// visible from the start.
    pub appear_seconds: Option<f64>,
}

impl NoteSchedule {
    /// Always-visible notes sort before everything else.
    fn spawn_seconds(&self) -> f64 {
        self.appear_seconds.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Spawn schedule for one chart session, sorted by appear time.
pub struct Scheduler {
    entries: Vec<NoteSchedule>,
    cursor: usize,
}

impl Scheduler {
    pub fn new(chart: &Chart) -> Self {
        let mut entries = Vec::with_capacity(chart.note_count());
        for (li, line) in chart.lines.iter().enumerate() {
            for (ni, note) in line.notes.iter().enumerate() {
                // timeline seconds are audio-file time; entries are stored
                // in the host-clock domain the simulator ticks with, which
                // lags the audio by the chart offset
                entries.push(NoteSchedule {
                    line: li,
                    note: ni,
                    hit_seconds: chart.timeline.seconds_at(note.hit_beat) - chart.offset,
                    appear_seconds: note
                        .appear_beat
                        .map(|b| chart.timeline.seconds_at(b) - chart.offset),
                });
            }
        }
        entries.sort_by(|a, b| a.spawn_seconds().total_cmp(&b.spawn_seconds()));
        Self { entries, cursor: 0 }
    }

    pub fn entries(&self) -> &[NoteSchedule] {
        &self.entries
    }

    /// Notes whose spawn time has been reached since the previous call.
    pub fn due_before(&mut self, seconds: f64) -> &[NoteSchedule] {
        let from = self.cursor;
        while self.cursor < self.entries.len()
            && self.entries[self.cursor].spawn_seconds() <= seconds
        {
            self.cursor += 1;
        }
        &self.entries[from..self.cursor]
    }

    /// Rewind for seeking: the next `due_before` re-emits everything that
    /// spawns at or after `seconds`. Always-visible notes are never
    /// re-emitted this way; a host that despawns its note objects on seek
    /// should [`Scheduler::reset`] and drain the schedule again.
    pub fn seek(&mut self, seconds: f64) {
        self.cursor = self
            .entries
            .partition_point(|e| e.spawn_seconds() < seconds);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
