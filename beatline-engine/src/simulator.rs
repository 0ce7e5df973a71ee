//! Per-tick note position evaluation.
//!
//! The engine keeps no per-note state between frames: every offset is a
//! pure function of the current beat and the chart data, so seeking in
//! either direction needs no cache invalidation.

use beatline_common::core::{Chart, NoteKind, SpeedProfile};

/// Scroll offset of one note relative to its judgment line.
///
/// Positive while the note approaches, negative once it has passed the
/// play-head (or during backward scrubbing). Pure function of its four
/// inputs.
pub fn note_offset(
    speed: &SpeedProfile,
    current_beat: f64,
    target_beat: f64,
    multiplier: f64,
) -> f64 {
    speed.integrate_signed(current_beat, target_beat) * multiplier
}

/// Snapshot of one note for the frame being simulated.
#[derive(Debug, Clone, Copy)]
pub struct NoteFrame {
    pub note: usize,
    pub kind: NoteKind,
    /// Horizontal placement on the line, in chart units.
    pub position: f64,
    /// Scroll offset along the line's approach axis.
    pub offset: f64,
    pub visible: bool,
}

/// Snapshot of one judgment line for the frame being simulated.
#[derive(Debug, Clone)]
pub struct LineFrame {
    pub line: usize,
    pub notes: Vec<NoteFrame>,
}

/// Simulation driver for one chart session.
///
/// Holds only the externally-fed play-head position; all note math is
/// re-derived from the read-only chart every frame.
pub struct Simulator {
    chart: Chart,
    current_beat: f64,
}

impl Simulator {
    pub fn new(chart: Chart) -> Self {
        Self {
            chart,
            current_beat: 0.0,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn current_beat(&self) -> f64 {
        self.current_beat
    }

    /// Move the play-head to `seconds` of elapsed audio time and return
    /// the resulting beat position. Any value is accepted, including
    /// non-monotonic ones while scrubbing.
    pub fn tick(&mut self, seconds: f64) -> f64 {
        self.current_beat = self.chart.timeline.beat_at(seconds + self.chart.offset);
        self.current_beat
    }

    /// Evaluate every note of every line at the current beat.
    pub fn frame(&self) -> Vec<LineFrame> {
        self.chart
            .lines
            .iter()
            .enumerate()
            .map(|(li, line)| LineFrame {
                line: li,
                notes: line
                    .notes
                    .iter()
                    .enumerate()
                    .map(|(ni, note)| NoteFrame {
                        note: ni,
                        kind: note.kind,
                        position: note.position,
                        offset: note_offset(&line.speed, self.current_beat, note.hit_beat, note.speed),
                        visible: note.appear_beat.map_or(true, |a| self.current_beat >= a),
                    })
                    .collect(),
            })
            .collect()
    }
}
