//! Chart data model.
//!
//! The chart owns all timing data; the engine only reads it. Everything
//! here is immutable after load — editing BPM or speed data rebuilds the
//! derived structures wholesale.

use super::{SpeedProfile, Timeline};

/// Kind of note, from the schema's `type` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteKind {
    #[default]
    Click,
    Hold,
    Flick,
    Drag,
}

/// A single scrollable note.
#[derive(Debug, Clone)]
pub struct Note {
    pub kind: NoteKind,
    /// Beat at which the note reaches its judgment line.
    pub hit_beat: f64,
    /// Horizontal placement on the line, in chart units.
    pub position: f64,
    /// Per-note multiplier applied after speed integration.
    pub speed: f64,
    /// Beat at which the note becomes visible; `None` means always visible.
    pub appear_beat: Option<f64>,
}

/// One judgment line: its approach-speed profile and the notes traveling
/// toward it.
#[derive(Debug, Clone, Default)]
pub struct JudgeLine {
    pub speed: SpeedProfile,
    pub notes: Vec<Note>,
}

/// A loaded chart session.
#[derive(Debug, Clone)]
pub struct Chart {
    /// Audio sync offset in seconds, added to elapsed audio time.
    pub offset: f64,
    pub timeline: Timeline,
    pub lines: Vec<JudgeLine>,
}

impl Chart {
    pub fn new(offset: f64, timeline: Timeline, lines: Vec<JudgeLine>) -> Self {
        Self {
            offset,
            timeline,
            lines,
        }
    }

    pub fn note_count(&self) -> usize {
        self.lines.iter().map(|l| l.notes.len()).sum()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
