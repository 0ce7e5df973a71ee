//! Beatline — host-facing simulation layer.
//!
//! Drives the beat–time engine once per host tick: wall clock → current
//! beat → per-note scroll offsets, plus appear-time scheduling for hosts
//! that spawn note objects lazily. Rendering, audio and input judgment
//! live outside this crate.

pub mod player;
pub mod scheduler;
pub mod simulator;
pub mod time;

pub use player::Player;
pub use scheduler::{NoteSchedule, Scheduler};
pub use simulator::{note_offset, LineFrame, NoteFrame, Simulator};
pub use time::TimeManager;
