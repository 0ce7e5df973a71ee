mod beat;
pub use beat::Beat;

mod bpm;
pub use bpm::{BpmChange, Timeline};

mod speed;
pub use speed::{SpeedProfile, SpeedSegment};

mod chart;
pub use chart::{Chart, JudgeLine, Note, NoteKind};
