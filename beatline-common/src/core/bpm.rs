//! BPM timeline for time ↔ beat conversion.
//!
//! A chart declares its tempo as an ordered list of BPM changes in beat
//! space. The timeline derives one `(start beat, start seconds, bpm)`
//! element per change and converts elapsed audio time to the current beat
//! position, and back.

use super::Beat;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A tempo change taking effect at `start_beat` (schema item).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmChange {
    pub bpm: f64,
    pub start_beat: Beat,
}

/// Derived tempo timeline.
///
/// Built once per chart load and immutable afterwards; if BPM data changes
/// in the editor the timeline is rebuilt wholesale.
#[derive(Debug, Clone)]
pub struct Timeline {
    elements: Vec<Element>,
}

#[derive(Debug, Clone, Copy)]
struct Element {
    start_beat: f64,
    start_seconds: f64,
    bpm: f64,
}

impl Timeline {
    /// Build the timeline from the chart's BPM change list.
    ///
    /// The first segment starts at time 0; each later segment starts after
    /// `(60 / bpm) * beats` of the segment before it. An empty or malformed
    /// list is a configuration error and fails the chart load.
    pub fn new(changes: &[BpmChange]) -> Result<Self> {
        if changes.is_empty() {
            bail!("BPM list is empty");
        }
        let mut elements = Vec::with_capacity(changes.len());
        let mut seconds = 0.0;
        let mut last: Option<(f64, f64)> = None;
        for change in changes {
            if change.bpm <= 0.0 {
                bail!("non-positive BPM: {}", change.bpm);
            }
            let beat = change.start_beat.value();
            if let Some((prev_beat, prev_bpm)) = last {
                if beat <= prev_beat {
                    bail!("BPM changes are not ordered by start beat");
                }
                seconds += (beat - prev_beat) * (60.0 / prev_bpm);
            }
            last = Some((beat, change.bpm));
            elements.push(Element {
                start_beat: beat,
                start_seconds: seconds,
                bpm: change.bpm,
            });
        }
        Ok(Self { elements })
    }

    /// Beat position after `seconds` of elapsed audio time.
    ///
    /// Monotonic non-decreasing in `seconds`; times before the first
    /// segment extrapolate through its tempo.
    pub fn beat_at(&self, seconds: f64) -> f64 {
        let mut beat = self.elements[0].start_beat;
        for (i, el) in self.elements.iter().enumerate() {
            match self.elements.get(i + 1) {
                Some(next) if seconds >= next.start_seconds => {
                    beat += (next.start_seconds - el.start_seconds) * el.bpm / 60.0;
                }
                _ => {
                    beat += (seconds - el.start_seconds) * el.bpm / 60.0;
                    break;
                }
            }
        }
        beat
    }

    /// Elapsed audio time at a beat position, by construction order.
    pub fn seconds_at(&self, beat: f64) -> f64 {
        let mut idx = 0;
        while idx + 1 < self.elements.len() && self.elements[idx + 1].start_beat <= beat {
            idx += 1;
        }
        let el = &self.elements[idx];
        el.start_seconds + (beat - el.start_beat) * (60.0 / el.bpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(bpm: f64, beat: i32) -> BpmChange {
        BpmChange {
            bpm,
            start_beat: Beat::whole(beat),
        }
    }

    #[test]
    fn test_round_trip_constant_bpm() {
        let timeline = Timeline::new(&[change(120.0, 0)]).unwrap();
        // 2 beats per second at 120 BPM
        assert!((timeline.beat_at(2.0) - 4.0).abs() < 1e-9);
        assert!((timeline.seconds_at(4.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bpm_change() {
        // 4 beats at 120 BPM (2 s), then 60 BPM (1 beat per second)
        let timeline = Timeline::new(&[change(120.0, 0), change(60.0, 4)]).unwrap();
        assert!((timeline.beat_at(2.0) - 4.0).abs() < 1e-9);
        assert!((timeline.beat_at(3.5) - 5.5).abs() < 1e-9);
        assert!((timeline.seconds_at(5.5) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_across_boundary() {
        let timeline = Timeline::new(&[change(120.0, 0), change(240.0, 8)]).unwrap();
        let mut prev = f64::NEG_INFINITY;
        for i in 0..100 {
            let beat = timeline.beat_at(i as f64 * 0.1);
            assert!(beat >= prev);
            prev = beat;
        }
    }

    #[test]
    fn test_fractional_start_beat() {
        let timeline = Timeline::new(&[
            BpmChange {
                bpm: 120.0,
                start_beat: Beat::whole(0),
            },
            BpmChange {
                bpm: 60.0,
                start_beat: Beat::new(1, 1, 2),
            },
        ])
        .unwrap();
        // 1.5 beats at 120 BPM take 0.75 s
        assert!((timeline.seconds_at(1.5) - 0.75).abs() < 1e-9);
        assert!((timeline.beat_at(1.75) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(Timeline::new(&[]).is_err());
    }

    #[test]
    fn test_unordered_list_rejected() {
        assert!(Timeline::new(&[change(120.0, 4), change(60.0, 0)]).is_err());
        assert!(Timeline::new(&[change(0.0, 0)]).is_err());
    }
}
