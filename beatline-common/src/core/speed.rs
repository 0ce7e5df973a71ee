//! Piecewise-linear speed integration over beat intervals.
//!
//! A judgment line's approach speed is declared as an ordered list of
//! linear ramps in beat space. The scroll distance between two beat
//! positions is the definite integral of that speed function; it places
//! every note on every frame. Outside any declared segment the speed holds
//! at the nearest boundary value: the first segment's start value before
//! everything, the preceding segment's end value inside a gap, and the
//! last segment's end value after everything.

use super::Beat;
use serde::{Deserialize, Serialize};

/// A declared linear ramp of approach speed between two beats (schema item).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedSegment {
    pub start_beat: Beat,
    pub end_beat: Beat,
    pub start: f64,
    pub end: f64,
}

/// Integrable speed function for one judgment line.
///
/// Fraction boundaries are converted to decimals once at construction; the
/// integrator itself is pure and may be called once per note per frame.
#[derive(Debug, Clone, Default)]
pub struct SpeedProfile {
    segments: Vec<Piece>,
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    start: f64,
    end: f64,
    v0: f64,
    v1: f64,
}

impl Piece {
    fn value_at(&self, beat: f64) -> f64 {
        if self.end <= self.start {
            return self.v1;
        }
        let t = (beat - self.start) / (self.end - self.start);
        self.v0 + (self.v1 - self.v0) * t
    }
}

/// Where a beat position falls relative to the declared segments.
#[derive(Debug, Clone, Copy)]
enum Region {
    BeforeFirst,
    Inside(usize),
    GapAfter(usize),
    AfterLast,
}

impl SpeedProfile {
    /// Segments must already be ordered by start beat; they may leave gaps
    /// and may touch boundary-to-boundary. Where segments improperly
    /// overlap, the first-listed segment covers the overlapping sub-range.
    pub fn new(segments: &[SpeedSegment]) -> Self {
        Self {
            segments: segments
                .iter()
                .map(|s| Piece {
                    start: s.start_beat.value(),
                    end: s.end_beat.value(),
                    v0: s.start,
                    v1: s.end,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Speed at a single beat position: linear inside a segment, held
    /// constant everywhere else. Zero for an empty profile.
    pub fn speed_at(&self, beat: f64) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        match self.region_at(beat) {
            Region::BeforeFirst => self.segments[0].v0,
            Region::Inside(i) => self.segments[i].value_at(beat),
            Region::GapAfter(i) => self.segments[i].v1,
            Region::AfterLast => self.segments[self.segments.len() - 1].v1,
        }
    }

    /// Definite integral of speed over `[from, to]` with `from <= to`.
    ///
    /// A single left-to-right sweep: classify the cursor's region, add that
    /// region's contribution up to `to` or the region boundary, advance to
    /// the next region. An empty profile is the degenerate "speed always
    /// zero" chart and integrates to 0 over any interval.
    pub fn integrate(&self, from: f64, to: f64) -> f64 {
        if self.segments.is_empty() || to <= from {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut cursor = from;
        let mut region = self.region_at(cursor);
        while cursor < to {
            let bound = self.region_end(region).min(to);
            if bound > cursor {
                sum += self.region_integral(region, cursor, bound);
                cursor = bound;
            }
            if cursor < to {
                region = self.next_region(region);
            }
        }
        sum
    }

    /// Signed integral from `current` to `target`; negative when the target
    /// beat lies behind the play-head (e.g. while scrubbing).
    pub fn integrate_signed(&self, current: f64, target: f64) -> f64 {
        if target >= current {
            self.integrate(current, target)
        } else {
            -self.integrate(target, current)
        }
    }

    fn region_at(&self, beat: f64) -> Region {
        if beat < self.segments[0].start {
            return Region::BeforeFirst;
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if beat < seg.end {
                if beat >= seg.start {
                    return Region::Inside(i);
                }
                return Region::GapAfter(i - 1);
            }
        }
        Region::AfterLast
    }

    /// Upper beat boundary of a region.
    fn region_end(&self, region: Region) -> f64 {
        match region {
            Region::BeforeFirst => self.segments[0].start,
            Region::Inside(i) => self.segments[i].end,
            Region::GapAfter(i) => self.segments[i + 1].start,
            Region::AfterLast => f64::INFINITY,
        }
    }

    fn next_region(&self, region: Region) -> Region {
        match region {
            Region::BeforeFirst => Region::Inside(0),
            Region::Inside(i) if i + 1 < self.segments.len() => {
                if self.segments[i + 1].start > self.segments[i].end {
                    Region::GapAfter(i)
                } else {
                    Region::Inside(i + 1)
                }
            }
            Region::Inside(_) => Region::AfterLast,
            Region::GapAfter(i) => Region::Inside(i + 1),
            Region::AfterLast => Region::AfterLast,
        }
    }

    /// Contribution of one region over `[a, b]`: trapezoid inside a
    /// segment, held value times width elsewhere.
    fn region_integral(&self, region: Region, a: f64, b: f64) -> f64 {
        let width = b - a;
        match region {
            Region::BeforeFirst => self.segments[0].v0 * width,
            Region::GapAfter(i) => self.segments[i].v1 * width,
            Region::AfterLast => self.segments[self.segments.len() - 1].v1 * width,
            Region::Inside(i) => {
                let seg = &self.segments[i];
                (seg.value_at(a) + seg.value_at(b)) / 2.0 * width
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: i32, end: i32, v0: f64, v1: f64) -> SpeedSegment {
        SpeedSegment {
            start_beat: Beat::whole(start),
            end_beat: Beat::whole(end),
            start: v0,
            end: v1,
        }
    }

    fn irregular() -> SpeedProfile {
        // ramp, gap, plateau, gap, ramp down
        SpeedProfile::new(&[
            seg(0, 4, 1.0, 3.0),
            seg(6, 10, 2.0, 2.0),
            seg(12, 16, 4.0, 0.0),
        ])
    }

    #[test]
    fn test_identity() {
        let profile = irregular();
        for b in [-3.0, 0.0, 2.5, 5.0, 11.0, 16.0, 40.0] {
            assert_eq!(profile.integrate(b, b), 0.0);
        }
    }

    #[test]
    fn test_antisymmetry() {
        let profile = irregular();
        for (a, b) in [(0.0, 4.0), (-2.0, 18.0), (5.0, 5.5), (3.0, 13.0)] {
            let fwd = profile.integrate_signed(a, b);
            let bwd = profile.integrate_signed(b, a);
            assert!((fwd + bwd).abs() < 1e-9);
        }
    }

    #[test]
    fn test_additivity() {
        let profile = irregular();
        for (a, c, b) in [(-1.0, 2.0, 5.0), (0.0, 8.0, 20.0), (3.5, 11.0, 13.2)] {
            let whole = profile.integrate(a, b);
            let split = profile.integrate(a, c) + profile.integrate(c, b);
            assert!((whole - split).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_speed() {
        let profile = SpeedProfile::new(&[seg(0, 10, 2.0, 2.0)]);
        assert!((profile.integrate(0.0, 10.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_ramp() {
        let profile = SpeedProfile::new(&[seg(0, 10, 0.0, 2.0)]);
        assert!((profile.integrate(0.0, 10.0) - 10.0).abs() < 1e-9);
        // half the triangle area over the first half
        assert!((profile.integrate(0.0, 5.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_gap_holds_previous_end_value() {
        let profile = SpeedProfile::new(&[seg(0, 4, 1.0, 1.0), seg(8, 12, 2.0, 2.0)]);
        assert!((profile.integrate(4.0, 8.0) - 4.0).abs() < 1e-9);
        assert!((profile.speed_at(6.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolation_before_and_after() {
        let profile = SpeedProfile::new(&[seg(4, 8, 3.0, 3.0)]);
        assert!((profile.integrate(0.0, 4.0) - 12.0).abs() < 1e-9);
        assert!((profile.integrate(8.0, 12.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_entirely_before_first_segment() {
        // A query that begins and ends before any declared segment holds
        // the first segment's start value; there is no other precedent.
        let profile = SpeedProfile::new(&[seg(4, 8, 1.0, 5.0)]);
        assert!((profile.integrate(0.0, 2.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_span_from_before_first_into_segment() {
        let profile = SpeedProfile::new(&[seg(4, 8, 3.0, 3.0)]);
        assert!((profile.integrate(2.0, 6.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_profile_is_zero() {
        let profile = SpeedProfile::default();
        assert_eq!(profile.integrate(-5.0, 100.0), 0.0);
        assert_eq!(profile.speed_at(3.0), 0.0);
    }

    #[test]
    fn test_boundary_to_boundary_segments() {
        let profile = SpeedProfile::new(&[seg(0, 4, 1.0, 2.0), seg(4, 8, 5.0, 5.0)]);
        // trapezoid (1+2)/2*4 then plateau 5*4
        assert!((profile.integrate(0.0, 8.0) - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_first_listed_wins() {
        let profile = SpeedProfile::new(&[seg(0, 4, 1.0, 1.0), seg(2, 6, 10.0, 10.0)]);
        // [0,4] covered by the first segment, [4,6] by the second
        assert!((profile.integrate(0.0, 6.0) - 24.0).abs() < 1e-9);
        assert!((profile.speed_at(3.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_segment_steps_speed() {
        let profile = SpeedProfile::new(&[
            seg(0, 4, 1.0, 1.0),
            seg(4, 4, 1.0, 3.0),
            seg(4, 8, 3.0, 3.0),
        ]);
        assert!((profile.integrate(0.0, 8.0) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_at_interpolates() {
        let profile = SpeedProfile::new(&[seg(0, 10, 0.0, 2.0)]);
        assert!((profile.speed_at(5.0) - 1.0).abs() < 1e-9);
        assert!((profile.speed_at(-1.0) - 0.0).abs() < 1e-9);
        assert!((profile.speed_at(20.0) - 2.0).abs() < 1e-9);
    }
}
