//! Exact beat fractions.
//!
//! Chart files state beat positions as `integer + num / den` so that tempo-
//! relative timing data never accumulates floating point error. `den == 0`
//! marks a bare integer beat with no fractional part.

use serde::{Deserialize, Serialize};

/// A beat position stated as `integer + num / den`.
///
/// When `den == 0` the fractional part is absent and `num` is ignored.
/// The fraction fields are unsigned; the sign lives in `integer`, so a
/// negative denominator in a chart file is rejected at deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub integer: i32,
    pub den: u32,
    pub num: u32,
}

impl Beat {
    pub fn new(integer: i32, num: u32, den: u32) -> Self {
        Self { integer, den, num }
    }

    /// Bare integer beat with no fractional part.
    pub fn whole(integer: i32) -> Self {
        Self {
            integer,
            den: 0,
            num: 0,
        }
    }

    /// Decimal value of the fraction.
    pub fn value(&self) -> f64 {
        if self.den == 0 {
            self.integer as f64
        } else {
            self.integer as f64 + self.num as f64 / self.den as f64
        }
    }

    /// `-1` is reserved to mean "not applicable", e.g. a note that is
    /// visible from the start of the chart.
    pub fn is_sentinel(&self) -> bool {
        self.value() == -1.0
    }
}
