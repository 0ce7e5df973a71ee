//! Beatline — chart data model and beat–time simulation math.

pub mod core;
pub mod parse;

pub use anyhow::Result;
