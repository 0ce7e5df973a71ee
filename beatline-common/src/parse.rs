//! JSON chart parser.
//!
//! Deserializes the chart schema consumed by the engine — a BPM change
//! list plus per-line speed segments and notes — and converts the raw
//! structures into the engine model in one pass. An empty BPM list fails
//! the load; a malformed note is skipped with a warning and the rest of
//! the chart survives.

use crate::core::{
    Beat, BpmChange, Chart, JudgeLine, Note, NoteKind, SpeedProfile, SpeedSegment, Timeline,
};
use anyhow::{bail, Context, Result};
use serde::Deserialize;

fn f64_one() -> f64 {
    1.0
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    /// Audio sync offset in milliseconds.
    #[serde(default)]
    offset: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChart {
    #[serde(rename = "META", default)]
    meta: RawMeta,
    #[serde(default)]
    bpm_list: Vec<BpmChange>,
    #[serde(default)]
    judge_line_list: Vec<RawJudgeLine>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJudgeLine {
    #[serde(default)]
    speed: Vec<SpeedSegment>,
    #[serde(default)]
    notes: Vec<RawNote>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNote {
    #[serde(rename = "type")]
    kind: i32,
    /// Beat-space offset before the hit at which the note appears; the
    /// sentinel `-1` (or absence) means the note is always visible.
    appear_beat: Option<Beat>,
    data: Option<Vec<RawHit>>,
    #[serde(default = "f64_one")]
    speed: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHit {
    hit_beat: Beat,
    #[serde(default)]
    position: f64,
}

/// Parse a chart from its JSON source.
pub fn parse_chart(source: &str) -> Result<Chart> {
    let raw: RawChart = serde_json::from_str(source).context("chart JSON parse failed")?;
    if raw.bpm_list.is_empty() {
        bail!("chart has no BPM changes");
    }
    let timeline = Timeline::new(&raw.bpm_list).context("invalid BPM list")?;
    let lines = raw
        .judge_line_list
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_judge_line(index, line))
        .collect();
    Ok(Chart::new(raw.meta.offset as f64 / 1000.0, timeline, lines))
}

fn parse_judge_line(index: usize, raw: RawJudgeLine) -> JudgeLine {
    let speed = SpeedProfile::new(&raw.speed);
    let mut notes = Vec::new();
    for raw_note in raw.notes {
        let kind = match raw_note.kind {
            1 => NoteKind::Click,
            2 => NoteKind::Hold,
            3 => NoteKind::Flick,
            4 => NoteKind::Drag,
            other => {
                log::warn!("line {index}: unknown note type {other}, treating as click");
                NoteKind::Click
            }
        };
        let hits = match raw_note.data {
            Some(hits) if !hits.is_empty() => hits,
            _ => {
                log::warn!("line {index}: note without hit data, skipped");
                continue;
            }
        };
        let appear_offset = raw_note.appear_beat.filter(|b| !b.is_sentinel());
        for hit in hits {
            let hit_beat = hit.hit_beat.value();
            notes.push(Note {
                kind,
                hit_beat,
                position: hit.position,
                speed: raw_note.speed,
                // offsets are stated directly in beats, no integration here
                appear_beat: appear_offset.map(|offset| hit_beat - offset.value()),
            });
        }
    }
    notes.sort_by(|a, b| a.hit_beat.total_cmp(&b.hit_beat));
    JudgeLine { speed, notes }
}
