//! Chart notes and their live, scheduler-owned counterparts.

use crate::models::stats::Judgement;
use serde::{Deserialize, Serialize};

/// Kind of note in a chart.
///
/// Only plain taps exist today; the tag is kept open so long notes can be
/// added without changing the chart format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Press once when the note reaches the judgment line.
    #[default]
    Normal,
}

/// A single immutable note template produced by chart generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Arrival time at the judgment line, in ms from song start.
    #[serde(rename = "time")]
    pub time_ms: f64,
    /// Lane index (0-based).
    pub lane: usize,
    #[serde(default, rename = "type")]
    pub kind: NoteKind,
}

impl Note {
    /// Creates a normal note.
    pub fn normal(time_ms: f64, lane: usize) -> Self {
        Self {
            time_ms,
            lane,
            kind: NoteKind::Normal,
        }
    }

    /// Elapsed time at which the note becomes live.
    pub fn arm_time_ms(&self, lead_time_ms: f64) -> f64 {
        self.time_ms - lead_time_ms
    }
}

/// Terminal state of a live note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteOutcome {
    /// Consumed by a lane press.
    Hit(Judgement),
    /// Scrolled past the outer window without being pressed.
    Missed,
}

/// A note that is on the highway.
///
/// Created once per chart note by the scheduler; resolves exactly once and
/// is never revived.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveNote {
    note: Note,
    chart_index: usize,
    travel: f64,
    outcome: Option<NoteOutcome>,
}

impl LiveNote {
    pub(crate) fn arm(note: Note, chart_index: usize, spawn_travel: f64) -> Self {
        Self {
            note,
            chart_index,
            travel: spawn_travel,
            outcome: None,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn lane(&self) -> usize {
        self.note.lane
    }

    /// Position of the note in the source chart.
    pub fn chart_index(&self) -> usize {
        self.chart_index
    }

    /// Current scroll distance.
    pub fn travel(&self) -> f64 {
        self.travel
    }

    pub fn outcome(&self) -> Option<NoteOutcome> {
        self.outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Absolute distance between the note and the judgment line.
    pub fn distance_to(&self, judge_line: f64) -> f64 {
        (self.travel - judge_line).abs()
    }

    /// Moves an unresolved note forward. Resolved notes stay where they are.
    pub(crate) fn scroll(&mut self, step: f64) {
        if self.outcome.is_none() {
            self.travel += step;
        }
    }

    /// Sets the terminal outcome. Returns `false` if already resolved.
    pub(crate) fn resolve(&mut self, outcome: NoteOutcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }
}
