//! Read-only data handed out by the logic thread.
//!
//! Snapshots are immutable captures of the session sent to whoever draws
//! the highway. Results and events go to the result reporter. Nothing here
//! points back into the engine.

use crate::models::engine::NoteOutcome;
use crate::models::stats::{HitStats, Judgement};
use crate::state::game::SessionPhase;
use serde::{Deserialize, Serialize};

/// One note on the highway.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveNoteView {
    /// Index of the note in the chart. Stable for the whole session.
    pub id: usize,
    pub lane: usize,
    pub travel: f64,
    pub resolved: bool,
    pub outcome: Option<NoteOutcome>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionView {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
}

/// Snapshot of gameplay state for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct GameplaySnapshot {
    pub phase: SessionPhase,
    /// Session time in ms, pauses excluded.
    pub elapsed_ms: f64,
    pub duration_ms: f64,
    /// Travel value of the judgment line.
    pub judge_line: f64,
    pub live_notes: Vec<LiveNoteView>,
    pub session: SessionView,
    pub hit_stats: HitStats,
    /// Per-lane key held state.
    pub keys_held: Vec<bool>,
    pub last_judgement: Option<Judgement>,
    /// Chart notes not yet resolved, armed or not.
    pub remaining_notes: usize,
}

/// End-of-run report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub final_score: u64,
    pub max_combo: u32,
    /// Hit notes over total notes, rounded to one decimal.
    pub accuracy_percent: f64,
    pub total_notes: u32,
    pub hit_notes: u32,
    pub hit_stats: HitStats,
    /// MD5 of the chart that was played.
    pub chart_hash: String,
}

/// Timed events emitted by the engine. Display timeouts belong to the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum CoreEvent {
    /// A note was resolved, by a press or by scrolling out.
    Judged {
        lane: usize,
        judgement: Judgement,
        at_ms: f64,
    },
    /// Combo reached a multiple of the milestone step.
    ComboMilestone { combo: u32 },
    Completed(SessionResult),
    /// A start request was refused; the engine stays idle.
    StartRejected { reason: String },
}
