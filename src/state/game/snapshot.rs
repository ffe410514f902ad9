//! Snapshot creation for GameEngine.

use super::GameEngine;
use crate::shared::snapshot::{GameplaySnapshot, LiveNoteView};

impl GameEngine {
    /// Read-only capture of the session for rendering.
    pub fn snapshot(&self) -> GameplaySnapshot {
        let live_notes = self
            .scheduler
            .live_notes()
            .iter()
            .map(|n| LiveNoteView {
                id: n.chart_index(),
                lane: n.lane(),
                travel: n.travel(),
                resolved: n.is_resolved(),
                outcome: n.outcome(),
            })
            .collect();

        let not_armed = self.chart.len() - self.scheduler.cursor();

        GameplaySnapshot {
            phase: self.phase,
            elapsed_ms: self.clock.elapsed_ms(),
            duration_ms: self.chart.duration_ms(),
            judge_line: self.config.judge_line_position,
            live_notes,
            session: self.session.view(),
            hit_stats: self.session.stats.clone(),
            keys_held: self.keys_held.clone(),
            last_judgement: self.last_judgement,
            remaining_notes: not_armed + self.scheduler.unresolved_count(),
        }
    }
}
