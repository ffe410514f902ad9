//! Note scheduler - arming, scrolling, auto-miss and candidate lookup.
//!
//! The scheduler is the only owner of live notes. The judgment side reaches
//! them through `closest_candidate` and `resolve`.

use crate::models::engine::{Chart, CoreConfig, LiveNote, NoteOutcome};
use ordered_float::OrderedFloat;

/// A note that scrolled past the outer window during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoMiss {
    pub chart_index: usize,
    pub lane: usize,
}

#[derive(Debug, Clone)]
pub struct NoteScheduler {
    /// Index of the next chart note to arm. Never moves backwards.
    cursor: usize,
    live: Vec<LiveNote>,
    lead_time_ms: f64,
    note_speed: f64,
    spawn_travel: f64,
    judge_line: f64,
    miss_boundary: f64,
}

impl NoteScheduler {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            cursor: 0,
            live: Vec::new(),
            lead_time_ms: config.lead_time_ms,
            note_speed: config.note_speed,
            spawn_travel: config.spawn_travel(),
            judge_line: config.judge_line_position,
            miss_boundary: config.miss_boundary(),
        }
    }

    /// Drops every live note and rewinds the cursor.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.live.clear();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Armed notes, in arming order. Notes resolved during the last
    /// `advance` are still present until the next one.
    pub fn live_notes(&self) -> &[LiveNote] {
        &self.live
    }

    pub fn unresolved_count(&self) -> usize {
        self.live.iter().filter(|n| !n.is_resolved()).count()
    }

    /// Runs one tick: prune, arm, scroll, auto-miss.
    ///
    /// `dt_ms` is the frame delta already filtered by the session clock, so a
    /// paused session never reaches here and never catches up afterwards.
    pub fn advance(&mut self, chart: &Chart, elapsed_ms: f64, dt_ms: f64) -> Vec<AutoMiss> {
        self.live.retain(|n| !n.is_resolved());

        let notes = chart.notes();
        while let Some(note) = notes.get(self.cursor) {
            if note.arm_time_ms(self.lead_time_ms) > elapsed_ms {
                break;
            }
            self.live
                .push(LiveNote::arm(*note, self.cursor, self.spawn_travel));
            self.cursor += 1;
        }

        let step = self.note_speed * dt_ms / 1000.0;
        let mut missed = Vec::new();
        for live in &mut self.live {
            live.scroll(step);
            if live.travel() > self.miss_boundary && live.resolve(NoteOutcome::Missed) {
                missed.push(AutoMiss {
                    chart_index: live.chart_index(),
                    lane: live.lane(),
                });
            }
        }

        missed
    }

    /// Closest unresolved note in `lane` within `admission` of the line.
    /// Returns its live index and distance. Ties go to the earliest armed.
    pub fn closest_candidate(&self, lane: usize, admission: f64) -> Option<(usize, f64)> {
        self.live
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.is_resolved() && n.lane() == lane)
            .map(|(i, n)| (i, n.distance_to(self.judge_line)))
            .filter(|&(_, distance)| distance <= admission)
            .min_by_key(|&(_, distance)| OrderedFloat(distance))
    }

    /// Resolves a live note. `None` if the index is stale or already resolved.
    pub fn resolve(&mut self, index: usize, outcome: NoteOutcome) -> Option<&LiveNote> {
        let live = self.live.get_mut(index)?;
        if live.resolve(outcome) {
            Some(live)
        } else {
            None
        }
    }
}
