//! Per-session accumulators: score, combo, note counts.

use crate::models::engine::COMBO_STEP;
use crate::models::stats::{HitStats, Judgement};
use crate::shared::snapshot::{SessionResult, SessionView};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub total_notes: u32,
    pub hit_notes: u32,
    pub stats: HitStats,
}

impl SessionState {
    pub fn new(total_notes: usize) -> Self {
        Self {
            total_notes: total_notes as u32,
            ..Self::default()
        }
    }

    /// Streak multiplier for the next hit: one step per ten combo, at least 1.
    pub fn multiplier(&self) -> u32 {
        (self.combo / COMBO_STEP).max(1)
    }

    /// Applies a hit and returns the points gained.
    ///
    /// The multiplier is read from the combo before this hit counts.
    pub fn register_hit(&mut self, judgement: Judgement, base_score: u32) -> u64 {
        let gained = base_score as u64 * self.multiplier() as u64;
        self.score += gained;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.hit_notes += 1;
        self.stats.record(judgement);
        gained
    }

    pub fn register_miss(&mut self) {
        self.combo = 0;
        self.stats.record(Judgement::Miss);
    }

    /// Hit notes over total notes as a percentage with one decimal.
    pub fn accuracy_percent(&self) -> f64 {
        if self.total_notes == 0 {
            return 0.0;
        }
        let ratio = self.hit_notes as f64 / self.total_notes as f64;
        (ratio * 1000.0).round() / 10.0
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
        }
    }

    pub fn result(&self, chart_hash: &str) -> SessionResult {
        SessionResult {
            final_score: self.score,
            max_combo: self.max_combo,
            accuracy_percent: self.accuracy_percent(),
            total_notes: self.total_notes,
            hit_notes: self.hit_notes,
            hit_stats: self.stats.clone(),
            chart_hash: chart_hash.to_string(),
        }
    }
}
