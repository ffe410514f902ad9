//! Hit statistics and judgement types.
//!
//! This module defines the judgement tiers used for scoring and the
//! per-session counters the result screen is built from.

use std::fmt;

/// Judgement tiers from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Judgement {
    /// Within the tightest distance window.
    Perfect,
    /// Within the second window.
    Great,
    /// Within the third window.
    Good,
    /// Inside the outer admission window.
    Bad,
    /// Scrolled past the outer window unpressed.
    Miss,
}

impl Judgement {
    /// Every tier, best first.
    pub const ALL: [Judgement; 5] = [
        Judgement::Perfect,
        Judgement::Great,
        Judgement::Good,
        Judgement::Bad,
        Judgement::Miss,
    ];

    /// Returns true for every tier that keeps the combo alive.
    pub fn is_hit(&self) -> bool {
        !matches!(self, Judgement::Miss)
    }

    /// Upper-case label shown by the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Judgement::Perfect => "PERFECT",
            Judgement::Great => "GREAT",
            Judgement::Good => "GOOD",
            Judgement::Bad => "BAD",
            Judgement::Miss => "MISS",
        }
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulated hit statistics for a play session.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HitStats {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
}

impl HitStats {
    /// Creates empty hit statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Perfect => self.perfect += 1,
            Judgement::Great => self.great += 1,
            Judgement::Good => self.good += 1,
            Judgement::Bad => self.bad += 1,
            Judgement::Miss => self.miss += 1,
        }
    }

    pub fn count(&self, judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Good => self.good,
            Judgement::Bad => self.bad,
            Judgement::Miss => self.miss,
        }
    }

    /// Notes consumed by a press, whatever the tier.
    pub fn hits(&self) -> u32 {
        self.perfect + self.great + self.good + self.bad
    }

    /// Notes that reached a terminal state.
    pub fn judged(&self) -> u32 {
        self.hits() + self.miss
    }
}
