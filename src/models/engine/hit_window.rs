//! Distance thresholds and tier scores used by the judgment engine.

use crate::error::ConfigError;
use crate::models::stats::Judgement;
use serde::{Deserialize, Serialize};

/// Base points awarded per tier before the combo multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScores {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
}

impl TierScores {
    pub fn classic() -> Self {
        Self {
            perfect: 1000,
            great: 800,
            good: 500,
            bad: 100,
        }
    }

    pub fn compact() -> Self {
        Self {
            perfect: 100,
            great: 80,
            good: 50,
            bad: 20,
        }
    }

    pub fn base(&self, judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Good => self.good,
            Judgement::Bad => self.bad,
            Judgement::Miss => 0,
        }
    }
}

impl Default for TierScores {
    fn default() -> Self {
        Self::classic()
    }
}

/// Maximum distances from the judgment line for each tier.
///
/// `bad` doubles as the admission bound: a note farther than `bad` can not be
/// pressed, and one that travels past `judge_line + bad` is a miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindow {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
    pub bad: f64,
    #[serde(default)]
    pub scores: TierScores,
}

impl HitWindow {
    /// 50/100/150/200 with 1000/800/500/100 points.
    pub fn classic() -> Self {
        Self {
            perfect: 50.0,
            great: 100.0,
            good: 150.0,
            bad: 200.0,
            scores: TierScores::classic(),
        }
    }

    /// Tighter windows of the song-library variant: 15/30/50/100 with 100/80/50/20 points.
    pub fn compact() -> Self {
        Self {
            perfect: 15.0,
            great: 30.0,
            good: 50.0,
            bad: 100.0,
            scores: TierScores::compact(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.perfect > 0.0
            && self.perfect < self.great
            && self.great < self.good
            && self.good < self.bad
            && self.bad.is_finite();
        if ordered {
            Ok(())
        } else {
            Err(ConfigError::UnorderedWindows {
                perfect: self.perfect,
                great: self.great,
                good: self.good,
                bad: self.bad,
            })
        }
    }

    /// Whether a press at this distance may select the note.
    pub fn admits(&self, distance: f64) -> bool {
        distance <= self.bad
    }

    /// Tier for a selected note. `None` when outside the admission bound.
    pub fn judge(&self, distance: f64) -> Option<Judgement> {
        let distance = distance.abs();

        if !self.admits(distance) {
            return None;
        }

        if distance <= self.perfect {
            Some(Judgement::Perfect)
        } else if distance <= self.great {
            Some(Judgement::Great)
        } else if distance <= self.good {
            Some(Judgement::Good)
        } else {
            Some(Judgement::Bad)
        }
    }

    pub fn base_score(&self, judgement: Judgement) -> u32 {
        self.scores.base(judgement)
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_boundaries_are_inclusive() {
        let window = HitWindow::classic();
        assert_eq!(window.judge(50.0), Some(Judgement::Perfect));
        assert_eq!(window.judge(50.0001), Some(Judgement::Great));
        assert_eq!(window.judge(100.0), Some(Judgement::Great));
        assert_eq!(window.judge(150.0), Some(Judgement::Good));
        assert_eq!(window.judge(150.5), Some(Judgement::Bad));
        assert_eq!(window.judge(200.0), Some(Judgement::Bad));
        assert_eq!(window.judge(200.0001), None);
    }

    #[test]
    fn judge_uses_absolute_distance() {
        let window = HitWindow::classic();
        assert_eq!(window.judge(-75.0), Some(Judgement::Great));
    }

    #[test]
    fn compact_preset_scores() {
        let window = HitWindow::compact();
        assert_eq!(window.judge(15.0), Some(Judgement::Perfect));
        assert_eq!(window.base_score(Judgement::Good), 50);
        assert_eq!(window.base_score(Judgement::Miss), 0);
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        assert!(HitWindow::classic().validate().is_ok());
        assert!(HitWindow::compact().validate().is_ok());

        let broken = HitWindow {
            perfect: 100.0,
            great: 50.0,
            ..HitWindow::classic()
        };
        assert!(matches!(
            broken.validate(),
            Err(ConfigError::UnorderedWindows { .. })
        ));

        let equal = HitWindow {
            great: 50.0,
            ..HitWindow::classic()
        };
        assert!(equal.validate().is_err());
    }
}
