//! Procedural chart generation.
//!
//! Generators sit outside the judgment core: they only have to hand back a
//! sorted [`Chart`]. Two strategies exist, a measure-pattern generator for
//! the built-in song and a per-beat density roll for library songs.

use super::chart::Chart;
use super::note::Note;
use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BEATS_PER_MEASURE: usize = 4;

type Measure = [Option<usize>; BEATS_PER_MEASURE];

const EASY_PATTERNS: &[Measure] = &[
    [Some(0), None, Some(2), None],
    [Some(1), None, Some(3), None],
    [None, Some(2), None, Some(4)],
    [Some(0), None, Some(1), None],
    [Some(3), None, Some(5), None],
];

const NORMAL_PATTERNS: &[Measure] = &[
    [Some(0), Some(2), None, Some(4)],
    [Some(1), None, Some(3), Some(0)],
    [Some(2), Some(4), Some(1), None],
    [None, Some(3), Some(0), Some(2)],
    [Some(4), None, Some(1), Some(3)],
    [Some(5), Some(1), None, Some(4)],
    [Some(0), None, Some(5), Some(2)],
];

const HARD_PATTERNS: &[Measure] = &[
    [Some(0), Some(2), Some(4), Some(1)],
    [Some(1), Some(3), Some(0), Some(4)],
    [Some(2), Some(0), Some(3), Some(1)],
    [Some(4), Some(2), Some(1), Some(0)],
    [Some(0), Some(1), Some(2), Some(3)],
    [Some(3), Some(4), Some(0), Some(2)],
    [Some(1), Some(4), Some(3), Some(0)],
    [Some(5), Some(0), Some(3), Some(1)],
    [Some(2), Some(5), Some(4), Some(0)],
];

/// Chart difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[serde(alias = "beginner")]
    Easy,
    Normal,
    #[serde(alias = "hyper")]
    Hard,
}

impl Difficulty {
    /// Level number shown in the song list.
    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 5,
            Difficulty::Hard => 8,
        }
    }

    /// Probability of a note on each beat for the density generator.
    pub fn density(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Normal => 0.6,
            Difficulty::Hard => 0.8,
        }
    }

    /// Probability of keeping each pattern slot for the pattern generator.
    pub fn notes_per_beat(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Normal => 0.5,
            Difficulty::Hard => 0.8,
        }
    }

    fn patterns(&self) -> &'static [Measure] {
        match self {
            Difficulty::Easy => EASY_PATTERNS,
            Difficulty::Normal => NORMAL_PATTERNS,
            Difficulty::Hard => HARD_PATTERNS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" | "hyper" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

fn beat_interval_ms(bpm: f64) -> f64 {
    60_000.0 / bpm
}

/// Measure-pattern chart: each measure takes the next pattern in the
/// difficulty's table and keeps each slot with `notes_per_beat` probability.
/// Slots pointing at lanes outside `lane_count` are dropped.
pub fn pattern_chart<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: Difficulty,
    bpm: f64,
    duration_ms: f64,
    lane_count: usize,
) -> Chart {
    if !(bpm > 0.0) || !(duration_ms > 0.0) {
        return Chart::new(Vec::new(), duration_ms.max(0.0));
    }

    let interval = beat_interval_ms(bpm);
    let total_beats = duration_ms / interval;
    let total_measures = (total_beats / BEATS_PER_MEASURE as f64).floor() as usize;
    let patterns = difficulty.patterns();
    let keep = difficulty.notes_per_beat();

    let mut notes = Vec::new();
    for measure in 0..total_measures {
        let pattern = &patterns[measure % patterns.len()];
        for (beat, slot) in pattern.iter().enumerate() {
            // Roll for every slot so the random stream does not depend on the layout.
            let roll: f64 = rng.random();
            let Some(lane) = *slot else { continue };
            if roll < keep && lane < lane_count {
                let time = (measure * BEATS_PER_MEASURE + beat) as f64 * interval;
                notes.push(Note::normal(time, lane));
            }
        }
    }

    Chart::from_unsorted(notes, duration_ms)
}

/// Per-beat density chart with uniformly random lanes.
pub fn density_chart<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: Difficulty,
    bpm: f64,
    duration_ms: f64,
    lane_count: usize,
) -> Chart {
    if !(bpm > 0.0) || !(duration_ms > 0.0) || lane_count == 0 {
        return Chart::new(Vec::new(), duration_ms.max(0.0));
    }

    let interval = beat_interval_ms(bpm);
    let total_beats = (duration_ms / interval).floor() as usize;
    let density = difficulty.density();

    let mut notes = Vec::new();
    for beat in 0..total_beats {
        if rng.random::<f64>() < density {
            let lane = rng.random_range(0..lane_count);
            notes.push(Note::normal(beat as f64 * interval, lane));
        }
    }

    Chart::from_unsorted(notes, duration_ms)
}
