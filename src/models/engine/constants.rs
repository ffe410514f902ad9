//! Gameplay constants for the classic six-lane layout.

/// Number of key lanes.
pub const NUM_LANES: usize = 6;

/// Travel distance at which notes meet the judgment line.
pub const JUDGE_LINE_POSITION: f64 = 400.0;

/// Scroll speed in travel units per second.
pub const NOTE_SPEED: f64 = 200.0;

/// How long before its arrival time a note is armed (in ms).
pub const LEAD_TIME_MS: f64 = 2000.0;

/// Song length used when the chart provider does not know the duration (3 minutes).
pub const DEFAULT_DURATION_MS: f64 = 180_000.0;

/// Spacing of the synthesized fallback chart (one beat at 120 BPM).
pub const FALLBACK_NOTE_INTERVAL_MS: f64 = 500.0;

/// Combo interval at which a milestone event is emitted.
pub const COMBO_MILESTONE: u32 = 50;

/// Combo steps per score multiplier increment.
pub const COMBO_STEP: u32 = 10;
