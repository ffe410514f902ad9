pub mod chart;
pub mod config;
pub mod constants;
pub mod generator;
pub mod hit_window;
pub mod note;

pub use chart::Chart;
pub use config::CoreConfig;
pub use constants::*;
pub use generator::{Difficulty, density_chart, pattern_chart};
pub use hit_window::{HitWindow, TierScores};
pub use note::{LiveNote, Note, NoteKind, NoteOutcome};
