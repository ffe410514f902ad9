//! Six-lane note highway rhythm game core.
//!
//! The crate is split the same way the game runs:
//! - `models`: notes, charts, hit windows, settings and the song library format
//! - `state::game`: the per-session engine (scheduler, judgment, session state)
//! - `logic`: session clock, playback seam and the fixed-timestep logic thread
//! - `input`: key mapping, repeat suppression and the input thread
//! - `shared` / `system`: snapshots and the channels connecting threads

pub mod error;
pub mod input;
pub mod logic;
pub mod models;
pub mod shared;
pub mod state;
pub mod system;
