//! Session state: the per-session gameplay engine.

pub mod game;

pub use game::{GameEngine, SessionPhase, SessionState};
