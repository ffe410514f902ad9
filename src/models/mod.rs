//! Data models: notes, charts, judgement tiers, settings and songs.

pub mod engine;
pub mod settings;
pub mod song;
pub mod stats;
