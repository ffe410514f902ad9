//! Autoplay input source.
//!
//! Watches render snapshots and emits the key edges a perfect player would,
//! through the same raw-input path as a keyboard.

use super::events::RawKeyEvent;
use crate::shared::snapshot::GameplaySnapshot;
use std::collections::HashSet;

pub struct AutoPlayer {
    lane_keys: Vec<String>,
    /// Press once a note is this close to the line, early side.
    lead_distance: f64,
    pressed_notes: HashSet<usize>,
    held_keys: Vec<String>,
}

impl AutoPlayer {
    pub fn new(lane_keys: Vec<String>) -> Self {
        Self {
            lane_keys,
            lead_distance: 0.0,
            pressed_notes: HashSet::new(),
            held_keys: Vec::new(),
        }
    }

    pub fn with_lead_distance(mut self, distance: f64) -> Self {
        self.lead_distance = distance;
        self
    }

    /// Key edges for this frame: releases for last frame's presses, then at
    /// most one press per lane.
    pub fn react(&mut self, snapshot: &GameplaySnapshot) -> Vec<RawKeyEvent> {
        let mut events: Vec<RawKeyEvent> = self
            .held_keys
            .drain(..)
            .map(|key| RawKeyEvent::release(&key))
            .collect();

        let visible: HashSet<usize> = snapshot.live_notes.iter().map(|n| n.id).collect();
        self.pressed_notes.retain(|id| visible.contains(id));

        let mut lanes_used = HashSet::new();
        let trigger = snapshot.judge_line - self.lead_distance;
        for note in &snapshot.live_notes {
            if note.resolved || note.travel < trigger || self.pressed_notes.contains(&note.id) {
                continue;
            }
            let Some(key) = self.lane_keys.get(note.lane) else {
                continue;
            };
            if !lanes_used.insert(note.lane) {
                continue;
            }

            self.pressed_notes.insert(note.id);
            events.push(RawKeyEvent::press(key));
            self.held_keys.push(key.clone());
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::HitStats;
    use crate::shared::snapshot::{LiveNoteView, SessionView};
    use crate::state::game::SessionPhase;

    fn snapshot(notes: &[(usize, usize, f64)]) -> GameplaySnapshot {
        GameplaySnapshot {
            phase: SessionPhase::Running,
            elapsed_ms: 0.0,
            duration_ms: 10_000.0,
            judge_line: 400.0,
            live_notes: notes
                .iter()
                .map(|&(id, lane, travel)| LiveNoteView {
                    id,
                    lane,
                    travel,
                    resolved: false,
                    outcome: None,
                })
                .collect(),
            session: SessionView::default(),
            hit_stats: HitStats::new(),
            keys_held: vec![false; 6],
            last_judgement: None,
            remaining_notes: notes.len(),
        }
    }

    fn keys() -> Vec<String> {
        ["KeyS", "KeyD", "KeyF", "KeyJ", "KeyK", "KeyL"]
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn presses_when_note_reaches_line() {
        let mut bot = AutoPlayer::new(keys());
        assert!(bot.react(&snapshot(&[(0, 2, 390.0)])).is_empty());

        let events = bot.react(&snapshot(&[(0, 2, 401.0)]));
        assert_eq!(events, vec![RawKeyEvent::press("KeyF")]);

        // released next frame, not pressed again
        let events = bot.react(&snapshot(&[(0, 2, 402.0)]));
        assert_eq!(events, vec![RawKeyEvent::release("KeyF")]);
    }

    #[test]
    fn one_press_per_lane_per_frame() {
        let mut bot = AutoPlayer::new(keys()).with_lead_distance(10.0);
        let events = bot.react(&snapshot(&[(0, 1, 395.0), (1, 1, 395.0), (2, 4, 400.0)]));
        assert_eq!(
            events,
            vec![RawKeyEvent::press("KeyD"), RawKeyEvent::press("KeyK")]
        );

        let events = bot.react(&snapshot(&[(1, 1, 396.0)]));
        assert_eq!(
            events,
            vec![
                RawKeyEvent::release("KeyD"),
                RawKeyEvent::release("KeyK"),
                RawKeyEvent::press("KeyD"),
            ]
        );
    }
}
