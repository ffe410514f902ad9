use super::events::{GameAction, RawKeyEvent};
use std::collections::{HashMap, HashSet};

/// Maps key codes to actions and filters repeats.
///
/// Only the first press edge of a held key gets through; the matching
/// release clears it.
pub struct InputManager {
    bindings: HashMap<String, GameAction>,
    held: HashSet<String>,
}

impl InputManager {
    pub fn new(lane_keys: &[String]) -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
            held: HashSet::new(),
        };
        manager.load_default_bindings();
        manager.reload_keybinds(lane_keys);
        manager
    }

    pub fn process(&mut self, event: RawKeyEvent) -> Option<GameAction> {
        if event.pressed {
            if event.repeat || !self.held.insert(event.key.clone()) {
                return None;
            }
        } else if !self.held.remove(&event.key) {
            // Release without a press we saw (focus change, startup).
            return None;
        }

        match (event.pressed, *self.bindings.get(&event.key)?) {
            (true, action) => Some(action),
            (false, GameAction::Hit { lane }) => Some(GameAction::Release { lane }),
            (false, _) => None,
        }
    }

    /// Rebinds lane keys. Unknown lanes beyond the list keep no binding.
    pub fn reload_keybinds(&mut self, lane_keys: &[String]) {
        if lane_keys.is_empty() {
            log::warn!("INPUT: Empty keybind list ignored");
            return;
        }

        self.bindings
            .retain(|_, action| !matches!(action, GameAction::Hit { .. }));
        for (lane, key) in lane_keys.iter().enumerate() {
            if let Some(previous) = self.bindings.insert(key.clone(), GameAction::Hit { lane }) {
                log::warn!("INPUT: {} was bound to {:?}, now lane {}", key, previous, lane);
            }
        }
        log::info!("INPUT: Lane keys {:?}", lane_keys);
    }

    pub fn binding(&self, key: &str) -> Option<GameAction> {
        self.bindings.get(key).copied()
    }

    fn load_default_bindings(&mut self) {
        self.bindings
            .insert("Space".to_string(), GameAction::TogglePause);
        self.bindings.insert("Escape".to_string(), GameAction::Reset);
        self.bindings.insert("Enter".to_string(), GameAction::Start);
    }
}
