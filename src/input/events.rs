//! Input-side messages: raw key edges in, gameplay actions out.

/// A key edge as delivered by the host window or terminal.
///
/// Keys are identified by their physical code name (`"KeyS"`, `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: String,
    pub pressed: bool,
    /// Set by the host for OS auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn press(key: &str) -> Self {
        Self {
            key: key.to_string(),
            pressed: true,
            repeat: false,
        }
    }

    pub fn release(key: &str) -> Self {
        Self {
            key: key.to_string(),
            pressed: false,
            repeat: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    // Gameplay
    Hit { lane: usize },
    Release { lane: usize },

    // Session control
    Start,
    TogglePause,
    Reset,
}

#[derive(Debug, Clone)]
pub enum InputCommand {
    /// Replaces the lane keys, one key code per lane.
    ReloadKeybinds(Vec<String>),
    Shutdown,
}
