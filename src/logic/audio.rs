//! Playback device seam.
//!
//! The engine only tells the device when to play, pause, resume and stop.
//! Decoding and mixing live behind this trait in whatever front-end hosts
//! the core.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Controls for the song's audio output.
pub trait AudioOutput: Send {
    /// Whether a session may start. An unready device blocks `start`.
    fn is_ready(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn state(&self) -> PlaybackState;
}

/// Device without sound. Tracks the requested state so the headless driver
/// and tests can observe what the engine asked for.
#[derive(Debug, Clone)]
pub struct SilentOutput {
    ready: bool,
    state: PlaybackState,
    volume: f32,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self {
            ready: true,
            state: PlaybackState::Stopped,
            volume: 1.0,
        }
    }

    /// A device that never becomes ready.
    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for SilentOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for SilentOutput {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}
