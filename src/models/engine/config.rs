//! Gameplay configuration record.
//!
//! Every variant of the game (lane count, line position, scroll speed,
//! windows and tier points) is expressed through this one record.

use super::constants::{
    DEFAULT_DURATION_MS, JUDGE_LINE_POSITION, LEAD_TIME_MS, NOTE_SPEED, NUM_LANES,
};
use super::hit_window::HitWindow;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub lane_count: usize,
    /// Travel value of the judgment line.
    pub judge_line_position: f64,
    /// Travel units per second.
    pub note_speed: f64,
    /// Notes are armed this many ms before their arrival time.
    pub lead_time_ms: f64,
    /// Used when the chart provider reports no usable duration.
    pub default_duration_ms: f64,
    pub hit_window: HitWindow,
}

impl CoreConfig {
    /// Classic layout: 6 lanes, line at 400, 200 units/s, 2 s lead.
    pub fn classic() -> Self {
        Self {
            lane_count: NUM_LANES,
            judge_line_position: JUDGE_LINE_POSITION,
            note_speed: NOTE_SPEED,
            lead_time_ms: LEAD_TIME_MS,
            default_duration_ms: DEFAULT_DURATION_MS,
            hit_window: HitWindow::classic(),
        }
    }

    pub fn with_hit_window(mut self, hit_window: HitWindow) -> Self {
        self.hit_window = hit_window;
        self
    }

    /// Travel of a freshly armed note: exactly one lead time away from the
    /// line, so a note reaches the line at its `time`.
    pub fn spawn_travel(&self) -> f64 {
        self.judge_line_position - self.note_speed * self.lead_time_ms / 1000.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        if !(self.note_speed > 0.0 && self.note_speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.note_speed));
        }
        if !(self.lead_time_ms >= 0.0 && self.lead_time_ms.is_finite()) {
            return Err(ConfigError::InvalidLeadTime(self.lead_time_ms));
        }
        self.hit_window.validate()
    }

    /// Travel past which an unresolved note is declared missed.
    pub fn miss_boundary(&self) -> f64 {
        self.judge_line_position + self.hit_window.bad
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_valid() {
        let config = CoreConfig::classic();
        assert!(config.validate().is_ok());
        assert_eq!(config.miss_boundary(), 600.0);
        assert_eq!(config.spawn_travel(), 0.0);
    }

    #[test]
    fn spawn_travel_follows_speed_and_lead() {
        let mut config = CoreConfig::classic();
        config.note_speed = 400.0;
        config.lead_time_ms = 1500.0;
        assert_eq!(config.spawn_travel(), -200.0);

        let arrival = config.spawn_travel() + config.note_speed * config.lead_time_ms / 1000.0;
        assert_eq!(arrival, config.judge_line_position);
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut config = CoreConfig::classic();
        config.lane_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoLanes));

        let mut config = CoreConfig::classic();
        config.note_speed = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(0.0)));

        let mut config = CoreConfig::classic();
        config.lead_time_ms = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidLeadTime(-1.0)));
    }
}
