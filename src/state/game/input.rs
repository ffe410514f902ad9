//! Input handling for GameEngine - lane presses, releases and control actions.

use super::{GameEngine, SessionPhase};
use crate::input::events::GameAction;
use crate::models::engine::{COMBO_MILESTONE, NoteOutcome};
use crate::models::stats::Judgement;
use crate::shared::snapshot::CoreEvent;

impl GameEngine {
    /// Handles a gameplay action from the input thread.
    ///
    /// `Start` needs a chart and is handled by the driver.
    pub fn handle_input(&mut self, action: GameAction) {
        match action {
            GameAction::Hit { lane } => {
                self.on_lane_press(lane);
            }
            GameAction::Release { lane } => self.on_lane_release(lane),
            GameAction::TogglePause => {
                if let Err(e) = self.toggle_pause() {
                    log::debug!("ENGINE: {}", e);
                }
            }
            GameAction::Reset => self.reset(),
            GameAction::Start => {}
        }
    }

    /// Judges a press on `lane` against the closest admissible note.
    ///
    /// Returns `None` when not running, when the lane does not exist, or
    /// when nothing is close enough. None of these affect score or combo.
    /// The held flag is set in every phase, like releases clear it.
    pub fn on_lane_press(&mut self, lane: usize) -> Option<Judgement> {
        *self.keys_held.get_mut(lane)? = true;
        if self.phase != SessionPhase::Running {
            return None;
        }

        let window = self.config.hit_window;
        let (index, distance) = self.scheduler.closest_candidate(lane, window.bad)?;
        let judgement = window.judge(distance)?;
        self.scheduler.resolve(index, NoteOutcome::Hit(judgement))?;

        self.session
            .register_hit(judgement, window.base_score(judgement));
        self.last_judgement = Some(judgement);

        let at_ms = self.clock.elapsed_ms();
        self.events.push(CoreEvent::Judged {
            lane,
            judgement,
            at_ms,
        });

        let combo = self.session.combo;
        if combo % COMBO_MILESTONE == 0 {
            self.events.push(CoreEvent::ComboMilestone { combo });
        }

        Some(judgement)
    }

    /// Clears the held flag. Never judges.
    pub fn on_lane_release(&mut self, lane: usize) {
        if let Some(held) = self.keys_held.get_mut(lane) {
            *held = false;
        }
    }
}
