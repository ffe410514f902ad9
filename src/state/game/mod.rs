//! Core gameplay engine.
//!
//! `GameEngine` is the explicit per-session object: it owns the chart, the
//! session clock, the note scheduler and the score accumulators, and moves
//! through `Idle → Running ⇄ Paused → Completed → Idle`.
//!
//! The driver calls [`GameEngine::handle_input`] for presses received since
//! the previous tick, then [`GameEngine::tick`] with the frame delta.

mod input;
mod notes;
mod session;
mod snapshot;

pub use notes::{AutoMiss, NoteScheduler};
pub use session::SessionState;

use crate::error::{ConfigError, SessionError};
use crate::logic::audio::{AudioOutput, PlaybackState, SilentOutput};
use crate::logic::clock::SessionClock;
use crate::models::engine::{Chart, CoreConfig};
use crate::models::stats::Judgement;
use crate::shared::snapshot::{CoreEvent, SessionResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    /// Transient: results are being reported before returning to `Idle`.
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
            SessionPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

pub struct GameEngine {
    config: CoreConfig,
    phase: SessionPhase,

    chart: Chart,
    chart_hash: String,

    clock: SessionClock,
    scheduler: NoteScheduler,
    session: SessionState,

    /// Per-lane held state, for the renderer.
    keys_held: Vec<bool>,
    last_judgement: Option<Judgement>,

    events: Vec<CoreEvent>,
    audio: Box<dyn AudioOutput>,
    last_result: Option<SessionResult>,
}

impl GameEngine {
    pub fn new(config: CoreConfig, audio: Box<dyn AudioOutput>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            phase: SessionPhase::Idle,
            chart: Chart::default(),
            chart_hash: String::new(),
            clock: SessionClock::new(),
            scheduler: NoteScheduler::new(&config),
            session: SessionState::default(),
            keys_held: vec![false; config.lane_count],
            last_judgement: None,
            events: Vec::new(),
            audio,
            last_result: None,
        })
    }

    /// Engine with a soundless playback device.
    pub fn silent(config: CoreConfig) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(SilentOutput::new()))
    }

    /// Begins a session. Only valid from `Idle`.
    ///
    /// A chart that breaks the provider contract is replaced by an evenly
    /// spaced fallback chart instead of failing.
    pub fn start(&mut self, chart: Chart) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "start",
            });
        }
        if !self.audio.is_ready() {
            log::warn!("ENGINE: Playback device not ready, session not started");
            return Err(SessionError::PlaybackUnavailable);
        }

        self.clear_session();
        self.chart = self.prepare_chart(chart);
        self.chart_hash = self.chart.hash();
        self.session = SessionState::new(self.chart.len());

        self.clock.start();
        self.audio.play();
        self.phase = SessionPhase::Running;

        log::info!(
            "ENGINE: Session started ({} notes, {:.0} ms)",
            self.chart.len(),
            self.chart.duration_ms()
        );
        Ok(())
    }

    fn prepare_chart(&self, chart: Chart) -> Chart {
        let duration = chart.duration_ms();
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            log::warn!(
                "ENGINE: Unknown song length, using {} ms",
                self.config.default_duration_ms
            );
            self.config.default_duration_ms
        };

        match chart.validate(self.config.lane_count) {
            Ok(()) => Chart::new(chart.into_notes(), duration),
            Err(e) => {
                log::warn!("ENGINE: Unusable chart ({}), using fallback chart", e);
                Chart::fallback(duration, self.config.lane_count)
            }
        }
    }

    /// Advances the session by one frame. Does nothing unless running.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.phase != SessionPhase::Running {
            return;
        }

        let dt = self.clock.advance(dt_ms);
        let now = self.clock.elapsed_ms();

        for miss in self.scheduler.advance(&self.chart, now, dt) {
            self.session.register_miss();
            self.last_judgement = Some(Judgement::Miss);
            self.events.push(CoreEvent::Judged {
                lane: miss.lane,
                judgement: Judgement::Miss,
                at_ms: now,
            });
        }

        if now >= self.chart.duration_ms() {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.phase = SessionPhase::Completed;

        let result = self.session.result(&self.chart_hash);
        log::info!(
            "ENGINE: Session completed - score {}, max combo {}, accuracy {:.1}%",
            result.final_score,
            result.max_combo,
            result.accuracy_percent
        );
        self.events.push(CoreEvent::Completed(result.clone()));
        self.last_result = Some(result);

        self.clear_session();
        self.phase = SessionPhase::Idle;
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Running {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "pause",
            });
        }
        self.clock.pause();
        self.audio.pause();
        self.phase = SessionPhase::Paused;
        log::info!("ENGINE: Paused at {:.0} ms", self.clock.elapsed_ms());
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Paused {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "resume",
            });
        }
        self.clock.resume();
        self.audio.resume();
        self.phase = SessionPhase::Running;
        log::info!("ENGINE: Resumed at {:.0} ms", self.clock.elapsed_ms());
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Aborts any session and returns to `Idle` with zeroed accumulators.
    /// Safe to call repeatedly. The previous run's result is kept.
    pub fn reset(&mut self) {
        if self.phase != SessionPhase::Idle {
            log::info!("ENGINE: Reset from {}", self.phase);
        }
        self.clear_session();
        self.events.clear();
        self.phase = SessionPhase::Idle;
    }

    fn clear_session(&mut self) {
        self.audio.stop();
        self.clock.stop();
        self.scheduler.reset();
        self.session = SessionState::default();
        self.chart = Chart::default();
        self.chart_hash.clear();
        self.keys_held.iter_mut().for_each(|held| *held = false);
        self.last_judgement = None;
    }

    /// Takes the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queues an event raised by the driver, such as a refused start.
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn scheduler(&self) -> &NoteScheduler {
        &self.scheduler
    }

    pub fn keys_held(&self) -> &[bool] {
        &self.keys_held
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn playback(&self) -> PlaybackState {
        self.audio.state()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }
}
