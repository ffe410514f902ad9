//! Logic thread: the single owner of the gameplay engine.
//!
//! Runs a fixed-timestep loop. Each iteration applies system events, then
//! the actions received since the previous iteration (presses before the
//! tick), then as many engine ticks as the accumulated time allows.

pub mod audio;
pub mod clock;

use crate::input::events::GameAction;
use crate::logic::clock::{FrameTimer, SystemTimeProvider};
use crate::models::engine::Chart;
use crate::shared::snapshot::{CoreEvent, SessionResult};
use crate::state::game::GameEngine;
use crate::system::bus::{SystemBus, SystemEvent};
use std::io;
use std::ops::ControlFlow;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Upper bound of catch-up ticks per iteration.
const MAX_TICKS_PER_LOOP: u32 = 10;

/// Spawns the logic thread. Joins with the last completed result once a
/// `SystemEvent::Quit` arrives.
pub fn start_thread(
    bus: SystemBus,
    engine: GameEngine,
    tick_rate: u32,
) -> io::Result<JoinHandle<Option<SessionResult>>> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started ({} ticks/s)", tick_rate);

            let target_dt_ms = 1000.0 / tick_rate.max(1) as f64;
            let mut timer = FrameTimer::new(SystemTimeProvider::new());
            let mut accumulator = 0.0;
            let mut state = LogicState::new(bus, engine);

            loop {
                // 1. System events, then 2. input actions
                if state.apply_system_events().is_break() || state.apply_actions().is_break() {
                    log::info!("LOGIC: Quit received...");
                    return state.shutdown();
                }

                // 3. Fixed-timestep update loop
                accumulator += timer.sample();
                let mut loops = 0;
                while accumulator >= target_dt_ms && loops < MAX_TICKS_PER_LOOP {
                    state.engine.tick(target_dt_ms);
                    accumulator -= target_dt_ms;
                    loops += 1;
                }
                if loops == MAX_TICKS_PER_LOOP {
                    // Too far behind: drop the backlog instead of spiralling.
                    accumulator = accumulator.min(target_dt_ms);
                }

                // 4. Events out, then a snapshot if anything moved
                state.publish(loops > 0);

                if loops == 0 {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
}

/// Everything the logic thread owns between iterations.
struct LogicState {
    bus: SystemBus,
    engine: GameEngine,
    pending_chart: Option<Chart>,
}

impl LogicState {
    fn new(bus: SystemBus, engine: GameEngine) -> Self {
        Self {
            bus,
            engine,
            pending_chart: None,
        }
    }

    /// Applies queued system events. Breaks on `Quit`.
    fn apply_system_events(&mut self) -> ControlFlow<()> {
        while let Ok(sys_evt) = self.bus.sys_rx.try_recv() {
            match sys_evt {
                SystemEvent::LoadChart(chart) => {
                    log::info!("LOGIC: Chart loaded ({} notes)", chart.len());
                    self.pending_chart = Some(chart);
                }
                SystemEvent::SetVolume(volume) => self.engine.set_volume(volume),
                SystemEvent::Quit => return ControlFlow::Break(()),
            }
        }
        ControlFlow::Continue(())
    }

    /// Applies queued gameplay actions. Breaks when a `Quit` turns up while
    /// a start is being prepared.
    fn apply_actions(&mut self) -> ControlFlow<()> {
        while let Ok(action) = self.bus.action_rx.try_recv() {
            match action {
                GameAction::Start => {
                    // A chart sent before this Start may still sit on the
                    // system channel.
                    if self.apply_system_events().is_break() {
                        return ControlFlow::Break(());
                    }
                    self.start_session();
                }
                other => self.engine.handle_input(other),
            }
        }
        ControlFlow::Continue(())
    }

    fn start_session(&mut self) {
        let chart = self.pending_chart.clone().unwrap_or_default();
        if let Err(e) = self.engine.start(chart) {
            log::warn!("LOGIC: Start rejected: {}", e);
            self.engine.push_event(CoreEvent::StartRejected {
                reason: e.to_string(),
            });
        }
    }

    fn publish(&mut self, moved: bool) {
        for event in self.engine.drain_events() {
            if self.bus.event_tx.send(event).is_err() {
                log::error!("LOGIC: Event receiver gone");
            }
        }
        if moved {
            let _ = self.bus.render_tx.try_send(self.engine.snapshot());
        }
    }

    fn shutdown(mut self) -> Option<SessionResult> {
        self.engine.reset();
        self.engine.last_result().cloned()
    }
}
