//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` is the hub every thread clones: raw key edges flow to the
//! input thread, gameplay actions to the logic thread, snapshots and core
//! events back out to whoever renders and reports.

use crate::input::events::{GameAction, InputCommand, RawKeyEvent};
use crate::models::engine::Chart;
use crate::shared::snapshot::{CoreEvent, GameplaySnapshot};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Commands for the logic thread that do not come from keys.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Chart used by the next `Start` action.
    LoadChart(Chart),
    SetVolume(f32),
    /// Application shutdown requested.
    Quit,
}

#[derive(Clone)]
pub struct SystemBus {
    /// Host → Input: raw key edges.
    pub raw_input_tx: Sender<RawKeyEvent>,
    pub raw_input_rx: Receiver<RawKeyEvent>,

    /// Commands sent to the input thread.
    pub input_cmd_tx: Sender<InputCommand>,
    pub input_cmd_rx: Receiver<InputCommand>,

    /// Input → Logic: processed gameplay actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Logic → Render: gameplay snapshots.
    pub render_tx: Sender<GameplaySnapshot>,
    pub render_rx: Receiver<GameplaySnapshot>,

    /// Logic → Host: judgments, milestones, results.
    pub event_tx: Sender<CoreEvent>,
    pub event_rx: Receiver<CoreEvent>,

    /// Host → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (raw_input_tx, raw_input_rx) = unbounded();
        let (input_cmd_tx, input_cmd_rx) = unbounded();
        let (action_tx, action_rx) = unbounded();

        // Bounded render channel: max 2 frames queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (event_tx, event_rx) = unbounded();
        let (sys_tx, sys_rx) = unbounded();

        Self {
            raw_input_tx,
            raw_input_rx,
            input_cmd_tx,
            input_cmd_rx,
            action_tx,
            action_rx,
            render_tx,
            render_rx,
            event_tx,
            event_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
