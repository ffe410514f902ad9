//! Input thread bootstrapping and raw key routing.

pub mod autoplay;
pub mod events;
pub mod manager;

use crate::input::events::InputCommand;
use crate::input::manager::InputManager;
use crate::system::bus::SystemBus;
use crossbeam_channel::select;
use std::io;
use std::thread::{self, JoinHandle};

/// Spawns the input thread. It exits on `InputCommand::Shutdown`, when a
/// channel closes, or when the logic side stops receiving actions.
pub fn start_thread(bus: SystemBus, mut manager: InputManager) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            // Blocking loop: zero CPU while idle.
            loop {
                select! {
                    recv(bus.raw_input_rx) -> raw => {
                        match raw {
                            Ok(raw_event) => {
                                if let Some(action) = manager.process(raw_event) {
                                    if let Err(e) = bus.action_tx.send(action) {
                                        log::error!("INPUT: Failed to send action (Logic thread died?): {}", e);
                                        break;
                                    }
                                }
                            }
                            Err(_) => break,
                        }
                    }
                    recv(bus.input_cmd_rx) -> cmd => {
                        match cmd {
                            Ok(InputCommand::ReloadKeybinds(keys)) => manager.reload_keybinds(&keys),
                            Ok(InputCommand::Shutdown) | Err(_) => break,
                        }
                    }
                }
            }

            log::info!("INPUT: Thread stopped");
        })
}
