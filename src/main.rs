//! Headless entry point: plays one chart with the autoplay input source and
//! prints the session result as JSON.

use beatlane::input::autoplay::AutoPlayer;
use beatlane::input::events::{InputCommand, RawKeyEvent};
use beatlane::input::manager::InputManager;
use beatlane::models::engine::{Chart, Difficulty, pattern_chart};
use beatlane::models::settings::SettingsState;
use beatlane::shared::snapshot::CoreEvent;
use beatlane::state::game::GameEngine;
use beatlane::system::bus::{SystemBus, SystemEvent};
use beatlane::{input, logic};
use clap::Parser;
use crossbeam_channel::select;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "beatlane", about = "Plays a six-lane chart with autoplay and reports the result")]
struct Args {
    /// Chart difficulty (easy, normal, hard). Defaults to the settings file.
    difficulty: Option<Difficulty>,

    /// Length of the generated chart in seconds.
    #[arg(default_value_t = 30)]
    seconds: u32,

    /// Tempo of the generated chart.
    #[arg(long, default_value_t = 120.0)]
    bpm: f64,

    /// Play a chart document (`{"notes": [...], "durationMs": n}`) instead
    /// of generating one.
    #[arg(long)]
    chart: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("MAIN: Booting beatlane...");

    let settings = SettingsState::load();
    let config = settings.gameplay;

    let chart = match &args.chart {
        Some(path) => {
            let chart = Chart::load(path)?;
            log::info!("MAIN: Loaded {} ({} notes)", path.display(), chart.len());
            chart
        }
        None => {
            let difficulty = args.difficulty.unwrap_or(settings.difficulty);
            let chart = pattern_chart(
                &mut rand::rng(),
                difficulty,
                args.bpm,
                args.seconds as f64 * 1000.0,
                config.lane_count,
            );
            log::info!(
                "MAIN: {} chart, {} notes over {} s",
                difficulty,
                chart.len(),
                args.seconds
            );
            chart
        }
    };

    let bus = SystemBus::new();
    let lane_keys = settings.lane_keys();

    let mut engine = GameEngine::silent(config)?;
    engine.set_volume(settings.master_volume);

    let input_handle = input::start_thread(bus.clone(), InputManager::new(&lane_keys))?;
    let logic_handle = logic::start_thread(bus.clone(), engine, settings.tick_rate)?;

    bus.sys_tx.send(SystemEvent::LoadChart(chart))?;
    bus.raw_input_tx.send(RawKeyEvent::press("Enter"))?;
    bus.raw_input_tx.send(RawKeyEvent::release("Enter"))?;

    let mut bot = AutoPlayer::new(lane_keys);
    loop {
        select! {
            recv(bus.render_rx) -> snapshot => {
                let Ok(snapshot) = snapshot else { break };
                for event in bot.react(&snapshot) {
                    bus.raw_input_tx.send(event)?;
                }
            }
            recv(bus.event_rx) -> event => {
                match event {
                    Ok(CoreEvent::Completed(result)) => {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                        break;
                    }
                    Ok(CoreEvent::StartRejected { reason }) => {
                        log::error!("MAIN: Could not start: {}", reason);
                        break;
                    }
                    Ok(CoreEvent::ComboMilestone { combo }) => {
                        log::info!("MAIN: {} combo!", combo);
                    }
                    Ok(CoreEvent::Judged { lane, judgement, at_ms }) => {
                        log::debug!("MAIN: {} on lane {} at {:.0} ms", judgement, lane, at_ms);
                    }
                    Err(_) => break,
                }
            }
        }
    }

    bus.sys_tx.send(SystemEvent::Quit)?;
    bus.input_cmd_tx.send(InputCommand::Shutdown)?;

    if input_handle.join().is_err() {
        log::error!("MAIN: Input thread panicked");
    }
    match logic_handle.join() {
        Ok(Some(result)) => log::info!("MAIN: Final score {}", result.final_score),
        Ok(None) => log::info!("MAIN: No session completed"),
        Err(_) => log::error!("MAIN: Logic thread panicked"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_difficulty_and_length() {
        let args = Args::try_parse_from(["beatlane", "hyper", "12", "--bpm", "150"]).unwrap();
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.seconds, 12);
        assert_eq!(args.bpm, 150.0);
        assert!(args.chart.is_none());
    }

    #[test]
    fn defaults_and_bad_difficulty() {
        let args = Args::try_parse_from(["beatlane"]).unwrap();
        assert_eq!(args.difficulty, None);
        assert_eq!(args.seconds, 30);

        assert!(Args::try_parse_from(["beatlane", "extreme"]).is_err());
    }
}
