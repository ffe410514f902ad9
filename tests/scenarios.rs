//! End-to-end gameplay scenarios driven through the public engine API.

use beatlane::input::events::{GameAction, RawKeyEvent};
use beatlane::input::manager::InputManager;
use beatlane::logic;
use beatlane::logic::clock::{FrameTimer, MockTimeProvider};
use beatlane::models::engine::{Chart, CoreConfig, Difficulty, HitWindow, Note, pattern_chart};
use beatlane::models::settings::DEFAULT_LANE_KEYS;
use beatlane::models::stats::Judgement;
use beatlane::shared::snapshot::CoreEvent;
use beatlane::state::game::{GameEngine, SessionPhase, SessionState};
use beatlane::system::bus::{SystemBus, SystemEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn engine() -> GameEngine {
    GameEngine::silent(CoreConfig::classic()).unwrap()
}

fn run_ticks(engine: &mut GameEngine, count: usize, dt_ms: f64) {
    for _ in 0..count {
        engine.tick(dt_ms);
    }
}

#[test]
fn two_lane_chord_pressed_at_one_second_is_bad() {
    let mut engine = engine();
    engine
        .start(Chart::new(
            vec![Note::normal(1000.0, 0), Note::normal(1000.0, 1)],
            10_000.0,
        ))
        .unwrap();

    run_ticks(&mut engine, 100, 10.0);
    assert_eq!(engine.elapsed_ms(), 1000.0);

    let notes = engine.scheduler().live_notes();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.travel() == 200.0));

    assert_eq!(engine.on_lane_press(0), Some(Judgement::Bad));
    assert_eq!(engine.session().score, 100);
    assert_eq!(engine.session().combo, 1);
}

#[test]
fn notes_reach_the_line_at_their_time_for_any_speed() {
    let mut config = CoreConfig::classic();
    config.note_speed = 400.0;
    let mut engine = GameEngine::silent(config).unwrap();
    engine
        .start(Chart::new(vec![Note::normal(3000.0, 4)], 10_000.0))
        .unwrap();

    run_ticks(&mut engine, 300, 10.0);
    assert_eq!(engine.elapsed_ms(), 3000.0);

    // within one frame of movement of the line
    let travel = engine.scheduler().live_notes()[0].travel();
    assert!((travel - 400.0).abs() <= 4.0, "travel {travel}");
    assert_eq!(engine.on_lane_press(4), Some(Judgement::Perfect));
}

#[test]
fn empty_chart_gets_fallback_and_completes_at_zero_accuracy() {
    let mut engine = GameEngine::silent(CoreConfig::classic()).unwrap();
    engine.start(Chart::new(Vec::new(), 180_000.0)).unwrap();
    assert_eq!(engine.chart().len(), 359);

    run_ticks(&mut engine, 1800, 100.0);

    assert_eq!(engine.phase(), SessionPhase::Idle);
    let result = engine.last_result().unwrap();
    assert_eq!(result.total_notes, 359);
    assert_eq!(result.hit_notes, 0);
    assert_eq!(result.final_score, 0);
    assert_eq!(result.accuracy_percent, 0.0);
}

#[test]
fn pressing_an_empty_lane_changes_nothing() {
    let mut engine = engine();
    engine
        .start(Chart::new(vec![Note::normal(1000.0, 0)], 10_000.0))
        .unwrap();
    run_ticks(&mut engine, 100, 10.0);

    let before = engine.session().clone();
    assert_eq!(engine.on_lane_press(3), None);
    assert_eq!(engine.session(), &before);
}

#[test]
fn notes_arm_in_chart_order_exactly_once() {
    let chart = pattern_chart(
        &mut StdRng::seed_from_u64(9),
        Difficulty::Hard,
        120.0,
        20_000.0,
        6,
    );
    let mut engine = engine();
    engine.start(chart.clone()).unwrap();

    let mut seen = Vec::new();
    for _ in 0..4000 {
        engine.tick(7.0);
        for note in engine.scheduler().live_notes() {
            if !seen.contains(&note.chart_index()) {
                seen.push(note.chart_index());
            }
        }
        if engine.phase() == SessionPhase::Idle {
            break;
        }
    }

    let expected: Vec<usize> = (0..chart.len()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn boundary_distances_pick_the_right_tier() {
    let window = HitWindow::classic();
    assert_eq!(window.judge(50.0), Some(Judgement::Perfect));
    assert_eq!(window.judge(50.0001), Some(Judgement::Great));
    assert_eq!(window.judge(200.5), None);

    // A note never pressed turns into a miss once it passes 600.
    let mut engine = engine();
    engine
        .start(Chart::new(vec![Note::normal(0.0, 2)], 10_000.0))
        .unwrap();
    run_ticks(&mut engine, 300, 10.0);
    assert_eq!(engine.session().stats.miss, 0);
    engine.tick(10.0);
    assert_eq!(engine.session().stats.miss, 1);
    assert_eq!(engine.on_lane_press(2), None);
}

#[test]
fn miss_breaks_combo_and_next_hit_restarts_it() {
    let mut engine = engine();
    engine
        .start(Chart::new(
            vec![
                Note::normal(1000.0, 0),
                Note::normal(1000.0, 1),
                Note::normal(4000.0, 2),
            ],
            20_000.0,
        ))
        .unwrap();

    run_ticks(&mut engine, 100, 10.0);
    engine.on_lane_press(0);
    assert_eq!(engine.session().combo, 1);

    // lane 1 scrolls out
    run_ticks(&mut engine, 201, 10.0);
    assert_eq!(engine.session().combo, 0);
    assert_eq!(engine.session().max_combo, 1);

    // lane 2 armed at 2000 ms, on the line at 4000 ms
    while engine.elapsed_ms() < 4000.0 {
        engine.tick(10.0);
    }
    assert_eq!(engine.on_lane_press(2), Some(Judgement::Perfect));
    assert_eq!(engine.session().combo, 1);
}

#[test]
fn score_never_decreases() {
    let chart = pattern_chart(
        &mut StdRng::seed_from_u64(21),
        Difficulty::Hard,
        120.0,
        30_000.0,
        6,
    );
    let mut engine = engine();
    engine.start(chart).unwrap();

    let mut last_score = 0;
    let mut lane = 0;
    while engine.phase() == SessionPhase::Running {
        engine.on_lane_press(lane);
        let score = engine.session().score;
        assert!(score >= last_score);
        last_score = score;

        engine.on_lane_release(lane);
        lane = (lane + 1) % 6;
        engine.tick(16.0);
    }
    assert_eq!(engine.last_result().unwrap().final_score, last_score);
}

#[test]
fn reset_twice_from_any_phase() {
    for pause in [false, true] {
        let mut engine = engine();
        engine
            .start(Chart::new(vec![Note::normal(1000.0, 0)], 10_000.0))
            .unwrap();
        engine.tick(1000.0);
        engine.on_lane_press(0);
        if pause {
            engine.pause().unwrap();
        }

        engine.reset();
        engine.reset();
        assert_eq!(engine.phase(), SessionPhase::Idle);
        assert_eq!(engine.session(), &SessionState::default());
        assert_eq!(engine.elapsed_ms(), 0.0);
        assert!(engine.snapshot().live_notes.is_empty());
    }
}

#[test]
fn paused_time_does_not_count() {
    let provider = MockTimeProvider::new();
    let mut timer = FrameTimer::new(&provider);
    let mut engine = engine();
    engine
        .start(Chart::new(vec![Note::normal(9000.0, 0)], 20_000.0))
        .unwrap();
    timer.sample();

    for _ in 0..100 {
        provider.advance_ms(10.0);
        engine.tick(timer.sample());
    }
    engine.pause().unwrap();
    for _ in 0..500 {
        provider.advance_ms(10.0);
        engine.tick(timer.sample());
    }
    engine.resume().unwrap();
    provider.advance_ms(10.0);
    engine.tick(timer.sample());

    assert_eq!(engine.elapsed_ms(), 1010.0);
    // 9000 - 2000 lead: still not armed
    assert!(engine.scheduler().live_notes().is_empty());
}

#[test]
fn keyboard_edges_reach_the_engine_once() {
    let keys: Vec<String> = DEFAULT_LANE_KEYS.iter().map(|k| k.to_string()).collect();
    let mut input = InputManager::new(&keys);
    let mut engine = engine();
    engine
        .start(Chart::new(
            vec![Note::normal(1000.0, 3), Note::normal(1000.0, 3)],
            10_000.0,
        ))
        .unwrap();
    engine.tick(1000.0);

    // OS repeat while holding must not eat the second note
    for event in [
        RawKeyEvent::press("KeyJ"),
        RawKeyEvent::press("KeyJ"),
        RawKeyEvent::release("KeyJ"),
    ] {
        if let Some(action) = input.process(event) {
            engine.handle_input(action);
        }
    }
    assert_eq!(engine.session().hit_notes, 1);

    let action = input.process(RawKeyEvent::press("KeyJ"));
    assert_eq!(action, Some(GameAction::Hit { lane: 3 }));
    engine.handle_input(GameAction::Hit { lane: 3 });
    assert_eq!(engine.session().hit_notes, 2);
}

#[test]
fn logic_thread_reports_rejected_start_and_quits() {
    let bus = SystemBus::new();
    let engine = GameEngine::new(
        CoreConfig::classic(),
        Box::new(beatlane::logic::audio::SilentOutput::unavailable()),
    )
    .unwrap();
    let handle = logic::start_thread(bus.clone(), engine, 200).unwrap();

    bus.action_tx.send(GameAction::Start).unwrap();
    let event = bus.event_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(event, CoreEvent::StartRejected { .. }));

    bus.sys_tx.send(SystemEvent::Quit).unwrap();
    assert_eq!(handle.join().unwrap(), None);
}

#[test]
fn logic_thread_runs_a_short_session() {
    let bus = SystemBus::new();
    let engine = GameEngine::silent(CoreConfig::classic()).unwrap();
    let handle = logic::start_thread(bus.clone(), engine, 1000).unwrap();

    bus.sys_tx
        .send(SystemEvent::LoadChart(Chart::new(
            vec![Note::normal(100.0, 0)],
            300.0,
        )))
        .unwrap();
    bus.action_tx.send(GameAction::Start).unwrap();

    let result = loop {
        match bus.event_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            CoreEvent::Completed(result) => break result,
            _ => continue,
        }
    };
    assert_eq!(result.total_notes, 1);
    assert_eq!(result.hit_notes, 0);

    bus.sys_tx.send(SystemEvent::Quit).unwrap();
    assert_eq!(handle.join().unwrap(), Some(result));
}
