//! End-to-end tests: scheduler → runtime → controller → mock adapters.
//!
//! Time is scripted, so every interval decision is deterministic.

use chargeguard::app::events::AppEvent;
use chargeguard::app::presentation::render_status;
use chargeguard::app::runtime::Runtime;
use chargeguard::app::service::ChargeController;
use chargeguard::app::state::{ChargeMode, SystemState, Thresholds};
use chargeguard::error::SensorError;
use chargeguard::net::board::StatusBoard;
use chargeguard::scheduler::Scheduler;

use super::mock_hw::{ActuatorCall, MockHardware, RecordingDisplay, RecordingSink};

type TestRuntime = Runtime<MockHardware, RecordingDisplay, RecordingSink>;

fn thresholds() -> Thresholds {
    Thresholds::new(32.0, 35.0).unwrap()
}

fn runtime(hw: MockHardware) -> TestRuntime {
    let mut rt = Runtime::new(
        ChargeController::new(thresholds()),
        hw,
        RecordingDisplay::default(),
        RecordingSink::default(),
    );
    rt.start();
    rt
}

/// Runtime with a status board attached the way `main` does it.
fn runtime_with_board(hw: MockHardware) -> (TestRuntime, StatusBoard) {
    let mut rt = runtime(hw);
    let board = StatusBoard::new(rt.controller().status());
    rt.attach_status_board(board.clone(), 80);
    (rt, board)
}

fn scheduler() -> Scheduler {
    Scheduler::with_intervals(2_000, 1_500)
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_releases_outputs_and_announces() {
    let rt = runtime(MockHardware::new().reading(25.0, 40.0));

    assert_eq!(
        rt.hardware().calls,
        vec![ActuatorCall::FastCharge(false), ActuatorCall::Fan(false)]
    );
    assert!(matches!(
        rt.sink().events.as_slice(),
        [AppEvent::Started { fan_on_c, slow_charge_c }]
            if *fan_on_c == 32.0 && *slow_charge_c == 35.0
    ));
    assert_eq!(rt.controller().state().mode, ChargeMode::Unknown);
}

#[test]
fn first_tick_runs_every_task() {
    let mut rt = runtime(MockHardware::new().reading(25.0, 40.0));
    let mut sched = scheduler();

    sched.tick(0, &mut rt);

    assert_eq!(rt.controller().pipeline_runs(), 1);
    assert_eq!(rt.display().frames.len(), 1);
    assert_eq!(rt.controller().state().mode, ChargeMode::FastCharging);
    assert!(rt.hardware().fast_charge_on());
}

// ── Thermal sweep ─────────────────────────────────────────────

#[test]
fn sweep_through_both_thresholds() {
    let mut hw = MockHardware::new();
    for t in [25.0, 33.0, 36.0, 34.0, 31.0] {
        hw.push_reading(t, 45.0);
    }
    let mut rt = runtime(hw);
    let mut sched = scheduler();

    let mut seen = Vec::new();
    for step in 0..5u32 {
        sched.tick(step * 2_000, &mut rt);
        seen.push((
            rt.controller().state().mode,
            rt.hardware().fast_charge_on(),
            rt.hardware().fan_on(),
        ));
    }

    assert_eq!(
        seen,
        vec![
            (ChargeMode::FastCharging, true, false),
            (ChargeMode::FastCharging, true, true),
            (ChargeMode::SlowCharging, false, true),
            (ChargeMode::FastCharging, true, true),
            (ChargeMode::FastCharging, true, false),
        ]
    );

    let mode_changes = rt
        .sink()
        .count(|e| matches!(e, AppEvent::ModeChanged { .. }));
    let fan_changes = rt
        .sink()
        .count(|e| matches!(e, AppEvent::FanChanged { .. }));
    // Unknown→Fast, Fast→Slow, Slow→Fast.
    assert_eq!(mode_changes, 3);
    assert_eq!(fan_changes, 2);
}

#[test]
fn display_tracks_state() {
    let mut rt = runtime(MockHardware::new().reading(36.5, 40.2));
    let mut sched = scheduler();

    sched.tick(0, &mut rt);

    let frame = rt.display().last().unwrap();
    assert_eq!(frame.line1.as_str(), "T:36.5C H:40%");
    assert_eq!(frame.line2.as_str(), "Slow Charge    *");
}

// ── Sensor failure ────────────────────────────────────────────

#[test]
fn failure_keeps_previous_state_in_force() {
    let hw = MockHardware::new()
        .reading(36.0, 50.0)
        .failure(SensorError::ChecksumMismatch)
        .failure(SensorError::Timeout);
    let mut rt = runtime(hw);
    let mut sched = scheduler();

    sched.tick(0, &mut rt);
    let before = *rt.controller().state();
    sched.tick(2_000, &mut rt);
    sched.tick(4_000, &mut rt);

    assert_eq!(*rt.controller().state(), before);
    assert_eq!(rt.controller().sensor_failures(), 2);
    assert!(rt.hardware().fan_on());
    assert!(!rt.hardware().fast_charge_on());
    assert_eq!(
        rt.sink()
            .count(|e| matches!(e, AppEvent::SensorFault { .. })),
        2
    );
}

#[test]
fn sensor_recovery_is_reported() {
    let hw = MockHardware::new()
        .failure(SensorError::Timeout)
        .failure(SensorError::Timeout)
        .reading(28.0, 35.0);
    let mut rt = runtime(hw);
    let mut sched = scheduler();

    for step in 0..3u32 {
        sched.tick(step * 2_000, &mut rt);
    }

    assert!(rt
        .sink()
        .events
        .contains(&AppEvent::SensorRecovered { after_failures: 2 }));
    assert_eq!(rt.controller().state().mode, ChargeMode::FastCharging);
    assert_eq!(rt.controller().sensor_failures(), 0);
}

#[test]
fn failing_sensor_from_boot_stays_unknown() {
    let mut rt = runtime(MockHardware::new().failure(SensorError::Timeout));
    let mut sched = scheduler();

    sched.tick(0, &mut rt);
    sched.tick(2_000, &mut rt);

    assert_eq!(rt.controller().state().mode, ChargeMode::Unknown);
    assert!(!rt.hardware().fast_charge_on());
    assert!(!rt.hardware().fan_on());
    assert_eq!(rt.display().last().unwrap().line1.as_str(), "T:--.-C H:--%");
}

// ── Interval gating ───────────────────────────────────────────

#[test]
fn tasks_run_at_their_own_rates() {
    let mut rt = runtime(MockHardware::new().reading(25.0, 40.0));
    let mut sched = scheduler();

    for now in (0..=6_000u32).step_by(500) {
        sched.tick(now, &mut rt);
    }

    // Sensor: 0, 2000, 4000, 6000.  Display: 0, 1500, 3000, 4500, 6000.
    assert_eq!(rt.controller().pipeline_runs(), 4);
    assert_eq!(rt.hardware().samples_taken, 4);
    assert_eq!(rt.display().frames.len(), 5);
    assert_eq!(sched.tick_count(), 13);
}

#[test]
fn gating_holds_across_counter_wrap() {
    let mut rt = runtime(MockHardware::new().reading(25.0, 40.0));
    let mut sched = scheduler();
    let start = u32::MAX - 999;

    for offset in (0..=4_000u32).step_by(500) {
        sched.tick(start.wrapping_add(offset), &mut rt);
    }

    assert_eq!(rt.controller().pipeline_runs(), 3);
    assert_eq!(sched.state().last_sensor_tick, Some(start.wrapping_add(4_000)));
}

// ── Status query through the runtime ──────────────────────────

#[test]
fn status_before_first_reading_reports_sentinel() {
    let (mut rt, board) = runtime_with_board(MockHardware::new().failure(SensorError::Timeout));

    let reply = board.serve("/status");
    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        r#"{"temperature_C":-999.00,"humidity_percent":-999.00,"charging_mode":"Unknown","fan_on":false}"#
    );

    // A failed read publishes the same snapshot again.
    scheduler().tick(0, &mut rt);
    assert_eq!(board.serve("/status").body, reply.body);
}

#[test]
fn status_reflects_latest_state() {
    let (mut rt, board) = runtime_with_board(MockHardware::new().reading(36.5, 40.0));
    let mut sched = scheduler();
    sched.tick(0, &mut rt);

    assert_eq!(
        board.serve("/status").body,
        r#"{"temperature_C":36.50,"humidity_percent":40.00,"charging_mode":"Slow Charging","fan_on":true}"#
    );
    assert!(!rt
        .sink()
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::RequestServed { .. })));

    sched.tick(10, &mut rt);

    assert!(rt.sink().events.iter().any(|e| matches!(
        e,
        AppEvent::RequestServed { status: 200, path } if path.as_str() == "/status"
    )));
}

#[test]
fn served_requests_are_reported_once_in_order() {
    let (mut rt, board) = runtime_with_board(MockHardware::new().reading(25.0, 40.0));
    let mut sched = scheduler();

    assert_eq!(board.serve("/").status, 302);
    assert_eq!(board.serve("/metrics").status, 404);
    sched.tick(0, &mut rt);
    sched.tick(1, &mut rt);

    let served: Vec<(u16, String)> = rt
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RequestServed { status, path } => Some((*status, path.to_string())),
            _ => None,
        })
        .collect();
    assert_eq!(
        served,
        vec![(302, "/".to_string()), (404, "/metrics".to_string())]
    );
    assert_eq!(board.served(), 2);
}

#[test]
fn serving_does_not_drive_the_pipeline() {
    let (mut rt, board) = runtime_with_board(MockHardware::new().reading(25.0, 40.0));
    for _ in 0..3 {
        board.serve("/status");
    }

    assert_eq!(rt.hardware().samples_taken, 0);
    scheduler().tick(0, &mut rt);
    assert_eq!(rt.controller().pipeline_runs(), 1);
    assert_eq!(rt.hardware().samples_taken, 1);
}

// ── Without network ───────────────────────────────────────────

#[test]
fn runs_without_server() {
    let mut rt = runtime(MockHardware::new().reading(33.0, 40.0));
    let mut sched = scheduler();

    sched.tick(0, &mut rt);

    assert!(rt.status_board().is_none());
    assert!(rt.hardware().fan_on());
    assert!(!rt
        .sink()
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ServerStarted { .. })));
}

#[test]
fn board_attached_after_boot_starts_answering() {
    let mut rt = runtime(MockHardware::new().reading(25.0, 40.0));
    let mut sched = scheduler();
    sched.tick(0, &mut rt);

    // Created before the first reading, then brought up to date on attach.
    let board = StatusBoard::new(render_status(&SystemState::initial()));
    rt.attach_status_board(board.clone(), 8080);

    assert!(rt.sink().events.contains(&AppEvent::ServerStarted { port: 8080 }));
    assert!(board
        .serve("/status")
        .body
        .contains(r#""charging_mode":"Fast Charging""#));
}
