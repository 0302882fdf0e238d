//! Status board shared across threads, the way httpd workers use it.
//!
//! The tick loop keeps publishing while other threads serve requests; every
//! reply must be a whole snapshot and every request must be reported.

use std::thread;

use chargeguard::app::events::AppEvent;
use chargeguard::app::runtime::Runtime;
use chargeguard::app::service::ChargeController;
use chargeguard::app::state::Thresholds;
use chargeguard::net::board::{StatusBoard, SERVED_BACKLOG};
use chargeguard::scheduler::Scheduler;

use super::mock_hw::{MockHardware, RecordingDisplay, RecordingSink};

const FAST: &str = r#"{"temperature_C":25.00,"humidity_percent":40.00,"charging_mode":"Fast Charging","fan_on":false}"#;
const SLOW: &str = r#"{"temperature_C":36.00,"humidity_percent":40.00,"charging_mode":"Slow Charging","fan_on":true}"#;

#[test]
fn workers_only_ever_see_whole_snapshots() {
    let mut hw = MockHardware::new();
    for i in 0..50 {
        let t = if i % 2 == 0 { 25.0 } else { 36.0 };
        hw.push_reading(t, 40.0);
    }
    let mut rt = Runtime::new(
        ChargeController::new(Thresholds::new(32.0, 35.0).unwrap()),
        hw,
        RecordingDisplay::default(),
        RecordingSink::default(),
    );
    rt.start();
    let mut sched = Scheduler::with_intervals(10, 10);
    sched.tick(0, &mut rt);

    let board = StatusBoard::new(rt.controller().status());
    rt.attach_status_board(board.clone(), 80);

    let workers: Vec<_> = (0..2)
        .map(|_| {
            let board = board.clone();
            thread::spawn(move || {
                (0..SERVED_BACKLOG / 2)
                    .map(|_| board.serve("/status").body)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for step in 1..50u32 {
        sched.tick(step * 10, &mut rt);
    }

    for worker in workers {
        for body in worker.join().unwrap() {
            assert!(body == FAST || body == SLOW, "torn snapshot: {body}");
        }
    }

    // One more tick drains whatever the workers left after the last one.
    sched.tick(1_000, &mut rt);
    let reported = rt
        .sink()
        .count(|e| matches!(e, AppEvent::RequestServed { status: 200, .. }));
    assert_eq!(reported, SERVED_BACKLOG);
    assert_eq!(board.served(), SERVED_BACKLOG as u32);
}
