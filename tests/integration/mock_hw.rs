//! Mock adapters for integration tests.
//!
//! Records every actuator call, display frame and event so tests can assert
//! on the full history without touching real GPIO or I2C.

use std::collections::VecDeque;

use chargeguard::app::events::AppEvent;
use chargeguard::app::ports::{ActuatorPort, Clock, DisplayPort, EventSink, SensorPort};
use chargeguard::app::presentation::DisplayFrame;
use chargeguard::app::state::Sample;
use chargeguard::error::SensorError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    FastCharge(bool),
    Fan(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Sensor and both outputs in one value, like the real `HardwareAdapter`.
///
/// Sensor results are consumed from a script; once it runs dry the last
/// scripted result repeats.
pub struct MockHardware {
    script: VecDeque<Result<Sample, SensorError>>,
    last: Result<Sample, SensorError>,
    pub calls: Vec<ActuatorCall>,
    pub samples_taken: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: Err(SensorError::Timeout),
            calls: Vec::new(),
            samples_taken: 0,
        }
    }

    pub fn reading(mut self, temperature_c: f32, humidity_percent: f32) -> Self {
        self.push_reading(temperature_c, humidity_percent);
        self
    }

    pub fn failure(mut self, error: SensorError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    pub fn push_reading(&mut self, temperature_c: f32, humidity_percent: f32) {
        self.script.push_back(Ok(Sample {
            temperature_c,
            humidity_percent,
        }));
    }

    pub fn push_failure(&mut self, error: SensorError) {
        self.script.push_back(Err(error));
    }

    pub fn fast_charge_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::FastCharge(on) => Some(*on),
                ActuatorCall::Fan(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn fan_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Fan(on) => Some(*on),
                ActuatorCall::FastCharge(_) => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        self.samples_taken += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

impl ActuatorPort for MockHardware {
    fn set_fast_charge(&mut self, on: bool) {
        self.calls.push(ActuatorCall::FastCharge(on));
    }

    fn set_fan(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Fan(on));
    }
}

// ── RecordingDisplay ──────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<DisplayFrame>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn last(&self) -> Option<&DisplayFrame> {
        self.frames.last()
    }
}

impl DisplayPort for RecordingDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.clone());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock the test advances by hand.
pub struct ManualClock(pub std::cell::Cell<u32>);

#[allow(dead_code)]
impl ManualClock {
    pub fn at(ms: u32) -> Self {
        Self(std::cell::Cell::new(ms))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}
