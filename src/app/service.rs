//! Application service: the hexagonal core.
//!
//! [`ChargeController`] owns the thresholds, the sensor reader and the one
//! [`SystemState`].  All I/O flows through port traits injected at call
//! sites, so the whole pipeline runs against mocks in tests.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │     ChargeController      │
//! ActuatorPort ◀──│ reader · evaluate · apply │ ──▶ DisplayPort
//!                 └──────────────────────────┘
//! ```

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use crate::app::presentation::{StatusReport, render_display, render_status};
use crate::app::state::{SystemState, Thresholds};
use crate::control::mode;
use crate::sensors::SensorReader;

// ───────────────────────────────────────────────────────────────
// ChargeController
// ───────────────────────────────────────────────────────────────

pub struct ChargeController {
    thresholds: Thresholds,
    reader: SensorReader,
    state: SystemState,
    pipeline_runs: u64,
}

impl ChargeController {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            reader: SensorReader::new(),
            state: SystemState::initial(),
            pipeline_runs: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the outputs to the boot state (fast charge off, fan off) and
    /// announce the trip points.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        apply_actuators(&self.state, hw);
        sink.emit(&AppEvent::Started {
            fan_on_c: self.thresholds.fan_on_c(),
            slow_charge_c: self.thresholds.slow_charge_c(),
        });
        info!(
            "ChargeController started (fan >= {:.1}C, slow charge >= {:.1}C)",
            self.thresholds.fan_on_c(),
            self.thresholds.slow_charge_c()
        );
    }

    // ── Per-interval work ─────────────────────────────────────

    /// Sensor poll → mode evaluation → actuator apply.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn run_sensor_pipeline(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> SystemState {
        self.pipeline_runs += 1;

        let reading = self.reader.poll(hw, sink);
        let next = mode::evaluate(&reading, &self.thresholds, &self.state);

        if next.mode != self.state.mode {
            sink.emit(&AppEvent::ModeChanged {
                from: self.state.mode,
                to: next.mode,
                temperature_c: next.last_reading.temperature_c,
            });
        }
        if next.fan_on != self.state.fan_on {
            sink.emit(&AppEvent::FanChanged {
                on: next.fan_on,
                temperature_c: next.last_reading.temperature_c,
            });
        }

        self.state = next;
        apply_actuators(&self.state, hw);
        self.state
    }

    /// Redraw the display from the current state.
    pub fn refresh_display(&self, display: &mut impl DisplayPort) {
        display.show(&render_display(&self.state));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot for the status query.
    pub fn status(&self) -> StatusReport {
        render_status(&self.state)
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Consecutive failed sensor polls (0 when healthy).
    pub fn sensor_failures(&self) -> u32 {
        self.reader.consecutive_failures()
    }

    /// Pipeline executions since startup.
    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs
    }
}

/// Translate a state into the two outputs.
///
/// Both outputs are written every time; the switch drivers underneath skip
/// pins that already sit at the requested level.
pub fn apply_actuators(state: &SystemState, hw: &mut impl ActuatorPort) {
    hw.set_fast_charge(state.mode.fast_charge_enabled());
    hw.set_fan(state.fan_on);
}
