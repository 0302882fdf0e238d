//! Hardware adapter: bridges the sensor and the two outputs to the domain
//! port traits.
//!
//! Owns the temperature/humidity sensor and both [`Switch`]es, exposing
//! them through [`SensorPort`] and [`ActuatorPort`].  Generic over the
//! sensor and pin types, so the same adapter runs on `esp-idf-hal` pins and
//! on recording pins in tests.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::app::state::Sample;
use crate::drivers::switch::Switch;
use crate::error::SensorError;

pub struct HardwareAdapter<S: SensorPort, P: OutputPin> {
    sensor: S,
    fast_charge: Switch<P>,
    fan: Switch<P>,
}

impl<S: SensorPort, P: OutputPin> HardwareAdapter<S, P> {
    pub fn new(sensor: S, fast_charge: Switch<P>, fan: Switch<P>) -> Self {
        Self {
            sensor,
            fast_charge,
            fan,
        }
    }

    pub fn fast_charge(&self) -> &Switch<P> {
        &self.fast_charge
    }

    pub fn fan(&self) -> &Switch<P> {
        &self.fan
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort, P: OutputPin> SensorPort for HardwareAdapter<S, P> {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        self.sensor.sample()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S: SensorPort, P: OutputPin> ActuatorPort for HardwareAdapter<S, P> {
    fn set_fast_charge(&mut self, on: bool) {
        self.fast_charge.set(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }
}
