//! Charging-mode and fan decision rules.
//!
//! Two independent inclusive threshold comparisons on the same temperature.
//! There is no dead band: a reading that sits on a threshold can flip the
//! outputs on every poll.

use crate::app::state::{ChargeMode, Reading, SystemState, Thresholds};

/// Derive the next [`SystemState`] from a reading.
///
/// An invalid reading, or one carrying a non-finite value, returns
/// `previous` untouched, so the last good reading and the outputs derived
/// from it stay in force.
pub fn evaluate(reading: &Reading, thresholds: &Thresholds, previous: &SystemState) -> SystemState {
    let usable = reading.valid
        && reading.temperature_c.is_finite()
        && reading.humidity_percent.is_finite();
    if !usable {
        return *previous;
    }

    let t = reading.temperature_c;
    let mode = if t >= thresholds.slow_charge_c() {
        ChargeMode::SlowCharging
    } else {
        ChargeMode::FastCharging
    };

    SystemState {
        mode,
        fan_on: t >= thresholds.fan_on_c(),
        last_reading: *reading,
    }
}
