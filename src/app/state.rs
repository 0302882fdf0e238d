//! Domain value types shared by the controller, actuators and presentation.
//!
//! All of these are small `Copy` values.  [`SystemState`] is re-derived as a
//! whole from a single [`Reading`]; nothing updates the mode or the fan flag
//! on its own.

use crate::error::ConfigError;

/// Placeholder published for temperature and humidity until the first valid
/// reading arrives.
pub const SENTINEL: f32 = -999.0;

/// One raw sample as delivered by a sensor driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub temperature_c: f32,
    pub humidity_percent: f32,
}

/// One poll result: a sample, or a failure marker.
///
/// When `valid` is `false` the numeric fields carry no information and must
/// never overwrite a previously valid reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_percent: f32,
    pub valid: bool,
}

impl Reading {
    pub const fn from_sample(sample: Sample) -> Self {
        Self {
            temperature_c: sample.temperature_c,
            humidity_percent: sample.humidity_percent,
            valid: true,
        }
    }

    /// Failure marker.
    pub const fn invalid() -> Self {
        Self {
            temperature_c: SENTINEL,
            humidity_percent: SENTINEL,
            valid: false,
        }
    }
}

/// Charging behaviour selected from the latest valid reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeMode {
    /// No valid reading has been seen since boot.
    Unknown,
    FastCharging,
    SlowCharging,
}

impl ChargeMode {
    /// Label published by the status query.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::FastCharging => "Fast Charging",
            Self::SlowCharging => "Slow Charging",
        }
    }

    /// Label that fits the second display line next to the fan marker.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Unknown => "Waiting...",
            Self::FastCharging => "Fast Charge",
            Self::SlowCharging => "Slow Charge",
        }
    }

    /// Whether the fast-charge output should be energised.
    pub const fn fast_charge_enabled(self) -> bool {
        matches!(self, Self::FastCharging)
    }
}

/// Fan and slow-charge trip points, `fan_on_c < slow_charge_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    fan_on_c: f32,
    slow_charge_c: f32,
}

impl Thresholds {
    /// Validated constructor.  Inverted, equal or non-finite thresholds are a
    /// configuration error.
    pub fn new(fan_on_c: f32, slow_charge_c: f32) -> Result<Self, ConfigError> {
        if !fan_on_c.is_finite() || !slow_charge_c.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }
        if fan_on_c >= slow_charge_c {
            return Err(ConfigError::ThresholdOrder);
        }
        Ok(Self {
            fan_on_c,
            slow_charge_c,
        })
    }

    pub fn fan_on_c(&self) -> f32 {
        self.fan_on_c
    }

    pub fn slow_charge_c(&self) -> f32 {
        self.slow_charge_c
    }
}

/// Everything the actuators and presentation layer need, derived from one
/// reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemState {
    pub mode: ChargeMode,
    pub fan_on: bool,
    /// The reading this state was derived from (invalid only before the
    /// first successful poll).
    pub last_reading: Reading,
}

impl SystemState {
    /// Boot state: mode unknown, fan off, no reading.
    pub const fn initial() -> Self {
        Self {
            mode: ChargeMode::Unknown,
            fan_on: false,
            last_reading: Reading::invalid(),
        }
    }

    /// Whether any valid reading has ever been folded into this state.
    pub fn has_reading(&self) -> bool {
        self.last_reading.valid
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::initial()
    }
}
