//! System configuration parameters
//!
//! All tunable parameters for the ChargeGuard controller.  Defaults are the
//! values the rig ships with; a JSON override baked in at build time (see
//! `main.rs`) can replace any subset of them.

use serde::{Deserialize, Serialize};

use crate::app::state::Thresholds;
use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Thresholds ---
    /// Temperature (°C) at or above which the cooling fan runs.
    pub fan_on_temp_c: f32,
    /// Temperature (°C) at or above which charging drops to slow mode.
    /// Must be strictly above `fan_on_temp_c`.
    pub slow_charge_temp_c: f32,

    // --- Timing ---
    /// Sensor → mode → actuator pipeline interval (milliseconds).
    pub sensor_interval_ms: u32,
    /// Character display refresh interval (milliseconds).
    pub display_interval_ms: u32,
    /// Upper bound on the startup WiFi association wait (milliseconds).
    pub wifi_connect_timeout_ms: u32,

    // --- Network ---
    /// TCP port of the status server.
    pub http_port: u16,
    /// Station SSID.  Empty = run without network.
    pub wifi_ssid: heapless::String<32>,
    /// Station password.  Empty = open network.
    pub wifi_password: heapless::String<64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            fan_on_temp_c: 32.0,
            slow_charge_temp_c: 35.0,

            // Timing
            sensor_interval_ms: 2000, // DHT22 minimum sampling period
            display_interval_ms: 1500,
            wifi_connect_timeout_ms: 10_000,

            // Network
            http_port: 80,
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
        }
    }
}

impl ControllerConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant.  A failure here aborts startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;
        if self.sensor_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("sensor_interval_ms"));
        }
        if self.display_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("display_interval_ms"));
        }
        if self.wifi_connect_timeout_ms == 0 {
            return Err(ConfigError::ZeroInterval("wifi_connect_timeout_ms"));
        }
        if !self.wifi_ssid.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            return Err(ConfigError::Credentials("SSID must be printable ASCII"));
        }
        let pw = self.wifi_password.len();
        if pw != 0 && !(8..=64).contains(&pw) {
            return Err(ConfigError::Credentials("password must be empty or 8-64 bytes"));
        }
        if self.wifi_ssid.is_empty() && pw != 0 {
            return Err(ConfigError::Credentials("password given without SSID"));
        }
        Ok(())
    }

    /// Build the effective configuration from build-time inputs: an
    /// optional JSON override, then optional credentials on top.
    pub fn load(
        json: Option<&str>,
        ssid: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match json {
            Some(json) => serde_json::from_str(json).map_err(|_| ConfigError::Parse)?,
            None => Self::default(),
        };
        if let Some(ssid) = ssid {
            config.wifi_ssid.clear();
            config
                .wifi_ssid
                .push_str(ssid)
                .map_err(|()| ConfigError::Credentials("SSID longer than 32 bytes"))?;
        }
        if let Some(password) = password {
            config.wifi_password.clear();
            config
                .wifi_password
                .push_str(password)
                .map_err(|()| ConfigError::Credentials("password longer than 64 bytes"))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// The validated threshold pair.
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        Thresholds::new(self.fan_on_temp_c, self.slow_charge_temp_c)
    }

    /// Whether station credentials are configured at all.
    pub fn has_network(&self) -> bool {
        !self.wifi_ssid.is_empty()
    }
}
