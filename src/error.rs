//! Unified error types for the ChargeGuard firmware.
//!
//! One small `Copy` enum per subsystem, plus a top-level [`Error`] that every
//! subsystem converts into.  None of these are fatal to the tick loop except
//! [`ConfigError`], which is only ever raised before the loop starts.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature/humidity sensor could not produce a sample.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// A network subsystem failed.
    Comms(CommsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer or a pulse never arrived.
    Timeout,
    /// The frame arrived but its checksum byte does not match.
    ChecksumMismatch,
    /// Decoded value is outside the physically plausible range.
    OutOfRange,
    /// Sample contained NaN or infinite fields.
    InvalidData,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "no response from sensor"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::InvalidData => write!(f, "non-finite sample"),
        }
    }
}

impl core::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `fan_on_temp_c` must be strictly below `slow_charge_temp_c`.
    ThresholdOrder,
    /// A threshold is NaN or infinite.
    NonFiniteThreshold,
    /// An interval or timeout is zero.  Carries the field name.
    ZeroInterval(&'static str),
    /// Credentials are malformed.  Carries the reason.
    Credentials(&'static str),
    /// The JSON override could not be parsed.
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOrder => {
                write!(f, "fan-on threshold must be below slow-charge threshold")
            }
            Self::NonFiniteThreshold => write!(f, "thresholds must be finite"),
            Self::ZeroInterval(field) => write!(f, "{field} must be non-zero"),
            Self::Credentials(why) => write!(f, "credentials invalid: {why}"),
            Self::Parse => write!(f, "config JSON could not be parsed"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    AssociationTimeout,
    ServerStartFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::AssociationTimeout => write!(f, "WiFi association timed out"),
            Self::ServerStartFailed => write!(f, "status server could not start"),
        }
    }
}

impl core::error::Error for CommsError {}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
