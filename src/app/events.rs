//! Outbound application events.
//!
//! The controller, sensor reader and startup sequence emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them (serial log, tests recording them, ...).

use crate::app::state::ChargeMode;
use crate::error::{CommsError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started with the given trip points.
    Started { fan_on_c: f32, slow_charge_c: f32 },

    /// Charging mode changed.
    ModeChanged {
        from: ChargeMode,
        to: ChargeMode,
        temperature_c: f32,
    },

    /// Fan switched on or off.
    FanChanged { on: bool, temperature_c: f32 },

    /// A sensor poll failed; the previous state stays in force.
    SensorFault { error: SensorError, consecutive: u32 },

    /// The sensor answered again after one or more failures.
    SensorRecovered { after_failures: u32 },

    /// Station associated within the startup window.
    NetworkUp { elapsed_ms: u32 },

    /// Startup continues without network.
    NetworkUnavailable { reason: CommsError },

    /// The status server is listening.
    ServerStarted { port: u16 },

    /// A status-server request was answered.
    RequestServed { status: u16, path: heapless::String<64> },
}
