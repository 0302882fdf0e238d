//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ChargeController (domain)
//! ```
//!
//! Driven adapters (sensor, relays, display, clock, event sinks) implement
//! these traits.  The [`ChargeController`](super::service::ChargeController)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every rule can be exercised on the host.

use crate::app::presentation::DisplayFrame;
use crate::app::state::Sample;
use crate::error::SensorError;
use crate::scheduler::TaskId;

// ───────────────────────────────────────────────────────────────
// Clock (leaf)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.
///
/// The value wraps at `u32::MAX`; consumers only ever take wrapping
/// differences of two readings, never compare absolute values.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one temperature/humidity sample per call.
///
/// Implementations must return within a bounded time (a few milliseconds);
/// a sensor that does not answer is reported as [`SensorError::Timeout`].
pub trait SensorPort {
    fn sample(&mut self) -> Result<Sample, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: two independent binary outputs.
///
/// Writes are fire-and-forget.  Calling either method repeatedly with the
/// same value must be harmless.
pub trait ActuatorPort {
    /// Energise (`true`) or release the fast-charge enable line.
    fn set_fast_charge(&mut self, on: bool);

    /// Switch the cooling fan.
    fn set_fan(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Two-line character display.
pub trait DisplayPort {
    fn show(&mut self, frame: &DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples the tick loop from the work it runs)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`Scheduler`](crate::scheduler::Scheduler)
/// invokes on every tick.
///
/// The scheduler only decides *when* things run; the delegate decides
/// *what* runs.  Each call must run to completion without blocking.
pub trait SchedulerDelegate {
    /// Called first on every tick, unconditionally.
    fn service_network(&mut self, now_ms: u32);

    /// Called when an interval-gated task is due.
    fn on_task_due(&mut self, task: TaskId, now_ms: u32);
}
