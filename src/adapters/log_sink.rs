//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event as one
//! structured line to the `log` facade (UART / USB-CDC in production).
//! The first token names the subsystem so the serial output greps well.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::Started {
                fan_on_c,
                slow_charge_c,
            } => {
                info!("START | fan>={fan_on_c:.1}C slow>={slow_charge_c:.1}C");
            }
            AppEvent::ModeChanged {
                from,
                to,
                temperature_c,
            } => {
                info!(
                    "MODE | {} -> {} at {:.1}C",
                    from.label(),
                    to.label(),
                    temperature_c
                );
            }
            AppEvent::FanChanged { on, temperature_c } => {
                info!(
                    "MODE | fan {} at {:.1}C",
                    if *on { "on" } else { "off" },
                    temperature_c
                );
            }
            AppEvent::SensorFault { error, consecutive } => {
                warn!("SENSOR | {} ({} in a row)", error, consecutive);
            }
            AppEvent::SensorRecovered { after_failures } => {
                info!("SENSOR | recovered after {} failures", after_failures);
            }
            AppEvent::NetworkUp { elapsed_ms } => {
                info!("NET | associated in {}ms", elapsed_ms);
            }
            AppEvent::NetworkUnavailable { reason } => {
                warn!("NET | continuing offline: {}", reason);
            }
            AppEvent::ServerStarted { port } => {
                info!("HTTP | listening on port {}", port);
            }
            AppEvent::RequestServed { status, path } => {
                info!("HTTP | {} {}", status, path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ChargeMode;
    use crate::error::{CommsError, SensorError};

    #[test]
    fn every_variant_is_logged() {
        let mut sink = LogEventSink::new();
        let events = [
            AppEvent::Started {
                fan_on_c: 32.0,
                slow_charge_c: 35.0,
            },
            AppEvent::ModeChanged {
                from: ChargeMode::Unknown,
                to: ChargeMode::FastCharging,
                temperature_c: 25.0,
            },
            AppEvent::FanChanged {
                on: true,
                temperature_c: 33.0,
            },
            AppEvent::SensorFault {
                error: SensorError::Timeout,
                consecutive: 1,
            },
            AppEvent::SensorRecovered { after_failures: 1 },
            AppEvent::NetworkUp { elapsed_ms: 1200 },
            AppEvent::NetworkUnavailable {
                reason: CommsError::AssociationTimeout,
            },
            AppEvent::ServerStarted { port: 80 },
            AppEvent::RequestServed {
                status: 200,
                path: heapless::String::new(),
            },
        ];
        for e in &events {
            sink.emit(e);
        }
        assert_eq!(sink.emitted(), events.len() as u64);
    }
}
