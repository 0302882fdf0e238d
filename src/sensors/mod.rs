//! Sensor subsystem: the DHT22 driver and the [`SensorReader`] that turns
//! raw samples (or failures) into [`Reading`]s.

pub mod dht22;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, SensorPort};
use crate::app::state::Reading;
use crate::error::SensorError;

/// Polls a [`SensorPort`] and counts failures in a row.
///
/// A failed poll yields [`Reading::invalid()`]; the controller keeps the
/// last good reading in its state.  There is no retry other than the next
/// scheduled poll.
#[derive(Debug, Default)]
pub struct SensorReader {
    consecutive_failures: u32,
}

impl SensorReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one sample.
    pub fn poll(&mut self, port: &mut impl SensorPort, sink: &mut impl EventSink) -> Reading {
        let result = port.sample().and_then(|s| {
            if s.temperature_c.is_finite() && s.humidity_percent.is_finite() {
                Ok(s)
            } else {
                Err(SensorError::InvalidData)
            }
        });

        match result {
            Ok(sample) => {
                if self.consecutive_failures > 0 {
                    sink.emit(&AppEvent::SensorRecovered {
                        after_failures: self.consecutive_failures,
                    });
                    self.consecutive_failures = 0;
                }
                Reading::from_sample(sample)
            }
            Err(error) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                warn!(
                    "Sensor read failed ({}), keeping last reading ({} in a row)",
                    error, self.consecutive_failures
                );
                sink.emit(&AppEvent::SensorFault {
                    error,
                    consecutive: self.consecutive_failures,
                });
                Reading::invalid()
            }
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
