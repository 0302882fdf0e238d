//! Binary output driver (relay, MOSFET gate, load switch).
//!
//! Wraps any [`OutputPin`] so the same code drives an `esp-idf-hal`
//! `PinDriver` on target and a recording pin in tests.  The last level
//! written is cached and the pin is only touched when the requested level
//! differs from it.

use embedded_hal::digital::OutputPin;
use log::{debug, warn};

pub struct Switch<P: OutputPin> {
    pin: P,
    label: &'static str,
    active_high: bool,
    /// Logical level last written successfully; `None` before the first
    /// write and after a failed one.
    level: Option<bool>,
}

impl<P: OutputPin> Switch<P> {
    pub fn active_high(pin: P, label: &'static str) -> Self {
        Self {
            pin,
            label,
            active_high: true,
            level: None,
        }
    }

    /// For loads wired so that driving the pin low energises them.
    pub fn active_low(pin: P, label: &'static str) -> Self {
        Self {
            pin,
            label,
            active_high: false,
            level: None,
        }
    }

    pub fn set(&mut self, on: bool) {
        if self.level == Some(on) {
            return;
        }

        let drive_high = on == self.active_high;
        let result = if drive_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        match result {
            Ok(()) => {
                debug!("{}: {}", self.label, if on { "on" } else { "off" });
                self.level = Some(on);
            }
            Err(e) => {
                warn!("{}: pin write failed ({:?})", self.label, e);
                self.level = None;
            }
        }
    }

    pub fn is_on(&self) -> bool {
        self.level == Some(true)
    }

    pub fn level(&self) -> Option<bool> {
        self.level
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}
