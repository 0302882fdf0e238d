//! ESP32 time adapter.
//!
//! Implements [`Clock`] as a wrapping 32-bit millisecond counter.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` (microseconds
//!   since boot, monotonic).
//! - **`not(target_os = "espidf")`**: `std::time::Instant`, with an
//!   optional offset so host runs can start close to the wrap point.

use crate::app::ports::Clock;

pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    #[cfg(not(target_os = "espidf"))]
    offset_ms: u32,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            #[cfg(not(target_os = "espidf"))]
            offset_ms: 0,
        }
    }

    /// Host clock that reads `offset_ms` at construction.
    #[cfg(not(target_os = "espidf"))]
    pub fn starting_at(offset_ms: u32) -> Self {
        Self {
            start: std::time::Instant::now(),
            offset_ms,
        }
    }

    /// Microseconds since boot.
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: read-only query of the high-resolution timer.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        u64::try_from(us).unwrap_or(0)
    }

    /// Microseconds since construction.
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

impl Clock for Esp32TimeAdapter {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        let ms = (self.uptime_us() / 1_000) as u32;
        #[cfg(not(target_os = "espidf"))]
        let ms = ms.wrapping_add(self.offset_ms);
        ms
    }
}
