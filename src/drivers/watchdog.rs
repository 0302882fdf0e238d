//! Task Watchdog Timer (TWDT) driver.
//!
//! Subscribes the tick-loop task to the ESP-IDF TWDT so a stalled loop
//! resets the device.  Fed once per tick and from the Wi-Fi association
//! idle hook.  On host builds it only counts feeds.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::cell::Cell;

use log::{info, warn};

/// Reset the device when the loop has not fed the watchdog for this long.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

pub struct Watchdog {
    timeout_ms: u32,
    subscribed: bool,
    #[cfg(not(target_os = "espidf"))]
    feeds: Cell<u64>,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        // SAFETY: plain ESP-IDF API calls on the current task handle (null).
        let subscribed = unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }
            esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
        };

        if subscribed {
            info!("Watchdog: subscribed ({}ms timeout, panic on trigger)", timeout_ms);
        } else {
            warn!("Watchdog: failed to subscribe, running unguarded");
        }
        Self {
            timeout_ms,
            subscribed,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        info!("Watchdog(sim): {}ms, no-op", timeout_ms);
        if timeout_ms == 0 {
            warn!("Watchdog(sim): zero timeout");
        }
        Self {
            timeout_ms,
            subscribed: false,
            feeds: Cell::new(0),
        }
    }

    /// Reset the countdown.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the current, subscribed task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.feeds.set(self.feeds.get() + 1);
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Feeds so far (host builds only).
    #[cfg(not(target_os = "espidf"))]
    pub fn feed_count(&self) -> u64 {
        self.feeds.get()
    }
}
