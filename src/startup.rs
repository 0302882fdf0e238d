//! Boot sequence helpers that run once, before the tick loop.
//!
//! Network association is time-boxed: the deadline is checked against the
//! [`Clock`] on every iteration and an idle hook runs between polls, so a
//! missing access point delays control by at most the configured timeout.

use log::info;

use crate::adapters::wifi::ConnectivityPort;
use crate::app::events::AppEvent;
use crate::app::ports::{Clock, DisplayPort, EventSink};
use crate::app::presentation::DisplayFrame;
use crate::config::ControllerConfig;
use crate::error::CommsError;
use crate::scheduler::elapsed_ms;

pub const PRODUCT_NAME: &str = "ChargeGuard";

/// Outcome of the startup association attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Connected { elapsed_ms: u32 },
    Unavailable(CommsError),
}

impl NetworkStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// Product name and firmware version, shown once at boot.
pub fn banner() -> DisplayFrame {
    DisplayFrame::new(PRODUCT_NAME, concat!("fw v", env!("CARGO_PKG_VERSION")))
}

pub fn show_banner(display: &mut impl DisplayPort) {
    let frame = banner();
    info!("{} {}", frame.line1, frame.line2);
    display.show(&frame);
}

/// Join the configured network, giving up after
/// `config.wifi_connect_timeout_ms`.
///
/// `idle` runs once per wait iteration (feed the watchdog, yield the CPU).
/// Never fails: every problem degrades to [`NetworkStatus::Unavailable`].
pub fn associate(
    wifi: &mut impl ConnectivityPort,
    clock: &impl Clock,
    config: &ControllerConfig,
    sink: &mut impl EventSink,
    mut idle: impl FnMut(),
) -> NetworkStatus {
    let status = try_associate(wifi, clock, config, &mut idle);
    match status {
        NetworkStatus::Connected { elapsed_ms } => {
            sink.emit(&AppEvent::NetworkUp { elapsed_ms });
        }
        NetworkStatus::Unavailable(reason) => {
            sink.emit(&AppEvent::NetworkUnavailable { reason });
        }
    }
    status
}

fn try_associate(
    wifi: &mut impl ConnectivityPort,
    clock: &impl Clock,
    config: &ControllerConfig,
    idle: &mut impl FnMut(),
) -> NetworkStatus {
    if !config.has_network() {
        return NetworkStatus::Unavailable(CommsError::NoCredentials);
    }
    if let Err(e) = wifi
        .set_credentials(&config.wifi_ssid, &config.wifi_password)
        .and_then(|()| wifi.begin())
    {
        return NetworkStatus::Unavailable(e);
    }

    let started = clock.now_ms();
    loop {
        wifi.poll();
        let waited = elapsed_ms(clock.now_ms(), started);
        if wifi.is_connected() {
            return NetworkStatus::Connected { elapsed_ms: waited };
        }
        if waited >= config.wifi_connect_timeout_ms {
            wifi.abandon();
            return NetworkStatus::Unavailable(CommsError::AssociationTimeout);
        }
        idle();
    }
}
