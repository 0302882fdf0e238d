//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]: the hexagonal boundary for network
//! connectivity.  Association is started with [`ConnectivityPort::begin`]
//! and then polled; the caller owns the deadline (see
//! [`startup::associate`](crate::startup::associate)).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: deterministic simulation for host-side tests.

use log::{info, warn};

use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

pub trait ConnectivityPort {
    /// Store (and validate) station credentials.
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), CommsError>;
    /// Start associating.  Returns immediately.
    fn begin(&mut self) -> Result<(), CommsError>;
    /// Advance the association state machine.  Never blocks.
    fn poll(&mut self);
    /// Associated and holding an IP address.
    fn is_connected(&self) -> bool;
    /// Stop trying and power the radio down.
    fn abandon(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Idle,
    Connecting,
    Connected,
    Abandoned,
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

/// Space through tilde only.
fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), CommsError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(CommsError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), CommsError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(CommsError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,

    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,

    /// Simulation: whether an access point answers at all.
    #[cfg(not(target_os = "espidf"))]
    sim_available: bool,
    /// Simulation: polls from `begin` until the link comes up.
    #[cfg(not(target_os = "espidf"))]
    sim_polls_to_connect: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_polls: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: EspWifi<'static>) -> Self {
        Self {
            state: WifiState::Idle,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: WifiState::Idle,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_available: true,
            sim_polls_to_connect: 3,
            sim_polls: 0,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Simulation: make the access point reachable or not.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_available(&mut self, available: bool) {
        self.sim_available = available;
    }

    /// Simulation: number of polls association takes.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_latency_polls(&mut self, polls: u32) {
        self.sim_polls_to_connect = polls;
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_begin(&mut self) -> Result<(), CommsError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: self.ssid.clone(),
                password: self.password.clone(),
                auth_method,
                ..Default::default()
            }))
            .map_err(|e| {
                warn!("WiFi: configuration rejected ({})", e);
                CommsError::ConnectionFailed
            })?;
        self.wifi.start().map_err(|e| {
            warn!("WiFi: start failed ({})", e);
            CommsError::ConnectionFailed
        })?;
        self.wifi.connect().map_err(|e| {
            warn!("WiFi: connect failed ({})", e);
            CommsError::ConnectionFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin(&mut self) -> Result<(), CommsError> {
        self.sim_polls = 0;
        info!("WiFi(sim): associating with '{}'", self.ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_link_up(&mut self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_link_up(&mut self) -> bool {
        if !self.sim_available {
            return false;
        }
        self.sim_polls = self.sim_polls.saturating_add(1);
        self.sim_polls >= self.sim_polls_to_connect
    }

    #[cfg(target_os = "espidf")]
    fn platform_stop(&mut self) {
        let _ = self.wifi.disconnect();
        let _ = self.wifi.stop();
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_stop(&mut self) {
        info!("WiFi(sim): radio off");
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), CommsError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|()| CommsError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| CommsError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    fn begin(&mut self) -> Result<(), CommsError> {
        if self.ssid.is_empty() {
            return Err(CommsError::NoCredentials);
        }
        info!("WiFi: connecting to '{}'", self.ssid);
        self.platform_begin()?;
        self.state = WifiState::Connecting;
        Ok(())
    }

    fn poll(&mut self) {
        if self.state == WifiState::Connecting && self.platform_link_up() {
            self.state = WifiState::Connected;
            info!("WiFi: connected");
        }
    }

    fn is_connected(&self) -> bool {
        self.state == WifiState::Connected
    }

    fn abandon(&mut self) {
        if self.state == WifiState::Abandoned {
            return;
        }
        warn!("WiFi: giving up on '{}'", self.ssid);
        self.platform_stop();
        self.state = WifiState::Abandoned;
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
