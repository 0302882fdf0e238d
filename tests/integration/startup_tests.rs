//! Boot sequence: configuration layering, banner and time-boxed association
//! against the simulated WiFi adapter.

use chargeguard::adapters::wifi::{ConnectivityPort, WifiAdapter, WifiState};
use chargeguard::app::events::AppEvent;
use chargeguard::config::ControllerConfig;
use chargeguard::error::{CommsError, ConfigError};
use chargeguard::startup::{self, NetworkStatus};

use super::mock_hw::{ManualClock, RecordingDisplay, RecordingSink};

fn config(json: Option<&str>, ssid: &str, pass: &str) -> ControllerConfig {
    ControllerConfig::load(json, Some(ssid), Some(pass)).unwrap()
}

#[test]
fn build_time_overrides_reach_the_thresholds() {
    let cfg = config(
        Some(r#"{"fan_on_temp_c":30.0,"slow_charge_temp_c":33.5}"#),
        "Bench",
        "",
    );
    let t = cfg.thresholds().unwrap();
    assert_eq!(t.fan_on_c(), 30.0);
    assert_eq!(t.slow_charge_c(), 33.5);
    assert_eq!(cfg.sensor_interval_ms, 2_000);
}

#[test]
fn inverted_thresholds_are_refused_at_load() {
    let err = ControllerConfig::load(
        Some(r#"{"fan_on_temp_c":36.0,"slow_charge_temp_c":35.0}"#),
        None,
        None,
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::ThresholdOrder);
}

#[test]
fn short_password_is_refused_at_load() {
    assert!(matches!(
        ControllerConfig::load(None, Some("Bench"), Some("short")),
        Err(ConfigError::Credentials(_))
    ));
}

#[test]
fn banner_goes_to_the_display() {
    let mut display = RecordingDisplay::default();
    startup::show_banner(&mut display);
    assert_eq!(display.frames.len(), 1);
    assert_eq!(display.frames[0].line1.as_str(), startup::PRODUCT_NAME);
}

#[test]
fn associates_with_reachable_access_point() {
    let cfg = config(None, "Bench", "password1");
    let clock = ManualClock::at(1_000);
    let mut wifi = WifiAdapter::new();
    wifi.sim_set_latency_polls(4);
    let mut sink = RecordingSink::default();
    let mut idles = 0;

    let status = startup::associate(&mut wifi, &clock, &cfg, &mut sink, || {
        idles += 1;
        clock.advance(50);
    });

    assert_eq!(status, NetworkStatus::Connected { elapsed_ms: 150 });
    assert_eq!(idles, 3);
    assert_eq!(wifi.state(), WifiState::Connected);
    assert_eq!(sink.events, vec![AppEvent::NetworkUp { elapsed_ms: 150 }]);
}

#[test]
fn unreachable_access_point_is_abandoned_after_window() {
    let cfg = config(None, "Ghost", "");
    let clock = ManualClock::at(0);
    let mut wifi = WifiAdapter::new();
    wifi.sim_set_available(false);
    let mut sink = RecordingSink::default();

    let status = startup::associate(&mut wifi, &clock, &cfg, &mut sink, || clock.advance(50));

    assert_eq!(status, NetworkStatus::Unavailable(CommsError::AssociationTimeout));
    assert!(!status.is_connected());
    assert_eq!(clock.0.get(), cfg.wifi_connect_timeout_ms);
    assert_eq!(wifi.state(), WifiState::Abandoned);
    assert!(!wifi.is_connected());
}

#[test]
fn invalid_password_never_starts_radio() {
    // Built by hand: `load` would already refuse this password.
    let mut cfg = ControllerConfig::default();
    cfg.wifi_ssid.push_str("Bench").unwrap();
    cfg.wifi_password.push_str("short").unwrap();
    let clock = ManualClock::at(0);
    let mut wifi = WifiAdapter::new();
    let mut sink = RecordingSink::default();

    let status = startup::associate(&mut wifi, &clock, &cfg, &mut sink, || clock.advance(50));

    assert_eq!(status, NetworkStatus::Unavailable(CommsError::InvalidPassword));
    assert_eq!(wifi.state(), WifiState::Idle);
    assert_eq!(clock.0.get(), 0);
}
