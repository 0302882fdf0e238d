//! ChargeGuard Firmware: Main Entry Point
//!
//! Hexagonal architecture driven by one cooperative tick loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   Display        Esp32Time     │
//! │  (Sensor+Actuator) (EventSink)    (LCD or log)   (Clock)       │
//! │  WifiAdapter       StatusHttpServer (httpd) ◀── StatusBoard     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ChargeController (pure logic)                │    │
//! │  │  SensorReader · mode evaluation · presentation         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven) → Runtime                         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{info, warn};

use chargeguard::adapters::display::Display;
use chargeguard::adapters::hardware::HardwareAdapter;
use chargeguard::adapters::log_sink::LogEventSink;
use chargeguard::adapters::http_server::StatusHttpServer;
use chargeguard::adapters::time::Esp32TimeAdapter;
use chargeguard::adapters::wifi::WifiAdapter;
use chargeguard::app::ports::Clock;
use chargeguard::app::runtime::Runtime;
use chargeguard::app::service::ChargeController;
use chargeguard::config::ControllerConfig;
use chargeguard::drivers::lcd::Lcd1602;
use chargeguard::drivers::switch::Switch;
use chargeguard::drivers::watchdog::Watchdog;
use chargeguard::net::board::StatusBoard;
use chargeguard::pins;
use chargeguard::scheduler::Scheduler;
use chargeguard::sensors::dht22::Dht22Sensor;
use chargeguard::startup::{self, NetworkStatus};

/// Delay between ticks; lets the FreeRTOS idle task run.
const TICK_YIELD_MS: u32 = 1;
/// Delay between association polls.
const ASSOCIATE_POLL_MS: u32 = 50;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ChargeGuard v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (build-time JSON + credentials) ──────
    let config = ControllerConfig::load(
        option_env!("CHARGEGUARD_CONFIG"),
        option_env!("WIFI_SSID"),
        option_env!("WIFI_PASS"),
    )
    .context("invalid controller configuration")?;
    let thresholds = config.thresholds()?;
    info!(
        "Config: fan>={:.1}C slow>={:.1}C sensor={}ms display={}ms",
        config.fan_on_temp_c,
        config.slow_charge_temp_c,
        config.sensor_interval_ms,
        config.display_interval_ms
    );

    let watchdog = Watchdog::default();
    let clock = Esp32TimeAdapter::new();
    let log_sink = LogEventSink::new();

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // SAFETY: each GPIO number is used for exactly one driver (see pins.rs).
    let fast_charge_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::FAST_CHARGE_GPIO) })
        .context("fast-charge GPIO")?;
    let fan_pin =
        PinDriver::output(unsafe { AnyOutputPin::new(pins::FAN_GPIO) }).context("fan GPIO")?;
    let hw = HardwareAdapter::new(
        Dht22Sensor::new(pins::DHT_GPIO),
        Switch::active_high(fast_charge_pin, "fast-charge"),
        Switch::active_high(fan_pin, "fan"),
    );

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        unsafe { AnyIOPin::new(pins::I2C_SDA_GPIO) },
        unsafe { AnyIOPin::new(pins::I2C_SCL_GPIO) },
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )
    .context("I2C bus")?;
    let display = Display::detect(Lcd1602::new(i2c, Ets, pins::LCD_I2C_ADDR));

    // ── 4. Boot state: outputs released, banner up ────────────
    let mut runtime = Runtime::new(
        ChargeController::new(thresholds),
        hw,
        display,
        log_sink,
    );
    runtime.start();
    startup::show_banner(runtime.display_mut());

    // ── 5. Network (time-boxed) ───────────────────────────────
    let mut wifi = WifiAdapter::new(EspWifi::new(peripherals.modem, sysloop, Some(nvs))?);
    let network = startup::associate(&mut wifi, &clock, &config, runtime.sink_mut(), || {
        watchdog.feed();
        FreeRtos::delay_ms(ASSOCIATE_POLL_MS);
    });

    // Handlers read the board; the tick loop is its only writer.
    let _http = match network {
        NetworkStatus::Connected { .. } => {
            let board = StatusBoard::new(runtime.controller().status());
            match StatusHttpServer::start(&board, config.http_port) {
                Ok(server) => {
                    runtime.attach_status_board(board, server.port());
                    info!("Status at http://<device>:{}/status", server.port());
                    Some(server)
                }
                Err(e) => {
                    warn!("Status server disabled: {}", e);
                    None
                }
            }
        }
        NetworkStatus::Unavailable(reason) => {
            warn!("Running without network: {}", reason);
            None
        }
    };

    // ── 6. Tick loop ──────────────────────────────────────────
    let mut scheduler = Scheduler::new(&config);
    info!("System ready. Entering control loop.");

    loop {
        scheduler.tick(clock.now_ms(), &mut runtime);
        watchdog.feed();
        FreeRtos::delay_ms(TICK_YIELD_MS);
    }
}
