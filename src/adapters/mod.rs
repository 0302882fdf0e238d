//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements           | Connects to               |
//! |-----------------|----------------------|---------------------------|
//! | `hardware`      | SensorPort           | DHT22 sensor              |
//! |                 | ActuatorPort         | fast-charge + fan outputs |
//! | `display`       | DisplayPort          | 16×2 LCD or serial log    |
//! | `log_sink`      | EventSink            | Serial log output         |
//! | `time`          | Clock                | ESP32 system timer        |
//! | `http_server`   | (status endpoint)    | ESP-IDF httpd             |
//! | `wifi`          | ConnectivityPort     | ESP-IDF WiFi STA          |

pub mod display;
pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http_server;
pub mod log_sink;
pub mod time;
pub mod wifi;
