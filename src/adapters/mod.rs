//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC1, DHT11 GPIO   |
//! |                | ActuatorPort       | ESP32 GPIO               |
//! | `http_server`  | —                  | ESP-IDF httpd            |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | —                  | ESP32 system timer       |
//! | `wifi`         | ConnectivityPort   | ESP-IDF WiFi STA         |

pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http_server;
pub mod log_sink;
pub mod time;
pub mod wifi;
