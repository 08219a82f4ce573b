//! EnvStation Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   WifiAdapter   Esp32Time      │
//! │  (Sensor+Actuator) (EventSink)    (Connectivity)               │
//! │  http_server (httpd task, reads SharedState)                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          StationService (pure logic)                   │    │
//! │  │  policy · slow-sensor gating · telemetry               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::{PinDriver, Pull};
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use envstation::adapters::hardware::HardwareAdapter;
use envstation::adapters::http_server;
use envstation::adapters::log_sink::LogEventSink;
use envstation::adapters::time::Esp32TimeAdapter;
use envstation::adapters::wifi::{ConnectivityPort, WifiAdapter};
use envstation::app::ports::AnalogChannel;
use envstation::app::service::StationService;
use envstation::app::state::SharedState;
use envstation::config::SystemConfig;
use envstation::drivers::hw_init;
use envstation::drivers::output::DigitalOutput;
use envstation::pins;
use envstation::sensors::SensorHub;
use envstation::sensors::analog::AnalogSensor;
use envstation::sensors::dht11::Dht11;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EnvStation v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::from_build_env();
    info!(
        "Config: LDR_TH={} MQ_TH={} poll={}ms dht={}ms port={}",
        config.thresholds.light,
        config.thresholds.air_quality,
        config.poll_interval_ms,
        config.slow_sensor_interval_ms,
        config.http_port
    );

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    if let Err(e) = hw_init::init_peripherals() {
        // Without ADC and outputs there is nothing useful to do.
        error!("HAL init failed: {}, halting", e);
        return Err(e.into());
    }

    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    anyhow::ensure!(
        dht_pin.pin() == pins::DHT11_GPIO,
        "DHT11 driver bound to GPIO{}, expected GPIO{}",
        dht_pin.pin(),
        pins::DHT11_GPIO
    );
    dht_pin.set_pull(Pull::Up)?;

    let sensor_hub = SensorHub::new(
        AnalogSensor::new(AnalogChannel::AirQuality, pins::MQ135_ADC1_CHANNEL),
        AnalogSensor::new(AnalogChannel::Light, pins::LDR_ADC1_CHANNEL),
        Dht11::new(dht_pin, Ets),
    );
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        DigitalOutput::new("LED (dark)", pins::LED_DARK_GPIO),
        DigitalOutput::new("buzzer (air)", pins::BUZZER_GPIO),
    );

    // ── 3. WiFi (one bounded attempt) ─────────────────────────
    let driver = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;
    let mut wifi = WifiAdapter::new(
        driver,
        Duration::from_millis(u64::from(config.wifi_connect_timeout_ms)),
    );
    let ssid = option_env!("WIFI_SSID").unwrap_or_default();
    let pass = option_env!("WIFI_PASS").unwrap_or_default();
    match wifi.set_credentials(ssid, pass).and_then(|()| wifi.connect()) {
        Ok(()) => info!("WiFi up, dashboard at http://{}/", wifi.network_info().display_ip()),
        Err(e) => warn!("WiFi unavailable ({}), continuing offline", e),
    }

    // ── 4. State cache + HTTP ─────────────────────────────────
    let state = SharedState::new();
    state.record_network(wifi.network_info());
    let _server = http_server::start(state.clone(), config.thresholds, config.http_port)?;

    // ── 5. Poll loop ──────────────────────────────────────────
    let poll_interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let time = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut service = StationService::new(config, state);
    service.start(&mut hw, &mut sink);

    loop {
        wifi.poll();
        service.set_network(wifi.network_info());
        service.tick(time.uptime_ms(), &mut hw, &mut sink);
        std::thread::sleep(poll_interval);
    }
}
