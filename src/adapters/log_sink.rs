//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB serial on the device).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(s) => {
                let r = &s.reading;
                info!(
                    "TELEM | T={:?}\u{00b0}C H={:?}% | MQ135={} LDR={} | led={} buzzer={} | \
                     ip={} rssi={}dBm",
                    r.temperature_c,
                    r.humidity_pct,
                    r.air_quality_raw,
                    r.light_raw,
                    on_off(s.actuators.dark_indicator),
                    on_off(s.actuators.alarm),
                    s.network.display_ip(),
                    s.network.display_rssi(),
                );
            }
            AppEvent::ActuatorsChanged { from, to } => {
                info!(
                    "ACT | led {}->{} buzzer {}->{}",
                    on_off(from.dark_indicator),
                    on_off(to.dark_indicator),
                    on_off(from.alarm),
                    on_off(to.alarm),
                );
            }
            AppEvent::ClimateUpdated(c) => {
                info!("DHT | T={:.1}\u{00b0}C H={:.1}%", c.temperature_c, c.humidity_pct);
            }
            AppEvent::ClimateReadFailed(e) => {
                warn!("DHT | read failed: {}", e);
            }
            AppEvent::Started => {
                info!("START | poll loop running");
            }
        }
    }
}
