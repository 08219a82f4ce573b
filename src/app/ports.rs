//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ StationService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits.  The [`StationService`](super::service::StationService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::SensorError;

use super::state::ClimateReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The two fast analog inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    /// MQ-135 air-quality sensor.
    AirQuality,
    /// LDR ambient-light divider.
    Light,
}

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Sample one analog channel.  Always yields a value (0 – 4095),
    /// even if physically meaningless.
    fn read_analog(&mut self, channel: AnalogChannel) -> u16;

    /// One temperature/humidity transaction.  A failure means "no update
    /// this cycle" and must never be treated as fatal.
    fn read_slow_sensor(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive the dark-indicator LED.
    fn set_dark_indicator(&mut self, on: bool);

    /// Drive the air-quality buzzer.
    fn set_alarm(&mut self, on: bool);

    /// Both outputs off.
    fn all_off(&mut self) {
        self.set_dark_indicator(false);
        self.set_alarm(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
