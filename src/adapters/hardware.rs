//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, AnalogChannel, SensorPort};
use crate::app::state::{ActuatorState, ClimateReading};
use crate::drivers::output::DigitalOutput;
use crate::error::SensorError;
use crate::sensors::{SensorHub, SlowSensor};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S> {
    sensor_hub: SensorHub<S>,
    dark_led: DigitalOutput,
    buzzer: DigitalOutput,
}

impl<S: SlowSensor> HardwareAdapter<S> {
    pub fn new(sensor_hub: SensorHub<S>, dark_led: DigitalOutput, buzzer: DigitalOutput) -> Self {
        Self {
            sensor_hub,
            dark_led,
            buzzer,
        }
    }

    /// Levels last written to the output pins.
    pub fn outputs(&self) -> ActuatorState {
        ActuatorState {
            dark_indicator: self.dark_led.is_on(),
            alarm: self.buzzer.is_on(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SlowSensor> SensorPort for HardwareAdapter<S> {
    fn read_analog(&mut self, channel: AnalogChannel) -> u16 {
        self.sensor_hub.read_analog(channel)
    }

    fn read_slow_sensor(&mut self) -> Result<ClimateReading, SensorError> {
        self.sensor_hub.read_climate()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S: SlowSensor> ActuatorPort for HardwareAdapter<S> {
    fn set_dark_indicator(&mut self, on: bool) {
        self.dark_led.set(on);
    }

    fn set_alarm(&mut self, on: bool) {
        self.buzzer.set(on);
    }
}
