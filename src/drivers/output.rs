//! On/off digital output driver (dark-indicator LED, alarm buzzer).
//!
//! A dumb actuator: the policy decides, this only drives the pin and
//! remembers the level it last wrote.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::drivers::hw_init;

pub struct DigitalOutput {
    name: &'static str,
    gpio: i32,
    on: bool,
}

impl DigitalOutput {
    /// Wraps a pin already configured (and driven low) by `hw_init`.
    pub fn new(name: &'static str, gpio: i32) -> Self {
        Self {
            name,
            gpio,
            on: false,
        }
    }

    /// Drive the pin.  Written every call so a glitched level heals on
    /// the next poll cycle.
    pub fn set(&mut self, on: bool) {
        match hw_init::gpio_write(self.gpio, on) {
            Ok(()) => self.on = on,
            Err(e) => warn!("{} (GPIO{}): {}", self.name, self.gpio, e),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
