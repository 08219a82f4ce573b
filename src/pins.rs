//! GPIO / peripheral pin assignments for the EnvStation board (ESP32).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity sensor, single-wire open-drain data line.
pub const DHT11_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// MQ-135 air-quality sensor, ADC1 channel 6 (GPIO 34, input-only).
pub const MQ135_ADC_GPIO: i32 = 34;
pub const MQ135_ADC1_CHANNEL: u32 = 6;

/// LDR light sensor divider, ADC1 channel 7 (GPIO 35, input-only).
/// Lower reading = darker.
pub const LDR_ADC_GPIO: i32 = 35;
pub const LDR_ADC1_CHANNEL: u32 = 7;

// ---------------------------------------------------------------------------
// Actuators — Digital outputs (active HIGH)
// ---------------------------------------------------------------------------

/// Dark-indicator LED.
pub const LED_DARK_GPIO: i32 = 26;
/// Air-quality alarm buzzer.
pub const BUZZER_GPIO: i32 = 27;

/// ESP32 ADC1 channel wired to `gpio`, if any.
pub const fn adc1_channel(gpio: i32) -> Option<u32> {
    match gpio {
        36 => Some(0),
        37 => Some(1),
        38 => Some(2),
        39 => Some(3),
        32 => Some(4),
        33 => Some(5),
        34 => Some(6),
        35 => Some(7),
        _ => None,
    }
}
