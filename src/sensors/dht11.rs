//! DHT11 temperature / humidity sensor on a single-wire open-drain line.
//!
//! Protocol (per transaction):
//!
//! ```text
//! host:   ‾‾‾\____18 ms____/‾‾
//! sensor:                      \__80 µs__/‾‾80 µs‾‾\  40 × (50 µs low + 26 µs | 70 µs high)
//! ```
//!
//! A bit is `1` when its high pulse is longer than [`BIT_ONE_MIN_US`].
//! The 5-byte frame is humidity (int, dec), temperature (int, dec) and
//! an 8-bit checksum.
//!
//! ## Dual-target design
//!
//! [`Dht11`] is generic over `embedded-hal` 1.0 pin and delay traits and
//! is what runs on the device.  On host/test, [`SimClimateSensor`] reads
//! an injectable static instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::state::ClimateReading;
use crate::error::SensorError;

use super::SlowSensor;

/// Host start pulse (datasheet: at least 18 ms).
const START_LOW_MS: u32 = 18;
/// Any single level lasting longer than this is a bus fault.
const EDGE_TIMEOUT_US: u32 = 100;
/// High pulses of 26–28 µs are zeros, ~70 µs are ones.
const BIT_ONE_MIN_US: u32 = 40;

const HUMIDITY_RANGE: core::ops::RangeInclusive<f32> = 0.0..=100.0;
const TEMPERATURE_RANGE: core::ops::RangeInclusive<f32> = -40.0..=80.0;

/// Decode and validate a raw 5-byte frame.
pub fn decode_frame(frame: &[u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = frame[0] as f32 + frame[1] as f32 / 10.0;
    let mut temperature_c = frame[2] as f32 + (frame[3] & 0x7F) as f32 / 10.0;
    if frame[3] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    if !HUMIDITY_RANGE.contains(&humidity_pct) || !TEMPERATURE_RANGE.contains(&temperature_c) {
        return Err(SensorError::OutOfRange);
    }

    Ok(ClimateReading {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be configured open-drain with a pull-up; it is released
    /// (driven high) immediately so the bus idles.
    pub fn new(pin: P, delay: D) -> Self {
        let mut dht = Self { pin, delay };
        dht.release_line();
        dht
    }

    fn release_line(&mut self) {
        if self.pin.set_high().is_err() {
            debug!("DHT11: could not release data line");
        }
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.set_low().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::GpioFailed)?;

        // Sensor response: pulls low, releases, then pulls low for bit 0.
        self.wait_while(true)?;
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > BIT_ONE_MIN_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait while the line sits at `high`; returns the time spent.
    fn wait_while(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut elapsed_us = 0;
        while self.pin.is_high().map_err(|_| SensorError::GpioFailed)? == high {
            if elapsed_us >= EDGE_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed_us += 1;
        }
        Ok(elapsed_us)
    }
}

impl<P, D> SlowSensor for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame();
        // Leave the bus idle whatever happened mid-transaction.
        self.release_line();
        decode_frame(&frame?)
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_CLIMATE: std::sync::Mutex<Result<ClimateReading, SensorError>> =
    std::sync::Mutex::new(Err(SensorError::Timeout));

/// Set what the next simulated DHT11 transaction returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(result: Result<ClimateReading, SensorError>) {
    *SIM_CLIMATE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = result;
}

/// Host stand-in for the DHT11.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimClimateSensor;

#[cfg(not(target_os = "espidf"))]
impl SlowSensor for SimClimateSensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        *SIM_CLIMATE
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
