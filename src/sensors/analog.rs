//! Raw ADC inputs: MQ-135 air-quality sensor and LDR light divider.
//!
//! No scaling or calibration. The raw 12-bit value is only meaningful
//! relative to the configured thresholds.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` per channel for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use crate::app::ports::AnalogChannel;
use crate::config::ADC_MAX_RAW;

#[cfg(not(target_os = "espidf"))]
static SIM_MQ135_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(ADC_MAX_RAW);

#[cfg(not(target_os = "espidf"))]
fn sim_slot(channel: AnalogChannel) -> &'static AtomicU16 {
    match channel {
        AnalogChannel::AirQuality => &SIM_MQ135_ADC,
        AnalogChannel::Light => &SIM_LDR_ADC,
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: AnalogChannel, raw: u16) {
    sim_slot(channel).store(raw, Ordering::Relaxed);
}

pub struct AnalogSensor {
    channel: AnalogChannel,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    adc1_channel: u32,
}

impl AnalogSensor {
    pub fn new(channel: AnalogChannel, adc1_channel: u32) -> Self {
        Self {
            channel,
            adc1_channel,
        }
    }

    pub fn channel(&self) -> AnalogChannel {
        self.channel
    }

    /// One conversion, clamped to the 12-bit range.
    pub fn read(&self) -> u16 {
        self.read_adc().min(ADC_MAX_RAW)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc1_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        sim_slot(self.channel).load(Ordering::Relaxed)
    }
}
