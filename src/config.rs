//! System configuration parameters
//!
//! All tunable parameters for the EnvStation.  Values are fixed at build
//! time: defaults below, optionally overridden through environment
//! variables read by [`SystemConfig::from_build_env`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest value a 12-bit ADC conversion can return.
pub const ADC_MAX_RAW: u16 = 4095;

/// DHT11 datasheet minimum between two transactions.
const DHT11_MIN_INTERVAL_MS: u32 = 1000;

/// Calibration thresholds for the two analog channels.
///
/// Both values are hardware-dependent (LDR divider, MQ-135 load
/// resistor) and only meaningful relative to the raw ADC scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// LDR raw value below which the room is considered dark.
    pub light: u16,
    /// MQ-135 raw value above which the air quality alarm sounds.
    pub air_quality: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            light: 1500,
            air_quality: 1800,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Actuation ---
    pub thresholds: Thresholds,

    // --- Timing ---
    /// Delay between poll-loop iterations (milliseconds)
    pub poll_interval_ms: u32,
    /// Minimum spacing between DHT11 read attempts (milliseconds)
    pub slow_sensor_interval_ms: u32,
    /// Telemetry log interval (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Network ---
    /// TCP port of the dashboard / API server
    pub http_port: u16,
    /// Upper bound on the initial WiFi join wait (milliseconds)
    pub wifi_connect_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),

            // Timing
            poll_interval_ms: 50,          // 20 Hz
            slow_sensor_interval_ms: 2000, // DHT11 is slow
            telemetry_interval_ms: 10_000,

            // Network
            http_port: 80,
            wifi_connect_timeout_ms: 20_000,
        }
    }
}

impl SystemConfig {
    /// Defaults with `LDR_THRESHOLD`, `MQ_THRESHOLD` and `HTTP_PORT`
    /// applied from the build environment.
    ///
    /// Unparseable overrides are ignored; an override set that fails
    /// [`validate`](Self::validate) falls back to the defaults.
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("LDR_THRESHOLD"),
            option_env!("MQ_THRESHOLD"),
            option_env!("HTTP_PORT"),
        )
    }

    fn with_overrides(ldr: Option<&str>, mq: Option<&str>, port: Option<&str>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = ldr.and_then(|s| s.trim().parse().ok()) {
            cfg.thresholds.light = v;
        }
        if let Some(v) = mq.and_then(|s| s.trim().parse().ok()) {
            cfg.thresholds.air_quality = v;
        }
        if let Some(v) = port.and_then(|s| s.trim().parse().ok()) {
            cfg.http_port = v;
        }
        match cfg.validate() {
            Ok(()) => cfg,
            Err(e) => {
                log::warn!("Build-time config override rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values the hardware or protocol cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.thresholds.light > ADC_MAX_RAW {
            return Err(Error::Config("light threshold exceeds ADC range"));
        }
        if self.thresholds.air_quality > ADC_MAX_RAW {
            return Err(Error::Config("air quality threshold exceeds ADC range"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero"));
        }
        if self.slow_sensor_interval_ms < DHT11_MIN_INTERVAL_MS {
            return Err(Error::Config("slow sensor interval below DHT11 minimum"));
        }
        if self.telemetry_interval_ms == 0 {
            return Err(Error::Config("telemetry interval must be non-zero"));
        }
        if self.http_port == 0 {
            return Err(Error::Config("HTTP port must be non-zero"));
        }
        Ok(())
    }
}
