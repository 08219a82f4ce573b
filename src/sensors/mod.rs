//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns both analog inputs and the slow DHT11, and enforces the
//! DHT11's minimum spacing between transactions regardless of how often
//! the caller asks.

pub mod analog;
pub mod dht11;

use std::time::{Duration, Instant};

use crate::app::ports::AnalogChannel;
use crate::app::state::ClimateReading;
use crate::error::SensorError;
use analog::AnalogSensor;

/// Datasheet minimum between two DHT11 transactions.
pub const DHT11_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// A failure-prone sensor with a minimum inter-read interval.
pub trait SlowSensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}

/// Guards a [`SlowSensor`] so it is never touched more often than
/// `min_interval`.  Early calls fail with [`SensorError::TooSoon`]
/// without driving the bus.
pub struct RateLimited<S> {
    inner: S,
    min_interval: Duration,
    last_attempt: Option<Instant>,
}

impl<S: SlowSensor> RateLimited<S> {
    pub fn new(inner: S, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_attempt: None,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SlowSensor> SlowSensor for RateLimited<S> {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let now = Instant::now();
        if let Some(last) = self.last_attempt {
            if now.duration_since(last) < self.min_interval {
                return Err(SensorError::TooSoon);
            }
        }
        self.last_attempt = Some(now);
        self.inner.read()
    }
}

/// Aggregates all sensor drivers.
pub struct SensorHub<S> {
    air_quality: AnalogSensor,
    light: AnalogSensor,
    climate: RateLimited<S>,
}

impl<S: SlowSensor> SensorHub<S> {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(air_quality: AnalogSensor, light: AnalogSensor, climate: S) -> Self {
        Self {
            air_quality,
            light,
            climate: RateLimited::new(climate, DHT11_MIN_INTERVAL),
        }
    }

    pub fn read_analog(&self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::AirQuality => self.air_quality.read(),
            AnalogChannel::Light => self.light.read(),
        }
    }

    pub fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read()
    }
}
