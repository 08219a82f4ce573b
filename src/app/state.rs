//! State cache shared between the poll loop and the HTTP responders.
//!
//! The poll loop is the only writer.  The HTTP server runs its handlers
//! on its own task, so every access goes through one mutex and readers
//! always copy out a whole [`Snapshot`].  A cycle's fields are written
//! inside a single lock hold so a client never sees a torn mix of old
//! and new values.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// One successful DHT11 transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Most recent sensor values.
///
/// Temperature and humidity stay `None` until the first successful
/// slow-sensor read and then keep the last good value forever.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    /// Raw MQ-135 ADC value (0 – 4095).
    pub air_quality_raw: u16,
    /// Raw LDR ADC value (0 – 4095).
    pub light_raw: u16,
}

/// Actuator outputs derived from the latest analog reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorState {
    /// Dark-indicator LED.
    pub dark_indicator: bool,
    /// Air-quality buzzer.
    pub alarm: bool,
}

/// Network identity shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkInfo {
    pub local_ip: Option<Ipv4Addr>,
    pub rssi_dbm: Option<i8>,
}

impl NetworkInfo {
    /// Address to display; `0.0.0.0` while not associated.
    pub fn display_ip(&self) -> Ipv4Addr {
        self.local_ip.unwrap_or(Ipv4Addr::UNSPECIFIED)
    }

    /// Signal strength to display; `0` while not associated.
    pub fn display_rssi(&self) -> i32 {
        self.rssi_dbm.map_or(0, i32::from)
    }
}

/// Point-in-time copy of the whole cache.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub reading: Reading,
    pub actuators: ActuatorState,
    pub network: NetworkInfo,
}

// ---------------------------------------------------------------------------
// Shared handle
// ---------------------------------------------------------------------------

/// Cloneable handle to the process-wide state cache.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<Snapshot>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means a handler panicked mid-copy; the data
    /// is plain `Copy` values and still usable.
    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy the current state out under one lock hold.
    pub fn snapshot(&self) -> Snapshot {
        *self.lock()
    }

    /// Store one cycle's analog values together with the outputs derived
    /// from them.
    pub fn record_analog(&self, air_quality_raw: u16, light_raw: u16, actuators: ActuatorState) {
        let mut s = self.lock();
        s.reading.air_quality_raw = air_quality_raw;
        s.reading.light_raw = light_raw;
        s.actuators = actuators;
    }

    /// Overwrite temperature and humidity after a successful read.
    pub fn record_climate(&self, climate: ClimateReading) {
        let mut s = self.lock();
        s.reading.temperature_c = Some(climate.temperature_c);
        s.reading.humidity_pct = Some(climate.humidity_pct);
    }

    pub fn record_network(&self, network: NetworkInfo) {
        self.lock().network = network;
    }
}
