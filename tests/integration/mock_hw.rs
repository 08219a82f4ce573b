//! Mock hardware adapter for integration tests.
//!
//! Serves scripted sensor values and records every actuator call so
//! tests can assert on the full command history without touching real
//! ADC or GPIO registers.

use std::collections::VecDeque;

use envstation::app::events::AppEvent;
use envstation::app::ports::{ActuatorPort, AnalogChannel, EventSink, SensorPort};
use envstation::app::state::ClimateReading;
use envstation::error::SensorError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    DarkIndicator(bool),
    Alarm(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub air_quality_raw: u16,
    pub light_raw: u16,
    /// Results handed out by successive slow-sensor reads; empty reads
    /// fail with a timeout.
    pub climate: VecDeque<Result<ClimateReading, SensorError>>,
    pub slow_reads: u32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(air_quality_raw: u16, light_raw: u16) -> Self {
        Self {
            air_quality_raw,
            light_raw,
            climate: VecDeque::new(),
            slow_reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn push_climate(&mut self, temperature_c: f32, humidity_pct: f32) {
        self.climate.push_back(Ok(ClimateReading {
            temperature_c,
            humidity_pct,
        }));
    }

    pub fn push_climate_error(&mut self, e: SensorError) {
        self.climate.push_back(Err(e));
    }

    pub fn dark_indicator_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::DarkIndicator(on) => Some(*on),
                ActuatorCall::Alarm(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn alarm_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Alarm(on) => Some(*on),
                ActuatorCall::DarkIndicator(_) => None,
            })
            .unwrap_or(false)
    }
}

impl SensorPort for MockHardware {
    fn read_analog(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::AirQuality => self.air_quality_raw,
            AnalogChannel::Light => self.light_raw,
        }
    }

    fn read_slow_sensor(&mut self) -> Result<ClimateReading, SensorError> {
        self.slow_reads += 1;
        self.climate.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}

impl ActuatorPort for MockHardware {
    fn set_dark_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::DarkIndicator(on));
    }

    fn set_alarm(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Alarm(on));
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
