//! Station service — the hexagonal core of the poll loop.
//!
//! [`StationService`] owns the timing state of the loop and the handle to
//! the shared [`SharedState`] cache.  All I/O flows through port traits
//! injected at call sites, making the loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     StationService      │
//! ActuatorPort ◀──│  policy · rate limiting │ ──▶ SharedState ──▶ HTTP
//!                 └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::SystemConfig;

use super::events::AppEvent;
use super::policy;
use super::ports::{ActuatorPort, AnalogChannel, EventSink, SensorPort};
use super::state::{ActuatorState, NetworkInfo, SharedState};

// ───────────────────────────────────────────────────────────────
// StationService
// ───────────────────────────────────────────────────────────────

pub struct StationService {
    config: SystemConfig,
    state: SharedState,
    /// Outputs applied on the previous tick (both off after `start`).
    last_actuators: ActuatorState,
    /// Uptime of the last DHT11 attempt; boot counts as an attempt so the
    /// sensor gets one full interval to settle after power-up.
    last_slow_attempt_ms: u64,
    last_telemetry_ms: u64,
    tick_count: u64,
    consecutive_climate_failures: u32,
}

impl StationService {
    /// Construct the service.  Does **not** touch hardware; call
    /// [`start`](Self::start) next.
    pub fn new(config: SystemConfig, state: SharedState) -> Self {
        Self {
            config,
            state,
            last_actuators: ActuatorState::default(),
            last_slow_attempt_ms: 0,
            last_telemetry_ms: 0,
            tick_count: 0,
            consecutive_climate_failures: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put both outputs in a known state and announce the loop.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.last_actuators = ActuatorState::default();
        sink.emit(&AppEvent::Started);
        info!(
            "StationService started (LDR_TH={} MQ_TH={})",
            self.config.thresholds.light, self.config.thresholds.air_quality
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll-loop iteration at uptime `now_ms`:
    /// analog read → policy → outputs → (rate-limited) DHT11 read.
    ///
    /// HTTP requests are served concurrently by the server task and only
    /// ever observe whole snapshots.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Fast analog channels
        let light_raw = hw.read_analog(AnalogChannel::Light);
        let air_quality_raw = hw.read_analog(AnalogChannel::AirQuality);

        // 2. Policy → outputs
        let actuators = policy::decide(air_quality_raw, light_raw, &self.config.thresholds);
        hw.set_dark_indicator(actuators.dark_indicator);
        hw.set_alarm(actuators.alarm);
        self.state.record_analog(air_quality_raw, light_raw, actuators);

        if actuators != self.last_actuators {
            sink.emit(&AppEvent::ActuatorsChanged {
                from: self.last_actuators,
                to: actuators,
            });
            self.last_actuators = actuators;
        }

        // 3. Slow sensor, at most once per interval
        if self.slow_sensor_due(now_ms) {
            self.last_slow_attempt_ms = now_ms;
            match hw.read_slow_sensor() {
                Ok(climate) => {
                    self.consecutive_climate_failures = 0;
                    self.state.record_climate(climate);
                    sink.emit(&AppEvent::ClimateUpdated(climate));
                }
                Err(e) => {
                    self.consecutive_climate_failures =
                        self.consecutive_climate_failures.saturating_add(1);
                    debug!(
                        "DHT11 read failed ({}), {} in a row, keeping cached values",
                        e, self.consecutive_climate_failures
                    );
                    sink.emit(&AppEvent::ClimateReadFailed(e));
                }
            }
        }

        // 4. Telemetry
        if now_ms.saturating_sub(self.last_telemetry_ms)
            >= u64::from(self.config.telemetry_interval_ms)
        {
            self.last_telemetry_ms = now_ms;
            sink.emit(&AppEvent::Telemetry(self.state.snapshot()));
        }
    }

    fn slow_sensor_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_slow_attempt_ms)
            >= u64::from(self.config.slow_sensor_interval_ms)
    }

    /// Publish the current network identity to the responders.
    pub fn set_network(&self, network: NetworkInfo) {
        self.state.record_network(network);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Handle to the cache the HTTP responders read from.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Total poll-loop iterations since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// DHT11 failures since the last successful read.
    pub fn consecutive_climate_failures(&self) -> u32 {
        self.consecutive_climate_failures
    }
}
