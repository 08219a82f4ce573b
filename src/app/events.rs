//! Outbound application events.
//!
//! The [`StationService`](super::service::StationService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::error::SensorError;

use super::state::{ActuatorState, ClimateReading, Snapshot};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The poll loop has started.
    Started,

    /// At least one actuator output changed level.
    ActuatorsChanged {
        from: ActuatorState,
        to: ActuatorState,
    },

    /// A DHT11 read succeeded and the cache was updated.
    ClimateUpdated(ClimateReading),

    /// A DHT11 read failed; the cached values were kept.
    ClimateReadFailed(SensorError),

    /// Periodic telemetry snapshot.
    Telemetry(Snapshot),
}
