//! Actuation policy: raw analog readings → actuator outputs.
//!
//! Stateless and side-effect-free.  Both comparisons are strict and
//! independent; there is no hysteresis or debouncing.

use crate::config::Thresholds;

use super::state::ActuatorState;

/// Decide both outputs from the latest analog readings.
///
/// * dark indicator on when `light_raw < thresholds.light`
/// * alarm on when `air_quality_raw > thresholds.air_quality`
pub fn decide(air_quality_raw: u16, light_raw: u16, thresholds: &Thresholds) -> ActuatorState {
    ActuatorState {
        dark_indicator: light_raw < thresholds.light,
        alarm: air_quality_raw > thresholds.air_quality,
    }
}
