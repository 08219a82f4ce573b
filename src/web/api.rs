//! JSON responder for `GET /api`.

use serde::Serialize;

use crate::app::state::Snapshot;

/// Wire shape of the `/api` body.  Field names are part of the public
/// interface; do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApiPayload {
    /// `null` until the DHT11 has produced one good reading.
    pub temperature_c: Option<f32>,
    /// `null` until the DHT11 has produced one good reading.
    pub humidity_pct: Option<f32>,
    pub mq135_raw: u16,
    pub ldr_raw: u16,
    pub led_dark: bool,
    pub buzzer_air: bool,
    /// `0` while not associated.
    pub rssi_dbm: i32,
}

impl From<&Snapshot> for ApiPayload {
    fn from(s: &Snapshot) -> Self {
        Self {
            temperature_c: s.reading.temperature_c,
            humidity_pct: s.reading.humidity_pct,
            mq135_raw: s.reading.air_quality_raw,
            ldr_raw: s.reading.light_raw,
            led_dark: s.actuators.dark_indicator,
            buzzer_air: s.actuators.alarm,
            rssi_dbm: s.network.display_rssi(),
        }
    }
}

pub fn render_api(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string(&ApiPayload::from(snapshot))
}
