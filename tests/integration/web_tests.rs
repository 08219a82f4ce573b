//! End-to-end tests: poll loop → shared cache → HTTP responders.

use super::mock_hw::{MockHardware, RecordingSink};

use envstation::app::service::StationService;
use envstation::app::state::SharedState;
use envstation::config::SystemConfig;
use envstation::error::SensorError;
use envstation::web::{self, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

fn api_json(state: &SharedState) -> serde_json::Value {
    let resp = web::respond("/api", &state.snapshot(), &SystemConfig::default().thresholds);
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, CONTENT_TYPE_JSON);
    serde_json::from_str(&resp.body).expect("api body is JSON")
}

fn running_service() -> (StationService, MockHardware, RecordingSink) {
    let mut service = StationService::new(SystemConfig::default(), SharedState::new());
    let mut hw = MockHardware::new(0, 4095);
    let mut sink = RecordingSink::new();
    service.start(&mut hw, &mut sink);
    (service, hw, sink)
}

#[test]
fn api_reports_null_climate_before_first_success() {
    let (mut service, mut hw, mut sink) = running_service();
    hw.push_climate_error(SensorError::Timeout);
    service.tick(2000, &mut hw, &mut sink);

    let json = api_json(service.state());
    assert!(json["temperature_c"].is_null());
    assert!(json["humidity_pct"].is_null());
}

#[test]
fn api_retains_climate_after_failure() {
    let (mut service, mut hw, mut sink) = running_service();
    hw.push_climate(22.5, 55.0);
    hw.push_climate_error(SensorError::Checksum);
    service.tick(2000, &mut hw, &mut sink);
    service.tick(4000, &mut hw, &mut sink);

    let json = api_json(service.state());
    assert_eq!(json["temperature_c"].as_f64(), Some(22.5));
    assert_eq!(json["humidity_pct"].as_f64(), Some(55.0));
}

#[test]
fn api_mirrors_actuators_and_raw_values() {
    let (mut service, mut hw, mut sink) = running_service();
    hw.air_quality_raw = 2000;
    hw.light_raw = 1200;
    service.tick(50, &mut hw, &mut sink);

    let json = api_json(service.state());
    assert_eq!(json["mq135_raw"], 2000);
    assert_eq!(json["ldr_raw"], 1200);
    assert_eq!(json["led_dark"], true);
    assert_eq!(json["buzzer_air"], true);
    assert_eq!(json["rssi_dbm"], 0);
}

#[test]
fn dashboard_served_from_same_cache() {
    let (mut service, mut hw, mut sink) = running_service();
    hw.push_climate(22.5, 55.0);
    service.tick(2000, &mut hw, &mut sink);

    let resp = web::respond(
        "/",
        &service.state().snapshot(),
        &service.config().thresholds,
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, CONTENT_TYPE_HTML);
    assert!(resp.body.contains("22.5"));
    assert!(resp.body.contains("55.0"));
    assert!(resp.body.contains("/api"));
}

#[test]
fn unknown_path_is_not_found() {
    let state = SharedState::new();
    let resp = web::respond(
        "/unknown",
        &state.snapshot(),
        &SystemConfig::default().thresholds,
    );
    assert_eq!(resp.status, 404);
    assert_eq!(resp.content_type, CONTENT_TYPE_TEXT);
    assert_eq!(resp.body, "Not found");
}

#[test]
fn readers_on_other_threads_see_whole_snapshots() {
    let (mut service, mut hw, mut sink) = running_service();
    service.tick(0, &mut hw, &mut sink);
    let state = service.state().clone();

    let reader = std::thread::spawn(move || {
        for _ in 0..200 {
            let snap = state.snapshot();
            // Outputs are always the policy applied to the cached values.
            let t = SystemConfig::default().thresholds;
            assert_eq!(snap.actuators.dark_indicator, snap.reading.light_raw < t.light);
            assert_eq!(snap.actuators.alarm, snap.reading.air_quality_raw > t.air_quality);
        }
    });

    for i in 0..200u16 {
        hw.light_raw = (i * 37) % 4096;
        hw.air_quality_raw = (i * 53) % 4096;
        service.tick(u64::from(i) * 50, &mut hw, &mut sink);
    }
    reader.join().expect("reader thread");
}
