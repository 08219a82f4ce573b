//! Integration tests for the StationService poll loop:
//! analog read → policy → actuators → cache, plus slow-sensor gating.

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use envstation::app::events::AppEvent;
use envstation::app::service::StationService;
use envstation::app::state::{ActuatorState, SharedState};
use envstation::config::SystemConfig;
use envstation::error::SensorError;

fn make_service() -> (StationService, RecordingSink) {
    let mut service = StationService::new(SystemConfig::default(), SharedState::new());
    let mut sink = RecordingSink::new();
    let mut hw = MockHardware::new(0, 4095);
    service.start(&mut hw, &mut sink);
    (service, sink)
}

#[test]
fn start_turns_everything_off_and_announces() {
    let mut service = StationService::new(SystemConfig::default(), SharedState::new());
    let mut hw = MockHardware::new(0, 0);
    let mut sink = RecordingSink::new();
    service.start(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![ActuatorCall::DarkIndicator(false), ActuatorCall::Alarm(false)]
    );
    assert_eq!(sink.events, vec![AppEvent::Started]);
}

#[test]
fn dark_and_polluted_drives_both_outputs() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(2000, 1200);

    service.tick(50, &mut hw, &mut sink);

    assert!(hw.dark_indicator_on());
    assert!(hw.alarm_on());
    let snap = service.state().snapshot();
    assert_eq!(snap.reading.light_raw, 1200);
    assert_eq!(snap.reading.air_quality_raw, 2000);
    assert_eq!(
        snap.actuators,
        ActuatorState {
            dark_indicator: true,
            alarm: true
        }
    );
}

#[test]
fn bright_and_clean_keeps_outputs_off() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(1000, 1800);

    service.tick(50, &mut hw, &mut sink);

    assert!(!hw.dark_indicator_on());
    assert!(!hw.alarm_on());
}

#[test]
fn threshold_values_are_not_triggers() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(1800, 1500);

    service.tick(50, &mut hw, &mut sink);

    assert_eq!(service.state().snapshot().actuators, ActuatorState::default());
}

#[test]
fn actuator_change_event_only_on_transition() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(2000, 4000);

    for t in 1..=5 {
        service.tick(t * 50, &mut hw, &mut sink);
    }
    let changes = |s: &RecordingSink| s.count(|e| matches!(e, AppEvent::ActuatorsChanged { .. }));
    assert_eq!(changes(&sink), 1);

    hw.air_quality_raw = 100;
    service.tick(300, &mut hw, &mut sink);
    assert_eq!(changes(&sink), 2);
    assert!(!hw.alarm_on());
}

#[test]
fn slow_sensor_waits_one_interval_after_boot() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);

    let mut now = 0;
    while now < 2000 {
        service.tick(now, &mut hw, &mut sink);
        now += 50;
    }
    assert_eq!(hw.slow_reads, 0);

    service.tick(2000, &mut hw, &mut sink);
    assert_eq!(hw.slow_reads, 1);
}

#[test]
fn slow_sensor_read_at_most_once_per_interval() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);

    // 10 s of 50 ms ticks.
    for i in 0..=200 {
        service.tick(i * 50, &mut hw, &mut sink);
    }
    assert_eq!(hw.slow_reads, 5);
    assert_eq!(service.tick_count(), 201);
}

#[test]
fn climate_is_unknown_until_first_success() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);
    hw.push_climate_error(SensorError::Checksum);

    service.tick(2000, &mut hw, &mut sink);

    let snap = service.state().snapshot();
    assert_eq!(snap.reading.temperature_c, None);
    assert_eq!(snap.reading.humidity_pct, None);
    assert_eq!(service.consecutive_climate_failures(), 1);
    assert!(sink
        .events
        .contains(&AppEvent::ClimateReadFailed(SensorError::Checksum)));
}

#[test]
fn failed_read_keeps_last_good_climate() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);
    hw.push_climate(22.5, 55.0);
    hw.push_climate_error(SensorError::Timeout);

    service.tick(2000, &mut hw, &mut sink);
    service.tick(4000, &mut hw, &mut sink);

    let snap = service.state().snapshot();
    assert_eq!(snap.reading.temperature_c, Some(22.5));
    assert_eq!(snap.reading.humidity_pct, Some(55.0));
    assert_eq!(hw.slow_reads, 2);
    assert_eq!(service.consecutive_climate_failures(), 1);
}

#[test]
fn success_resets_failure_streak() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);
    hw.push_climate_error(SensorError::Timeout);
    hw.push_climate_error(SensorError::Timeout);
    hw.push_climate(19.0, 40.0);

    service.tick(2000, &mut hw, &mut sink);
    service.tick(4000, &mut hw, &mut sink);
    assert_eq!(service.consecutive_climate_failures(), 2);
    service.tick(6000, &mut hw, &mut sink);
    assert_eq!(service.consecutive_climate_failures(), 0);
}

#[test]
fn telemetry_every_ten_seconds() {
    let (mut service, mut sink) = make_service();
    let mut hw = MockHardware::new(0, 4095);

    for i in 0..=400 {
        service.tick(i * 50, &mut hw, &mut sink);
    }
    // 20 s of ticks: telemetry at 10 s and 20 s.
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);
}

#[test]
fn network_info_reaches_snapshot() {
    use envstation::app::state::NetworkInfo;
    use std::net::Ipv4Addr;

    let (service, _sink) = make_service();
    service.set_network(NetworkInfo {
        local_ip: Some(Ipv4Addr::new(10, 0, 0, 7)),
        rssi_dbm: Some(-58),
    });
    let net = service.state().snapshot().network;
    assert_eq!(net.display_ip(), Ipv4Addr::new(10, 0, 0, 7));
    assert_eq!(net.display_rssi(), -58);
}
