//! HTML responder for `GET /`.
//!
//! A self-contained page (inline CSS, no scripts) that reloads itself
//! every [`REFRESH_SECS`] seconds since there is no push channel.

use core::fmt::Write;

use crate::app::state::Snapshot;
use crate::config::Thresholds;

pub const REFRESH_SECS: u32 = 2;

const HEAD_OPEN: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
"#;

const HEAD: &str = r#"<title>Environment Monitoring</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial;margin:0;background:#0f172a;color:#e2e8f0}
.wrap{max-width:720px;margin:24px auto;padding:16px}
h1{font-size:1.5rem;margin:0 0 12px}
.card{background:#111827;border-radius:12px;padding:16px;margin:12px 0;box-shadow:0 6px 20px rgba(0,0,0,.25)}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:12px}
.k{font-size:.9rem;color:#93c5fd}.v{font-size:1.2rem}
.ok{color:#10b981}.bad{color:#ef4444}.muted{color:#94a3b8}
a{color:#93c5fd;text-decoration:none}
</style></head><body><div class="wrap">
<h1>Environment Monitoring</h1>
"#;

const NOT_AVAILABLE: &str = "<span class='bad'>N/A</span>";

fn tile(out: &mut String, key: &str, class: &str, value: &str) {
    let _ = write!(
        out,
        "<div><div class='k'>{key}</div><div class='v{}{class}'>{value}</div></div>",
        if class.is_empty() { "" } else { " " },
    );
}

fn measured(value: Option<f32>, unit: &str) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v:.1} {unit}"))
}

/// `ON` is good news for the LED (it is doing its job) but bad news for
/// the buzzer, hence the per-tile colour choice.
fn on_off(on: bool, on_class: &'static str, off_class: &'static str) -> (&'static str, &'static str) {
    if on { (on_class, "ON") } else { (off_class, "OFF") }
}

/// Render the full dashboard document.
pub fn render_dashboard(snapshot: &Snapshot, thresholds: &Thresholds) -> String {
    let r = &snapshot.reading;
    let mut s = String::with_capacity(2048);
    s.push_str(HEAD_OPEN);
    let _ = writeln!(s, "<meta http-equiv=\"refresh\" content=\"{REFRESH_SECS}\">");
    s.push_str(HEAD);

    s.push_str("<div class=\"card grid\">");
    tile(&mut s, "Temperature", "", &measured(r.temperature_c, "\u{00b0}C"));
    tile(&mut s, "Humidity", "", &measured(r.humidity_pct, "%"));
    tile(&mut s, "MQ-135", "", &r.air_quality_raw.to_string());
    tile(&mut s, "LDR", "", &r.light_raw.to_string());
    s.push_str("</div>");

    s.push_str("<div class=\"card grid\">");
    let (class, label) = on_off(snapshot.actuators.dark_indicator, "ok", "bad");
    tile(&mut s, "LED (Dark)", class, label);
    let (class, label) = on_off(snapshot.actuators.alarm, "bad", "ok");
    tile(&mut s, "Buzzer (Air)", class, label);
    let wifi = format!(
        "{} | RSSI {} dBm",
        snapshot.network.display_ip(),
        snapshot.network.display_rssi()
    );
    tile(&mut s, "Wi-Fi", "", &wifi);
    s.push_str("</div>");

    let _ = write!(
        s,
        "<div class='card muted'>API: <a href='/api'>/api</a> | Refresh: {REFRESH_SECS}s | \
         LDR_TH={} MQ_TH={}</div></div></body></html>",
        thresholds.light, thresholds.air_quality
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ActuatorState, NetworkInfo, Reading};
    use std::net::Ipv4Addr;

    fn sample() -> Snapshot {
        Snapshot {
            reading: Reading {
                temperature_c: Some(22.54),
                humidity_pct: Some(55.0),
                air_quality_raw: 2000,
                light_raw: 1200,
            },
            actuators: ActuatorState {
                dark_indicator: true,
                alarm: false,
            },
            network: NetworkInfo {
                local_ip: Some(Ipv4Addr::new(10, 0, 0, 7)),
                rssi_dbm: Some(-67),
            },
        }
    }

    #[test]
    fn page_auto_refreshes() {
        let html = render_dashboard(&Snapshot::default(), &Thresholds::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="2">"#));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn refresh_tag_and_footer_share_interval() {
        let html = render_dashboard(&Snapshot::default(), &Thresholds::default());
        let tag = format!(r#"<meta http-equiv="refresh" content="{REFRESH_SECS}">"#);
        assert_eq!(html.matches(&tag).count(), 1);
        assert!(html.contains(&format!("Refresh: {REFRESH_SECS}s")));
    }

    #[test]
    fn missing_climate_shows_marker() {
        let html = render_dashboard(&Snapshot::default(), &Thresholds::default());
        assert_eq!(html.matches(NOT_AVAILABLE).count(), 2);
        assert!(html.contains("0.0.0.0 | RSSI 0 dBm"));
    }

    #[test]
    fn renders_every_field() {
        let html = render_dashboard(&sample(), &Thresholds::default());
        assert!(html.contains("22.5 \u{00b0}C"));
        assert!(html.contains("55.0 %"));
        assert!(html.contains(">2000<"));
        assert!(html.contains(">1200<"));
        assert!(html.contains("<div class='v ok'>ON</div>"), "LED on");
        assert!(html.contains("<div class='v ok'>OFF</div>"), "buzzer off");
        assert!(html.contains("10.0.0.7 | RSSI -67 dBm"));
        assert!(html.contains("LDR_TH=1500 MQ_TH=1800"));
        assert!(!html.contains(NOT_AVAILABLE));
    }
}
