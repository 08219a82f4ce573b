//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`], the hexagonal boundary for network
//! connectivity.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Reconnection policy
//!
//! The boot-time join waits at most `connect_timeout` so the poll loop
//! can start offline.  A join that misses that window, or a link that
//! drops later, is retried from [`ConnectivityPort::poll`] with an
//! exponential backoff (2 s → 4 s → 8 s … capped at 60 s).  Retries are
//! non-blocking; `poll` only notices when the station is back up.

use core::fmt;
use core::time::Duration;
use std::net::Ipv4Addr;
use std::time::Instant;

use log::{error, info, warn};

use crate::app::state::NetworkInfo;

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    Timeout,
    AlreadyConnected,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::Timeout => write!(f, "no IP address before timeout"),
            Self::AlreadyConnected => write!(f, "already connected to AP"),
        }
    }
}

impl std::error::Error for ConnectivityError {}

pub trait ConnectivityPort {
    fn connect(&mut self) -> Result<(), ConnectivityError>;
    fn disconnect(&mut self);
    fn is_connected(&self) -> bool;
    fn poll(&mut self);
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
    fn rssi(&self) -> Option<i8>;
    fn local_ip(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

const INITIAL_BACKOFF_SECS: u32 = 2;
const MAX_BACKOFF_SECS: u32 = 60;

fn next_backoff(secs: u32) -> u32 {
    secs.saturating_mul(2).min(MAX_BACKOFF_SECS)
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(ConnectivityError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
type Driver = esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>;

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    connect_timeout: Duration,
    last_rssi: Option<i8>,
    local_ip: Option<Ipv4Addr>,
    backoff_secs: u32,
    next_retry: Option<Instant>,
    #[cfg(target_os = "espidf")]
    driver: Driver,
    /// Simulation: whether the fake AP is reachable.
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
    /// Simulation: an association request is outstanding.
    #[cfg(not(target_os = "espidf"))]
    sim_join_requested: bool,
}

impl WifiAdapter {
    /// Wrap an ESP-IDF WiFi driver.  Nothing is started until
    /// [`ConnectivityPort::connect`].
    #[cfg(target_os = "espidf")]
    pub fn new(driver: Driver, connect_timeout: Duration) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connect_timeout,
            last_rssi: None,
            local_ip: None,
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_retry: None,
            driver,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connect_timeout,
            last_rssi: None,
            local_ip: None,
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_retry: None,
            sim_link_up: true,
            sim_join_requested: false,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Address and signal strength as published to the dashboard.
    pub fn network_info(&self) -> NetworkInfo {
        NetworkInfo {
            local_ip: self.local_ip,
            rssi_dbm: self.last_rssi,
        }
    }

    /// Simulation: make the fake AP reachable or not.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_link(&mut self, up: bool) {
        self.sim_link_up = up;
    }

    fn mark_connected(&mut self) {
        self.state = WifiState::Connected;
        self.backoff_secs = INITIAL_BACKOFF_SECS;
        self.next_retry = None;
        self.last_rssi = self.platform_rssi();
        self.local_ip = self.platform_local_ip();
        info!(
            "WiFi: connected, IP={} RSSI={:?}",
            self.network_info().display_ip(),
            self.last_rssi
        );
    }

    fn enter_reconnecting(&mut self) {
        self.state = WifiState::Reconnecting { attempt: 0 };
        self.backoff_secs = INITIAL_BACKOFF_SECS;
        self.next_retry =
            Some(Instant::now() + Duration::from_secs(u64::from(self.backoff_secs)));
        self.last_rssi = None;
        self.local_ip = None;
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let client = ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        };

        let fail = |e: esp_idf_svc::sys::EspError| {
            warn!("WiFi(espidf): {}", e);
            ConnectivityError::ConnectionFailed
        };
        self.driver
            .set_configuration(&Configuration::Client(client))
            .map_err(fail)?;
        self.driver.start().map_err(fail)?;
        self.driver.connect().map_err(fail)?;

        // DHCP: bounded wait for the netif.  On timeout the association is
        // left in place so a late lease is still picked up by poll().
        let deadline = Instant::now() + self.connect_timeout;
        while !self.driver.is_up().map_err(fail)? {
            if Instant::now() >= deadline {
                return Err(ConnectivityError::Timeout);
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        self.sim_join_requested = true;
        if !self.sim_link_up {
            warn!(
                "WiFi(sim): AP '{}' unreachable, giving up after {:?}",
                self.ssid, self.connect_timeout
            );
            return Err(ConnectivityError::Timeout);
        }
        info!("WiFi(sim): connected to '{}'", self.ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        let _ = self.driver.disconnect();
        let _ = self.driver.stop();
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        self.sim_join_requested = false;
        info!("WiFi(sim): disconnected");
    }

    /// Issue an association request without waiting for it.
    #[cfg(target_os = "espidf")]
    fn platform_begin_reconnect(&mut self) -> Result<(), ConnectivityError> {
        self.driver.wifi_mut().connect().map_err(|e| {
            warn!("WiFi(espidf): reconnect request failed: {}", e);
            ConnectivityError::ConnectionFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin_reconnect(&mut self) -> Result<(), ConnectivityError> {
        self.sim_join_requested = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.driver.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.sim_link_up && self.sim_join_requested
    }

    /// Associated and holding an address.
    #[cfg(target_os = "espidf")]
    fn platform_link_up(&self) -> bool {
        self.platform_is_connected() && self.driver.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_link_up(&self) -> bool {
        self.platform_is_connected()
    }

    #[cfg(target_os = "espidf")]
    fn platform_rssi(&self) -> Option<i8> {
        let mut ap_info = esp_idf_svc::sys::wifi_ap_record_t::default();
        // SAFETY: ap_info is a valid out-parameter for the duration of the call.
        let ret = unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap_info) };
        (ret == esp_idf_svc::sys::ESP_OK as i32).then_some(ap_info.rssi)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_rssi(&self) -> Option<i8> {
        self.platform_is_connected().then_some(-60)
    }

    #[cfg(target_os = "espidf")]
    fn platform_local_ip(&self) -> Option<Ipv4Addr> {
        self.driver
            .wifi()
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
            .filter(|ip| !ip.is_unspecified())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_local_ip(&self) -> Option<Ipv4Addr> {
        self.platform_is_connected()
            .then_some(Ipv4Addr::new(192, 168, 1, 42))
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.state == WifiState::Connected {
            return Err(ConnectivityError::AlreadyConnected);
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        self.state = WifiState::Connecting;

        match self.platform_connect() {
            Ok(()) => {
                self.mark_connected();
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {}, retrying in background", e);
                self.enter_reconnecting();
                Err(e)
            }
        }
    }

    fn disconnect(&mut self) {
        self.platform_disconnect();
        self.state = WifiState::Disconnected;
        self.last_rssi = None;
        self.local_ip = None;
        self.next_retry = None;
        info!("WiFi: disconnected");
    }

    fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }

    fn poll(&mut self) {
        match self.state {
            WifiState::Connected => {
                if self.platform_is_connected() {
                    self.last_rssi = self.platform_rssi();
                } else {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.enter_reconnecting();
                }
            }
            WifiState::Reconnecting { attempt } => {
                if self.platform_link_up() {
                    self.mark_connected();
                    return;
                }
                let now = Instant::now();
                if self.next_retry.is_some_and(|due| now < due) {
                    return;
                }
                info!("WiFi: reconnect attempt {} (backoff {}s)", attempt + 1, self.backoff_secs);
                // A failed request is retried on the next backoff step.
                let _ = self.platform_begin_reconnect();
                self.backoff_secs = next_backoff(self.backoff_secs);
                self.state = WifiState::Reconnecting { attempt: attempt + 1 };
                self.next_retry = Some(now + Duration::from_secs(u64::from(self.backoff_secs)));
            }
            WifiState::Disconnected | WifiState::Connecting => {}
        }
    }

    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password.push_str(password).map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    fn rssi(&self) -> Option<i8> {
        self.last_rssi
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.local_ip
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
