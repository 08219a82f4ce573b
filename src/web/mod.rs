//! HTTP surface: routing plus the HTML and JSON responders.
//!
//! Everything here is transport-agnostic.  The ESP-IDF server adapter
//! (`adapters::http_server`) forwards each request URI to [`respond`]
//! and writes the returned [`HttpResponse`] back verbatim, so the whole
//! surface is exercised on the host without a network stack.
//!
//! | Path      | Status | Content type       |
//! |-----------|--------|--------------------|
//! | `/`       | 200    | `text/html`        |
//! | `/api`    | 200    | `application/json` |
//! | otherwise | 404    | `text/plain`       |

pub mod api;
pub mod dashboard;

use log::error;

use crate::app::state::Snapshot;
use crate::config::Thresholds;

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Body sent for every unknown path.
pub const NOT_FOUND_BODY: &str = "Not found";

/// The three things a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Api,
    NotFound,
}

impl Route {
    /// Match a request URI.  Query string and fragment are ignored.
    pub fn from_uri(uri: &str) -> Self {
        let path = uri.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/" => Self::Dashboard,
            "/api" => Self::Api,
            _ => Self::NotFound,
        }
    }
}

/// A fully rendered response ready to be written to the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: CONTENT_TYPE_TEXT,
            body: NOT_FOUND_BODY.into(),
        }
    }

    /// Bytes to put on the wire; a HEAD request gets the same status and
    /// headers but no body.
    pub fn body_for(&self, head_only: bool) -> &[u8] {
        if head_only { &[] } else { self.body.as_bytes() }
    }

    /// Reason phrase for the status line.
    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

/// Render the response for `uri` from one cache snapshot.
pub fn respond(uri: &str, snapshot: &Snapshot, thresholds: &Thresholds) -> HttpResponse {
    match Route::from_uri(uri) {
        Route::Dashboard => HttpResponse::ok(
            CONTENT_TYPE_HTML,
            dashboard::render_dashboard(snapshot, thresholds),
        ),
        Route::Api => match api::render_api(snapshot) {
            Ok(body) => HttpResponse::ok(CONTENT_TYPE_JSON, body),
            Err(e) => {
                error!("API serialisation failed: {}", e);
                HttpResponse {
                    status: 500,
                    content_type: CONTENT_TYPE_TEXT,
                    body: "Internal error".into(),
                }
            }
        },
        Route::NotFound => HttpResponse::not_found(),
    }
}
