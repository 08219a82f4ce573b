//! ESP-IDF HTTP server adapter.
//!
//! Registers one wildcard handler per method and hands the request URI
//! to [`web::respond`](crate::web::respond).  Handlers run on the
//! `httpd` task and only ever read a [`Snapshot`](crate::app::state::Snapshot)
//! copied out of the shared cache.

use embedded_svc::http::Method;
use embedded_svc::io::Write;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use log::info;

use crate::app::state::SharedState;
use crate::config::Thresholds;
use crate::web;

/// Methods that get the same routing; the path alone decides the response.
const METHODS: [Method; 4] = [Method::Get, Method::Head, Method::Post, Method::Put];

/// Start the server on `port`.  The returned handle must be kept alive.
pub fn start(
    state: SharedState,
    thresholds: Thresholds,
    port: u16,
) -> anyhow::Result<EspHttpServer<'static>> {
    let conf = Configuration {
        http_port: port,
        uri_match_wildcard: true,
        stack_size: 10 * 1024,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&conf)?;

    for method in METHODS {
        let state = state.clone();
        let head_only = method == Method::Head;
        server.fn_handler::<anyhow::Error, _>("/*", method, move |req| {
            let snapshot = state.snapshot();
            let resp = web::respond(req.uri(), &snapshot, &thresholds);
            req.into_response(
                resp.status,
                Some(resp.reason()),
                &[("Content-Type", resp.content_type)],
            )?
            .write_all(resp.body_for(head_only))?;
            Ok(())
        })?;
    }

    info!("HTTP server listening on port {}", port);
    Ok(server)
}
