//! Fuzz target: `web::respond`
//!
//! Arbitrary request URIs must never panic and must always produce one
//! of the three known responses.
//!
//! cargo fuzz run fuzz_http_route

#![no_main]

use envstation::app::state::Snapshot;
use envstation::config::Thresholds;
use envstation::web;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|uri: &str| {
    let resp = web::respond(uri, &Snapshot::default(), &Thresholds::default());
    match resp.status {
        200 => assert!(resp.content_type != web::CONTENT_TYPE_TEXT),
        404 => assert_eq!(resp.body, web::NOT_FOUND_BODY),
        other => panic!("unexpected status {other}"),
    }
});
