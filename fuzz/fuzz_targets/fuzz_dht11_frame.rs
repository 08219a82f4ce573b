//! Fuzz target: `decode_frame`
//!
//! Any 5 bytes off the wire must either be rejected or decode to a
//! reading inside the DHT11's physical range.
//!
//! cargo fuzz run fuzz_dht11_frame

#![no_main]

use envstation::sensors::dht11::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 5]| {
    if let Ok(r) = decode_frame(&data) {
        assert!((0.0..=100.0).contains(&r.humidity_pct));
        assert!((-40.0..=80.0).contains(&r.temperature_c));
    }
});
