//! Fuzz target: `http::respond`
//!
//! Feeds arbitrary request URIs.  The router must never panic, must always
//! pick a status it has a reason phrase for, and must only build the status
//! body for a 200.
//!
//! cargo fuzz run fuzz_http_request

#![no_main]

use chargeguard::app::presentation::StatusReport;
use chargeguard::net::http;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|uri: &str| {
    let mut asked = false;
    let reply = http::respond(uri, || {
        asked = true;
        StatusReport {
            temperature_c: -999.0,
            humidity_percent: -999.0,
            charging_mode: "Unknown",
            fan_on: false,
        }
    });

    assert!(matches!(reply.status, 200 | 302 | 404));
    assert_eq!(asked, reply.status == 200);
    assert_ne!(reply.reason(), "Internal Server Error");
    assert_eq!(reply.headers()[0], ("Content-Type", reply.content_type));
    assert_eq!(reply.location.is_some(), reply.status == 302);
});
