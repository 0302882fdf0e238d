//! Fuzz target: `dht22::decode_frame`
//!
//! Any 5 bytes either decode to a sample inside the sensor's range or are
//! rejected; nothing panics.
//!
//! cargo fuzz run fuzz_dht22_frame

#![no_main]

use chargeguard::sensors::dht22::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frame: [u8; 5]| {
    if let Ok(sample) = decode_frame(frame) {
        assert!((-40.0..=80.0).contains(&sample.temperature_c));
        assert!((0.0..=100.0).contains(&sample.humidity_percent));
    }
});
