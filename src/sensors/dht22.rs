//! DHT22 / AM2302 temperature + humidity sensor (single-wire, open drain).
//!
//! A transaction is a 1.1 ms start pulse from the host, an 80/80 µs
//! response from the sensor, then 40 data bits.  Each bit is a 50 µs low
//! followed by a high whose width encodes the value (≈27 µs = 0, ≈70 µs = 1).
//! The whole exchange takes ~5 ms, so a read is bounded.
//!
//! Frame layout: `[RH hi, RH lo, T hi, T lo, checksum]`, both values in
//! tenths, temperature sign in bit 7 of `T hi`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data pin through the raw GPIO API.
//! On host/test: serves a frame built from injectable simulation values.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::app::ports::SensorPort;
use crate::app::state::Sample;
use crate::error::SensorError;

/// Datasheet operating range.
const TEMP_RANGE_C: core::ops::RangeInclusive<f32> = -40.0..=80.0;
const HUMIDITY_RANGE: core::ops::RangeInclusive<f32> = 0.0..=100.0;

/// Validate and decode one 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<Sample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_raw = u16::from_be_bytes([frame[0], frame[1]]);
    let temp_raw = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let humidity_percent = f32::from(humidity_raw) / 10.0;
    let mut temperature_c = f32::from(temp_raw) / 10.0;
    if frame[2] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    if !TEMP_RANGE_C.contains(&temperature_c) || !HUMIDITY_RANGE.contains(&humidity_percent) {
        return Err(SensorError::OutOfRange);
    }

    Ok(Sample {
        temperature_c,
        humidity_percent,
    })
}

/// Inverse of [`decode_frame`], used by the host simulation.
#[cfg(not(target_os = "espidf"))]
fn encode_frame(temperature_c: f32, humidity_percent: f32) -> [u8; 5] {
    let rh = (humidity_percent * 10.0).round() as u16;
    let t = (temperature_c.abs() * 10.0).round() as u16;
    let [rh_hi, rh_lo] = rh.to_be_bytes();
    let [mut t_hi, t_lo] = t.to_be_bytes();
    if temperature_c < 0.0 {
        t_hi |= 0x80;
    }
    let sum = rh_hi
        .wrapping_add(rh_lo)
        .wrapping_add(t_hi)
        .wrapping_add(t_lo);
    [rh_hi, rh_lo, t_hi, t_lo, sum]
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000); // 25.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0x4220_0000); // 40.0
#[cfg(not(target_os = "espidf"))]
static SIM_FAIL: AtomicBool = AtomicBool::new(false);

/// Set the value the simulated sensor reports.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reading(temperature_c: f32, humidity_percent: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity_percent.to_bits(), Ordering::Relaxed);
}

/// Make the simulated sensor stop answering (`true`) or recover.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failure(fail: bool) {
    SIM_FAIL.store(fail, Ordering::Relaxed);
}

// ── Driver ────────────────────────────────────────────────────

pub struct Dht22Sensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
}

impl Dht22Sensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn read(&mut self) -> Result<Sample, SensorError> {
        decode_frame(self.read_frame()?)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        if SIM_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::Timeout);
        }
        let t = f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed));
        let h = f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed));
        Ok(encode_frame(t, h))
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        use esp_idf_svc::sys::*;

        let pin = self.gpio;
        let mut frame = [0u8; 5];

        // SAFETY: the data pin is owned by this driver and only touched from
        // the tick loop; these are plain register accesses.
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD);
            gpio_set_level(pin, 0);
            esp_rom_delay_us(1_100);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(30);
        }

        // Sensor response: low 80 µs, high 80 µs, then the first bit's low.
        wait_for_level(pin, false, 100)?;
        wait_for_level(pin, true, 100)?;
        wait_for_level(pin, false, 100)?;

        for bit in 0..40 {
            wait_for_level(pin, true, 80)?;
            let high_us = wait_for_level(pin, false, 100)?;
            if high_us > 40 {
                frame[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Ok(frame)
    }
}

/// Spin until `pin` reads `level`; returns the time waited in µs.
#[cfg(target_os = "espidf")]
fn wait_for_level(pin: i32, level: bool, timeout_us: i64) -> Result<i64, SensorError> {
    use esp_idf_svc::sys::{esp_timer_get_time, gpio_get_level};

    // SAFETY: esp_timer_get_time and gpio_get_level are read-only accesses.
    let start = unsafe { esp_timer_get_time() };
    loop {
        let now = unsafe { esp_timer_get_time() };
        if (unsafe { gpio_get_level(pin) } != 0) == level {
            return Ok(now - start);
        }
        if now - start > timeout_us {
            return Err(SensorError::Timeout);
        }
    }
}

impl SensorPort for Dht22Sensor {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        self.read()
    }
}
