//! ChargeGuard firmware library.
//!
//! Thermal protection for a phone-charging rig: a DHT22 reading decides
//! between fast and slow charging and switches a cooling fan, the state is
//! shown on a 16×2 LCD and served as JSON over HTTP.
//!
//! Exposes every module for integration testing.  All ESP-IDF-specific code
//! is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod net;
pub mod pins;
pub mod scheduler;
pub mod sensors;
pub mod startup;
