//! Application core: domain logic behind port traits.
//!
//! This module holds the charge-protection rules: sensor reading policy,
//! mode evaluation, rendering and the runtime that the scheduler drives.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod presentation;
pub mod runtime;
pub mod service;
pub mod state;
