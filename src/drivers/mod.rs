//! Peripheral drivers: binary outputs, the character LCD and the task
//! watchdog.

pub mod lcd;
pub mod switch;
pub mod watchdog;
