//! Control rules.

pub mod mode;
