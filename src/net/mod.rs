//! Network-facing status endpoint: the route table and the snapshot the
//! server handlers read from.

pub mod board;
pub mod http;
