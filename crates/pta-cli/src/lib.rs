//! Library components of the `price-trend` CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod session;
