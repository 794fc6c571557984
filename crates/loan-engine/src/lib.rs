pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;
