//! Business-health scoring, action planning, and tool matching.
//!
//! The scoring pipeline under [`workflows::health`] is pure and deterministic;
//! configuration, telemetry, and HTTP concerns live alongside it for the service binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
