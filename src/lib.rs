// ABOUTME: Library root for azrollout - exposes public modules for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod health;
pub mod platform;
pub mod telemetry;
pub mod types;
