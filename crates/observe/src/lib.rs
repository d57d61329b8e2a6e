//! This crate is intended to contain code that is required to provide or
//! improve the observability of the service. That includes initialization
//! logic for metrics and logging as well as logging helper functions.
pub mod config;
pub mod metrics;
pub mod panic_hook;
pub mod tracing;
pub mod tracing_axum;

pub use config::Config;
