//! Observability infrastructure
//!
//! Structured logging bootstrap for the host coordinator.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};
