//! Utility functions

/// Tracing setup and namespaced logger
pub mod logger;

pub use logger::{init_logging, Logger};
