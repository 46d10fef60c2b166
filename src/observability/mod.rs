//! Observability module
//!
//! This module provides:
//! - Structured logging with JSON format support
//! - An in-memory feed of detected cluster changes

pub mod logging;

pub use logging::{init_logging, ChangeEntry, ChangeLog, LogConfig, LogFormat};
