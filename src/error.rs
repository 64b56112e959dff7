//! # Error Types
//!
//! Custom error types for Multi Telemetry using `thiserror`.
//!
//! Per-byte demultiplexing is deliberately infallible: framing problems are
//! diagnostics, not errors (see [`crate::multi::demux`]). The variants here
//! cover the ambient concerns (configuration, serial I/O).

use thiserror::Error;

/// Main error type for Multi Telemetry
#[derive(Debug, Error)]
pub enum MultiTelemetryError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// No usable serial device found
    #[error("No module serial port found (tried: {0})")]
    SerialPortNotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Multi Telemetry
pub type Result<T> = std::result::Result<T, MultiTelemetryError>;
