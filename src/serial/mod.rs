//! # Serial Communication Module
//!
//! Handles the serial link to the external MULTI module.
//!
//! This module handles:
//! - Opening the module's serial port with 8N1 settings
//! - Async reads of raw telemetry bytes
//!
//! The link is receive-only on this side: telemetry is best-effort, with no
//! acknowledgement, retransmission, or flow control.

use crate::config::SerialConfig;
use crate::error::{MultiTelemetryError, Result};
use std::time::Duration;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// Serial port handler for the external module link
pub struct ModuleSerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyUSB0)
    device_path: String,
}

impl std::fmt::Debug for ModuleSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl ModuleSerial {
    /// Open the configured module serial port
    ///
    /// # Errors
    ///
    /// Returns error if the configured device cannot be opened
    pub fn open(config: &SerialConfig) -> Result<Self> {
        Self::open_with_paths(&[config.port.as_str()], config.baud_rate, config.timeout_ms)
    }

    /// Open the first of `paths` that accepts the module link settings
    ///
    /// # Arguments
    ///
    /// * `paths` - Device paths to try (e.g., &["/dev/ttyUSB0"])
    /// * `baud_rate` - Line rate of the module link
    /// * `timeout_ms` - Serial read timeout in milliseconds
    pub fn open_with_paths(paths: &[&str], baud_rate: u32, timeout_ms: u64) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate, timeout_ms) {
                Ok(port) => {
                    info!("Successfully opened module serial port at {}", path);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(MultiTelemetryError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port with the module link settings
    fn open_port(path: &str, baud_rate: u32, timeout_ms: u64) -> Result<tokio_serial::SerialStream> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .timeout(Duration::from_millis(timeout_ms))
            .open_native_async()
            .map_err(|e| MultiTelemetryError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }

    /// Read received telemetry bytes into `buf`
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - Number of bytes read (possibly zero)
    pub async fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        use tokio::io::AsyncReadExt;

        let n = self
            .port
            .read(buf)
            .await
            .map_err(|e| MultiTelemetryError::Serial(format!("Failed to read from serial port: {}", e)))?;

        Ok(n)
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}
