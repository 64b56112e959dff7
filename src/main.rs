//! # Multi Telemetry
//!
//! Reads the external MULTI module's telemetry stream from a serial port,
//! demultiplexes it byte by byte, and logs forwarded payloads together with
//! the module status line.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

mod config;
mod error;
mod multi;
mod serial;

use config::Config;
use multi::demux::TelemetryDemux;
use multi::sink::TracingSink;
use serial::ModuleSerial;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Serial read chunk size; bytes are still demultiplexed one at a time
const READ_CHUNK_SIZE: usize = 64;

/// Seconds between module status log lines
const STATUS_LOG_INTERVAL_SECS: u64 = 1;

/// Main entry point for Multi Telemetry
///
/// Initializes logging, loads the configuration, opens the module serial
/// port, then runs the receive loop: every received byte goes through the
/// demultiplexer, forwarded payloads are logged by a [`TracingSink`], and the
/// rendered module status line is logged once per second. Ctrl+C exits
/// cleanly.
///
/// # Errors
///
/// Returns error if:
/// - The configuration file cannot be loaded or is invalid
/// - The module serial port cannot be opened
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Multi Telemetry v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;
    info!("Loaded configuration from {}", config_path);
    info!(
        "Module slot configured for {:?} (sub-type {:?})",
        config.module.rf_protocol, config.module.sub_type
    );

    let mut serial = ModuleSerial::open(&config.serial)?;
    info!("Module serial port opened at: {}", serial.device_path());

    let mut demux = TelemetryDemux::new();
    let mut sink = TracingSink;
    let mut read_buf = [0u8; READ_CHUNK_SIZE];
    let mut status_interval = interval(Duration::from_secs(STATUS_LOG_INTERVAL_SECS));
    let mut byte_count: u64 = 0;

    info!("Listening for MULTI telemetry (press Ctrl+C to exit)");

    // Main receive loop
    loop {
        tokio::select! {
            // Drain received telemetry bytes through the demultiplexer
            read = serial.read_bytes(&mut read_buf) => {
                match read {
                    Ok(0) => continue,
                    Ok(n) => {
                        for &byte in &read_buf[..n] {
                            demux.process_byte(byte, &config.module, &mut sink);
                        }
                        byte_count += n as u64;
                    }
                    Err(e) => {
                        debug!("Serial read failed: {}", e);
                        continue;
                    }
                }
            }

            // Periodic status line for display consumers
            _ = status_interval.tick() => {
                info!("Module status: {}", demux.status().render());
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total telemetry bytes processed: {}", byte_count);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_read_chunk_size_fits_one_frame() {
        // A chunk never needs to hold a whole frame, but keeping it below the
        // receive buffer size keeps per-chunk latency bounded
        assert!(READ_CHUNK_SIZE > 0);
        assert!(READ_CHUNK_SIZE <= multi::protocol::MULTI_FRAME_SIZE_MAX);
    }

    #[test]
    fn test_status_interval_is_positive() {
        assert!(STATUS_LOG_INTERVAL_SECS >= 1);
    }
}
