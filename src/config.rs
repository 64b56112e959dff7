//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! The `[module]` table mirrors what the radio firmware knows statically about
//! the external module slot: which RF protocol is configured and, for FrSky,
//! which sub-type. The demultiplexer polls this when it has to guess a
//! fallback protocol (see [`crate::multi::protocol::FallbackProtocol`]).

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub serial: SerialConfig,
    pub module: ModuleConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Static configuration of the external module slot
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ModuleConfig {
    #[serde(default = "default_rf_protocol")]
    pub rf_protocol: RfProtocol,

    /// FrSky sub-type; only consulted when `rf_protocol` is `frsky`.
    #[serde(default = "default_sub_type")]
    pub sub_type: FrskySubType,
}

/// RF protocol configured for the external module slot
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RfProtocol {
    Frsky,
    Dsm2,
    Afhds2a,
    Flysky,
    Hubsan,
    Bayang,
}

/// FrSky sub-type of the configured protocol
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FrskySubType {
    #[serde(rename = "d16")]
    D16,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d16-8ch")]
    D16Ch8,
    #[serde(rename = "v8")]
    V8,
}

impl FrskySubType {
    /// Whether this is one of the two D16 variants (full and 8-channel).
    pub fn is_d16(self) -> bool {
        matches!(self, FrskySubType::D16 | FrskySubType::D16Ch8)
    }
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyUSB0".to_string() }
fn default_baud_rate() -> u32 { 115200 }
fn default_timeout_ms() -> u64 { 100 }

fn default_rf_protocol() -> RfProtocol { RfProtocol::Frsky }
fn default_sub_type() -> FrskySubType { FrskySubType::D16 }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(crate::error::MultiTelemetryError::Config(
                toml::de::Error::custom("serial port cannot be empty")
            ));
        }

        if self.serial.timeout_ms == 0 || self.serial.timeout_ms > 10000 {
            return Err(crate::error::MultiTelemetryError::Config(
                toml::de::Error::custom("timeout_ms must be between 1 and 10000")
            ));
        }

        // Rates the MULTI module link is run at
        if ![57600, 100_000, 115_200, 420_000].contains(&self.serial.baud_rate) {
            return Err(crate::error::MultiTelemetryError::Config(
                toml::de::Error::custom("baud_rate must be one of: 57600, 100000, 115200, 420000")
            ));
        }

        Ok(())
    }
}
