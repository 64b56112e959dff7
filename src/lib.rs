//! # Multi Telemetry Library
//!
//! Demultiplex MULTI-module telemetry from an RC transmitter's external RF
//! module.
//!
//! A single serial channel carries interleaved telemetry from either the
//! MULTI multiplexing protocol or one of four raw fallback protocols used
//! when the module does not speak it. This library consumes the stream one
//! byte at a time, decides which protocol is in effect, reassembles
//! length-delimited MULTI frames, and routes completed frames (or raw bytes,
//! in fallback mode) to the matching sub-protocol decoder.

pub mod config;
pub mod error;
pub mod multi;
pub mod serial;
