//! # MULTI Telemetry Module
//!
//! Implementation of the MULTI-module telemetry demultiplexer.
//!
//! This module handles:
//! - Per-byte frame synchronization and reassembly (bounded receive buffer)
//! - Fallback protocol selection when no MULTI sync is observed
//! - Dispatch of completed frames to the sub-protocol decoder boundary
//! - Module status tracking and status line rendering

pub mod demux;
pub mod dispatch;
pub mod protocol;
pub mod sink;
pub mod status;
