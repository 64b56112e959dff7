//! # MULTI Protocol Constants and Types
//!
//! Core protocol definitions for the MULTI multiplexing telemetry link.
//!
//! Wire format of a MULTI frame: `['M']['P'][type][length][payload]`, where
//! `length` counts the payload only. Fallback protocols use the single-byte
//! preambles `0x55` / `0x7E`; their framing is entirely owned by the
//! respective external decoder.

use crate::config::{ModuleConfig, RfProtocol};

/// MULTI frame sync byte (first header byte)
pub const MULTI_SYNC_BYTE: u8 = b'M';

/// Second MULTI header byte, expected right after the sync byte
pub const MULTI_HEADER_BYTE: u8 = b'P';

/// Raw-fallback preamble bytes. A byte stream opening with either of these
/// instead of the MULTI sync byte is handed to a fallback decoder.
pub const FALLBACK_SYNC_A: u8 = 0x55;
pub const FALLBACK_SYNC_B: u8 = 0x7E;

/// Maximum buffered MULTI frame size (4-byte header + payload)
pub const MULTI_FRAME_SIZE_MAX: usize = 128;

/// MULTI frame types carried in the third header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiPacketType {
    Status,
    SportTelemetry,
    HubTelemetry,
    SpektrumTelemetry,
    DsmBind,
    FlySkyIBusTelemetry,
}

impl MultiPacketType {
    /// Decode the frame type byte
    ///
    /// # Returns
    ///
    /// * `Option<MultiPacketType>` - The packet type, or `None` for unknown
    ///   type bytes (which the dispatcher ignores silently)
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(MultiPacketType::Status),
            2 => Some(MultiPacketType::SportTelemetry),
            3 => Some(MultiPacketType::HubTelemetry),
            4 => Some(MultiPacketType::SpektrumTelemetry),
            5 => Some(MultiPacketType::DsmBind),
            6 => Some(MultiPacketType::FlySkyIBusTelemetry),
            _ => None,
        }
    }

    /// Minimum payload length a frame of this type must declare.
    ///
    /// Shorter frames are dropped without forwarding (tolerate-malformed
    /// policy, no error raised).
    pub fn min_payload_len(self) -> usize {
        match self {
            MultiPacketType::Status => 5,
            MultiPacketType::SportTelemetry => 4,
            MultiPacketType::HubTelemetry => 4,
            MultiPacketType::SpektrumTelemetry => 17,
            MultiPacketType::DsmBind => 10,
            MultiPacketType::FlySkyIBusTelemetry => 28,
        }
    }
}

/// Raw telemetry protocol decoded byte-by-byte when no MULTI sync is observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackProtocol {
    /// FrSky hub telemetry
    Hub,
    /// FrSky sport telemetry
    Sport,
    /// Spektrum / DSM telemetry
    Spektrum,
    /// FlySky AFHDS2A telemetry
    FlySky,
}

impl FallbackProtocol {
    /// Guess which fallback protocol is in effect for the module slot.
    ///
    /// Pure classification of the static module configuration, consulted only
    /// when a fallback preamble arrives with an empty receive buffer. First
    /// match wins:
    ///
    /// 1. DSM family → Spektrum
    /// 2. AFHDS2A → FlySky
    /// 3. FrSky with a D16 sub-type → Sport
    /// 4. anything else → Hub
    pub fn for_config(config: &ModuleConfig) -> Self {
        if config.rf_protocol == RfProtocol::Dsm2 {
            FallbackProtocol::Spektrum
        } else if config.rf_protocol == RfProtocol::Afhds2a {
            FallbackProtocol::FlySky
        } else if config.rf_protocol == RfProtocol::Frsky && config.sub_type.is_d16() {
            FallbackProtocol::Sport
        } else {
            FallbackProtocol::Hub
        }
    }
}
