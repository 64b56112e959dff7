//! # MULTI Frame Dispatch
//!
//! Routes completed MULTI frames to the matching external decoder, and raw
//! fallback bytes to the matching stream decoder.

use tracing::trace;

use super::protocol::{FallbackProtocol, MultiPacketType};
use super::sink::TelemetrySink;
use super::status::ModuleStatus;

/// Route a completed MULTI frame by its type byte
///
/// # Arguments
///
/// * `frame` - The full buffered frame: `['M']['P'][type][length][payload…]`,
///   at least four bytes, with exactly `length` payload bytes
/// * `status` - The module status singleton, replaced as a unit when the
///   frame is a status frame
/// * `sink` - Decoder boundary receiving all other recognized frame types
///
/// Frames with an unknown type byte, or a declared length below the type's
/// minimum, are dropped silently.
pub fn dispatch_frame(frame: &[u8], status: &mut ModuleStatus, sink: &mut dyn TelemetrySink) {
    debug_assert!(frame.len() >= 4);

    let packet_type = match MultiPacketType::from_byte(frame[2]) {
        Some(packet_type) => packet_type,
        None => {
            trace!("ignoring unknown packet type 0x{:02X}", frame[2]);
            return;
        }
    };

    let len = frame[3] as usize;
    if len < packet_type.min_payload_len() {
        trace!("dropping short {:?} frame (length {})", packet_type, len);
        return;
    }

    let payload = &frame[4..];
    match packet_type {
        MultiPacketType::Status => {
            if let Some(new_status) = ModuleStatus::from_payload(payload) {
                *status = new_status;
            }
        }
        MultiPacketType::DsmBind => sink.bind_packet(payload),
        // Starts one byte early, at the length byte, standing in for the 0xAA
        // indicator the Spektrum decoder assumes but never checks
        MultiPacketType::SpektrumTelemetry => sink.spektrum_packet(&frame[3..]),
        MultiPacketType::FlySkyIBusTelemetry => sink.flysky_packet(payload),
        MultiPacketType::HubTelemetry => sink.hub_packet(payload),
        MultiPacketType::SportTelemetry => sink.sport_packet(payload),
    }
}

/// Forward one raw byte to the decoder selected by the active fallback
/// protocol. No buffering, no length validation.
pub fn forward_fallback(kind: FallbackProtocol, byte: u8, sink: &mut dyn TelemetrySink) {
    match kind {
        // Hub and sport share one FrSky entry point; the decoder tells the
        // two streams apart
        FallbackProtocol::Hub | FallbackProtocol::Sport => sink.frsky_byte(byte),
        FallbackProtocol::Spektrum => sink.spektrum_byte(byte),
        FallbackProtocol::FlySky => sink.flysky_byte(byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi::protocol::{MULTI_HEADER_BYTE, MULTI_SYNC_BYTE};
    use crate::multi::sink::mocks::MockSink;

    /// Build a complete buffered frame for the given type byte and payload
    fn frame(type_byte: u8, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![MULTI_SYNC_BYTE, MULTI_HEADER_BYTE, type_byte, payload.len() as u8];
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn test_status_frame_replaces_status() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        let payload = [0x0F, 1, 3, 0x01, 0x2C];
        dispatch_frame(&frame(1, &payload), &mut status, &mut sink);

        assert_eq!(status.flags, 0x0F);
        assert_eq!(status.major, 1);
        assert_eq!(status.minor, 3);
        assert_eq!(status.patchlevel, 300);
        assert!(sink.is_empty(), "status frames go to the status slot, not the sink");
    }

    #[test]
    fn test_short_status_frame_dropped() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        dispatch_frame(&frame(1, &[0x0F, 1, 3, 0x01]), &mut status, &mut sink);

        assert_eq!(status, ModuleStatus::default());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_bind_packet_forwarded() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        let payload: Vec<u8> = (0u8..10).collect();
        dispatch_frame(&frame(5, &payload), &mut status, &mut sink);

        assert_eq!(sink.bind_packets, vec![payload]);
    }

    #[test]
    fn test_short_bind_packet_dropped() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        dispatch_frame(&frame(5, &[0u8; 9]), &mut status, &mut sink);

        assert!(sink.is_empty());
    }

    #[test]
    fn test_spektrum_packet_includes_length_byte() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        let payload: Vec<u8> = (1u8..=17).collect();
        dispatch_frame(&frame(4, &payload), &mut status, &mut sink);

        assert_eq!(sink.spektrum_packets.len(), 1);
        let forwarded = &sink.spektrum_packets[0];
        assert_eq!(forwarded.len(), 18);
        assert_eq!(forwarded[0], 17, "first byte is the frame's length byte");
        assert_eq!(&forwarded[1..], payload.as_slice());
    }

    #[test]
    fn test_flysky_packet_forwarded_unmodified() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        let payload = [0xAB; 28];
        dispatch_frame(&frame(6, &payload), &mut status, &mut sink);

        assert_eq!(sink.flysky_packets, vec![payload.to_vec()]);
    }

    #[test]
    fn test_hub_and_sport_packets_forwarded() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        dispatch_frame(&frame(3, &[1, 2, 3, 4]), &mut status, &mut sink);
        dispatch_frame(&frame(2, &[5, 6, 7, 8]), &mut status, &mut sink);

        assert_eq!(sink.hub_packets, vec![vec![1, 2, 3, 4]]);
        assert_eq!(sink.sport_packets, vec![vec![5, 6, 7, 8]]);
    }

    #[test]
    fn test_unknown_type_ignored() {
        let mut status = ModuleStatus::default();
        let mut sink = MockSink::new();

        dispatch_frame(&frame(0x42, &[1, 2, 3, 4]), &mut status, &mut sink);
        dispatch_frame(&frame(0, &[1, 2, 3, 4]), &mut status, &mut sink);

        assert_eq!(status, ModuleStatus::default());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_forward_fallback_routing() {
        let mut sink = MockSink::new();

        forward_fallback(FallbackProtocol::Hub, 0x10, &mut sink);
        forward_fallback(FallbackProtocol::Sport, 0x20, &mut sink);
        forward_fallback(FallbackProtocol::Spektrum, 0x30, &mut sink);
        forward_fallback(FallbackProtocol::FlySky, 0x40, &mut sink);

        // Hub and sport share the FrSky raw entry point
        assert_eq!(sink.frsky_bytes, vec![0x10, 0x20]);
        assert_eq!(sink.spektrum_bytes, vec![0x30]);
        assert_eq!(sink.flysky_bytes, vec![0x40]);
    }
}
