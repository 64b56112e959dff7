//! Trait abstraction for the external sub-protocol decoders to enable testing

use tracing::{debug, trace};

/// Boundary to the protocol-specific decoders that consume demultiplexed
/// telemetry.
///
/// Framed entry points receive a complete payload from a MULTI frame. The
/// `*_byte` entry points stream raw bytes while the matching fallback
/// protocol is active; framing is entirely the decoder's responsibility
/// there. Hub and sport fallbacks share `frsky_byte` because the FrSky
/// decoder distinguishes the two streams internally.
pub trait TelemetrySink {
    /// DSM bind packet from a completed MULTI frame
    fn bind_packet(&mut self, payload: &[u8]);

    /// Spektrum telemetry from a completed MULTI frame.
    ///
    /// The slice starts one byte before the payload, at the frame's length
    /// byte: the Spektrum decoder assumes a leading 0xAA indicator byte but
    /// never checks it, so the header byte stands in for it. Kept as a
    /// documented quirk of the module link.
    fn spektrum_packet(&mut self, packet: &[u8]);

    /// FlySky iBus telemetry from a completed MULTI frame
    fn flysky_packet(&mut self, payload: &[u8]);

    /// FrSky hub telemetry from a completed MULTI frame
    fn hub_packet(&mut self, payload: &[u8]);

    /// FrSky sport telemetry from a completed MULTI frame
    fn sport_packet(&mut self, payload: &[u8]);

    /// Raw byte for the shared FrSky hub/sport stream decoder
    fn frsky_byte(&mut self, byte: u8);

    /// Raw byte for the Spektrum stream decoder
    fn spektrum_byte(&mut self, byte: u8);

    /// Raw byte for the FlySky stream decoder
    fn flysky_byte(&mut self, byte: u8);
}

/// Sink that logs every forwarded payload via `tracing`
///
/// Used by the binary, where the real decoders live outside this crate.
/// Framed packets log at debug level; raw fallback bytes at trace level to
/// keep per-byte noise out of normal logs.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn bind_packet(&mut self, payload: &[u8]) {
        debug!("DSM bind packet ({} bytes): {:02X?}", payload.len(), payload);
    }

    fn spektrum_packet(&mut self, packet: &[u8]) {
        debug!("Spektrum telemetry ({} bytes): {:02X?}", packet.len(), packet);
    }

    fn flysky_packet(&mut self, payload: &[u8]) {
        debug!("FlySky iBus telemetry ({} bytes): {:02X?}", payload.len(), payload);
    }

    fn hub_packet(&mut self, payload: &[u8]) {
        debug!("FrSky hub telemetry ({} bytes): {:02X?}", payload.len(), payload);
    }

    fn sport_packet(&mut self, payload: &[u8]) {
        debug!("FrSky sport telemetry ({} bytes): {:02X?}", payload.len(), payload);
    }

    fn frsky_byte(&mut self, byte: u8) {
        trace!("FrSky fallback byte 0x{:02X}", byte);
    }

    fn spektrum_byte(&mut self, byte: u8) {
        trace!("Spektrum fallback byte 0x{:02X}", byte);
    }

    fn flysky_byte(&mut self, byte: u8) {
        trace!("FlySky fallback byte 0x{:02X}", byte);
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Mock sink recording every forwarded call for assertions
    #[derive(Debug, Default)]
    pub struct MockSink {
        pub bind_packets: Vec<Vec<u8>>,
        pub spektrum_packets: Vec<Vec<u8>>,
        pub flysky_packets: Vec<Vec<u8>>,
        pub hub_packets: Vec<Vec<u8>>,
        pub sport_packets: Vec<Vec<u8>>,
        pub frsky_bytes: Vec<u8>,
        pub spektrum_bytes: Vec<u8>,
        pub flysky_bytes: Vec<u8>,
    }

    impl MockSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Total framed packets forwarded across all entry points
        pub fn packet_count(&self) -> usize {
            self.bind_packets.len()
                + self.spektrum_packets.len()
                + self.flysky_packets.len()
                + self.hub_packets.len()
                + self.sport_packets.len()
        }

        /// Total raw bytes forwarded across all fallback streams
        pub fn raw_byte_count(&self) -> usize {
            self.frsky_bytes.len() + self.spektrum_bytes.len() + self.flysky_bytes.len()
        }

        /// True when nothing at all has been forwarded
        pub fn is_empty(&self) -> bool {
            self.packet_count() == 0 && self.raw_byte_count() == 0
        }
    }

    impl TelemetrySink for MockSink {
        fn bind_packet(&mut self, payload: &[u8]) {
            self.bind_packets.push(payload.to_vec());
        }

        fn spektrum_packet(&mut self, packet: &[u8]) {
            self.spektrum_packets.push(packet.to_vec());
        }

        fn flysky_packet(&mut self, payload: &[u8]) {
            self.flysky_packets.push(payload.to_vec());
        }

        fn hub_packet(&mut self, payload: &[u8]) {
            self.hub_packets.push(payload.to_vec());
        }

        fn sport_packet(&mut self, payload: &[u8]) {
            self.sport_packets.push(payload.to_vec());
        }

        fn frsky_byte(&mut self, byte: u8) {
            self.frsky_bytes.push(byte);
        }

        fn spektrum_byte(&mut self, byte: u8) {
            self.spektrum_bytes.push(byte);
        }

        fn flysky_byte(&mut self, byte: u8) {
            self.flysky_bytes.push(byte);
        }
    }
}
