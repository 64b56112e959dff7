//! # Module Status
//!
//! Firmware version and flag byte reported by the MULTI module in status
//! frames, plus the status line rendered for display consumers.

/// Status flag bit: an input signal is detected on the module's RC input
pub const STATUS_FLAG_INPUT_DETECTED: u8 = 0x01;
/// Status flag bit: the module runs in serial mode
pub const STATUS_FLAG_SERIAL_MODE: u8 = 0x02;
/// Status flag bit: the configured protocol is valid on this module
pub const STATUS_FLAG_PROTOCOL_VALID: u8 = 0x04;
/// Status flag bit: the module is binding
pub const STATUS_FLAG_BINDING: u8 = 0x08;

const STR_NO_TELEMETRY: &str = "No telemetry";
const STR_PROTOCOL_INVALID: &str = "Protocol invalid";
const STR_NO_SERIAL_MODE: &str = "No serial mode";
const STR_NO_INPUT: &str = "No input";
const STR_BINDING: &str = "Binding";

/// Status snapshot reported by the MULTI module
///
/// Replaced wholesale whenever a status frame is processed, so readers always
/// see a consistent snapshot. Zero-initialized at start via [`Default`]; an
/// all-zero version means no telemetry has been received yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleStatus {
    /// Flag byte; bit semantics are owned by the module firmware, this crate
    /// only names the predicate bits it reads
    pub flags: u8,
    pub major: u8,
    pub minor: u8,
    pub patchlevel: u16,
}

impl ModuleStatus {
    /// Build a status snapshot from a status frame payload
    ///
    /// # Arguments
    ///
    /// * `payload` - Status frame payload; the first five bytes are flags,
    ///   major, minor, and the big-endian patchlevel
    ///
    /// # Returns
    ///
    /// * `Option<ModuleStatus>` - The snapshot, or `None` when the payload is
    ///   shorter than five bytes
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.len() < 5 {
            return None;
        }

        Some(Self {
            flags: payload[0],
            major: payload[1],
            minor: payload[2],
            patchlevel: u16::from_be_bytes([payload[3], payload[4]]),
        })
    }

    /// Whether the configured protocol is valid on this module
    pub fn protocol_valid(&self) -> bool {
        self.flags & STATUS_FLAG_PROTOCOL_VALID != 0
    }

    /// Whether the module runs in serial mode
    pub fn serial_mode(&self) -> bool {
        self.flags & STATUS_FLAG_SERIAL_MODE != 0
    }

    /// Whether an input signal is detected
    pub fn input_detected(&self) -> bool {
        self.flags & STATUS_FLAG_INPUT_DETECTED != 0
    }

    /// Whether the module is binding
    pub fn is_binding(&self) -> bool {
        self.flags & STATUS_FLAG_BINDING != 0
    }

    /// Render the human-readable status line shown on the radio display
    ///
    /// Exactly one branch applies, evaluated in priority order: no telemetry
    /// yet, protocol invalid, no serial mode, no input, and finally the
    /// firmware version with a trailing binding marker while binding.
    pub fn render(&self) -> String {
        if self.major == 0 && self.minor == 0 && self.patchlevel == 0 {
            return STR_NO_TELEMETRY.to_string();
        }

        if !self.protocol_valid() {
            return STR_PROTOCOL_INVALID.to_string();
        } else if !self.serial_mode() {
            return STR_NO_SERIAL_MODE.to_string();
        } else if !self.input_detected() {
            return STR_NO_INPUT.to_string();
        }

        let mut text = format!("V{}.{}.{} ", self.major, self.minor, self.patchlevel);
        if self.is_binding() {
            text.push_str(STR_BINDING);
        }
        text
    }
}
