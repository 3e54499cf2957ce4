//! Frame layouts and fixed templates for the Haier wire protocol
//!
//! # Frame Format
//!
//! Every frame shares the same envelope:
//! ```text
//! [0xFF][0xFF][length][body...][checksum][crc16 hi][crc16 lo]
//! ```
//!
//! - `length` (byte 2): places the trailer at `length + 2`
//! - `checksum`: 8-bit additive checksum over bytes 2 up to the trailer
//! - `crc16`: reflected 0xA001 CRC over the same range, high byte first
//! - byte 9 identifies the frame type (0x02 = status response)
//!
//! The status frame leaves field offsets 9..25 laid out identically to the
//! control frame, so one offset table serves both directions.

/// Value of both preamble bytes.
pub const PREAMBLE_BYTE: u8 = 0xFF;

/// Status response reported by the unit (47 bytes).
pub const STATUS_FRAME_LEN: usize = 47;

/// Fixed status poll request (15 bytes).
pub const POLL_FRAME_LEN: usize = 15;

/// Outgoing control command (25 bytes).
pub const CONTROL_FRAME_LEN: usize = 25;

/// Session handshake frame (13 bytes).
pub const INIT_FRAME_LEN: usize = 13;

/// Frame-type values found at [`offset::COMMAND`]
pub mod command {
    /// Status response to a poll
    pub const STATUS_RESPONSE: u8 = 0x02;
}

/// Field offsets shared by status and control frames
pub mod offset {
    pub const COMMAND: usize = 9;
    pub const SET_TEMPERATURE: usize = 12;
    pub const VERTICAL_SWING: usize = 13;
    pub const MODE: usize = 14;
    pub const STATUS_FLAGS: usize = 17;
    pub const HORIZONTAL_SWING: usize = 19;
    pub const CURRENT_TEMPERATURE: usize = 22;
}

/// Bit positions within the status-flags byte
pub mod status_flag {
    pub const POWER: u8 = 0;
    pub const PURIFY: u8 = 1;
    pub const QUIET: u8 = 3;
    pub const FAST: u8 = 4;
}

/// Status poll request. The trailer is pre-computed; the frame is transmitted
/// exactly as written here.
pub const POLL_FRAME: [u8; POLL_FRAME_LEN] = [
    0xFF, 0xFF, 0x0A, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x01, 0x99, 0xB3, 0xB4,
];

/// Template for outgoing control frames. The field bytes are placeholders that
/// the encoder overwrites from the last known device state; the trailer is
/// finalised per frame.
pub const CONTROL_TEMPLATE: [u8; CONTROL_FRAME_LEN] = [
    0xFF, 0xFF, 0x14, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x60, 0x01, 0x09, 0x08, 0x25,
    0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// First handshake frame. Its declared length leaves no room for a CRC-16,
/// so it carries only the additive checksum and goes out verbatim.
pub const INIT_FRAME_1: [u8; INIT_FRAME_LEN] = [
    0xFF, 0xFF, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x61, 0x00, 0x07, 0x72,
];

/// Second handshake frame, also transmitted verbatim.
pub const INIT_FRAME_2: [u8; INIT_FRAME_LEN] = [
    0xFF, 0xFF, 0x08, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x70, 0xB8, 0x86, 0x41,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::checksum::{checksum8, checksum_offset};

    #[test]
    fn test_poll_frame_shape() {
        assert_eq!(POLL_FRAME.len(), POLL_FRAME_LEN);
        assert_eq!(&POLL_FRAME[..2], &[PREAMBLE_BYTE, PREAMBLE_BYTE]);
        assert_eq!(checksum_offset(&POLL_FRAME), Some(12));
    }

    #[test]
    fn test_templates_carry_valid_checksums() {
        // Poll and both init frames ship with their additive checksum baked in
        assert_eq!(checksum8(&POLL_FRAME, 12), Some(POLL_FRAME[12]));
        assert_eq!(checksum8(&INIT_FRAME_1, 12), Some(INIT_FRAME_1[12]));
        assert_eq!(checksum8(&INIT_FRAME_2, 10), Some(INIT_FRAME_2[10]));
    }

    #[test]
    fn test_control_template_trailer_is_placeholder() {
        let offset = checksum_offset(&CONTROL_TEMPLATE).unwrap();
        assert_eq!(offset, 22);
        assert_eq!(&CONTROL_TEMPLATE[offset..], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_init_frame_1_has_no_crc_room() {
        // The checksum is the final byte; a CRC-16 would not fit
        let offset = checksum_offset(&INIT_FRAME_1).unwrap();
        assert_eq!(offset + 1, INIT_FRAME_LEN);
    }
}
