//! Checksum engine for the Haier frame trailer
//!
//! Every frame ends in an 8-bit additive checksum followed by a 16-bit CRC
//! (reflected polynomial 0xA001, initial value 0, stored high byte first).
//! Both cover bytes 2 up to the checksum offset declared by the frame's
//! length byte. The unit verifies the additive checksum strictly but has been
//! observed to tolerate CRC variance on receive, so inbound validation only
//! checks the former.

use crc::{Crc, CRC_16_ARC};

const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// Index of the first trailer byte, derived from the frame's length byte.
///
/// Returns `None` if the frame is too short to carry a length byte.
pub fn checksum_offset(frame: &[u8]) -> Option<usize> {
    frame.get(2).map(|&len| len as usize + 2)
}

/// 8-bit additive checksum over bytes[2..checksum_offset).
///
/// Returns `None` when the frame is shorter than the checksum offset. An
/// empty range (offset at or before the length byte) sums to 0.
pub fn checksum8(frame: &[u8], checksum_offset: usize) -> Option<u8> {
    if frame.len() < checksum_offset {
        return None;
    }
    if checksum_offset <= 2 {
        return Some(0);
    }

    let sum = frame[2..checksum_offset]
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
    Some(sum)
}

/// CRC-16 over the given bytes (reflected 0xA001, initial value 0).
pub fn crc16(bytes: &[u8]) -> u16 {
    CRC.checksum(bytes)
}

/// Recompute and write the checksum and CRC-16 into a frame's trailer,
/// overwriting any placeholder values.
///
/// Frames too short to hold the full three-byte trailer are left untouched;
/// the init handshake frames go out verbatim for exactly this reason.
pub fn finalise_frame(frame: &mut [u8]) {
    let Some(offset) = checksum_offset(frame) else {
        return;
    };
    let Some(sum) = checksum8(frame, offset) else {
        return;
    };
    if frame.len() < offset + 3 {
        return;
    }

    let crc = crc16(&frame[2..offset]);
    frame[offset] = sum;
    frame[offset + 1] = (crc >> 8) as u8;
    frame[offset + 2] = crc as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frames::{CONTROL_TEMPLATE, INIT_FRAME_1, POLL_FRAME};

    #[test]
    fn test_checksum8_poll_frame() {
        // 0x0A + 0x40 + 0x01 + 0x4D + 0x01 = 0x99
        assert_eq!(checksum8(&POLL_FRAME, 12), Some(0x99));
    }

    #[test]
    fn test_checksum8_wraps_modulo_256() {
        let frame = [0xFF, 0xFF, 0xF0, 0xF0, 0xF0];
        assert_eq!(checksum8(&frame, 5), Some(0xD0));
    }

    #[test]
    fn test_checksum8_empty_range() {
        let frame = [0xFF, 0xFF, 0x0A];
        assert_eq!(checksum8(&frame, 2), Some(0));
        assert_eq!(checksum8(&frame, 0), Some(0));
    }

    #[test]
    fn test_checksum8_frame_too_short() {
        let frame = [0xFF, 0xFF, 0x2A, 0x00];
        assert_eq!(checksum8(&frame, 44), None);
    }

    #[test]
    fn test_crc16_check_value() {
        // Standard CRC-16/ARC check input
        assert_eq!(crc16(b"123456789"), 0xBB3D);
    }

    #[test]
    fn test_crc16_poll_trailer() {
        // High byte then low byte, as stored in the template
        let crc = crc16(&POLL_FRAME[2..12]);
        assert_eq!(crc, 0xB3B4);
        assert_eq!(POLL_FRAME[13], 0xB3);
        assert_eq!(POLL_FRAME[14], 0xB4);
    }

    #[test]
    fn test_finalise_poll_is_stable() {
        // The poll template ships fully finalised; re-finalising reproduces it
        let mut frame = POLL_FRAME;
        finalise_frame(&mut frame);
        assert_eq!(frame, POLL_FRAME);
    }

    #[test]
    fn test_finalise_writes_control_trailer() {
        let mut frame = CONTROL_TEMPLATE;
        finalise_frame(&mut frame);

        let offset = checksum_offset(&frame).unwrap();
        assert_eq!(frame[offset], checksum8(&frame, offset).unwrap());

        let crc = crc16(&frame[2..offset]);
        assert_eq!(frame[offset + 1], (crc >> 8) as u8);
        assert_eq!(frame[offset + 2], crc as u8);

        // Everything before the trailer is untouched
        assert_eq!(&frame[..offset], &CONTROL_TEMPLATE[..offset]);
    }

    #[test]
    fn test_finalise_leaves_short_frame_untouched() {
        // Init frame 1 cannot hold a CRC-16; it must never be rewritten
        let mut frame = INIT_FRAME_1;
        finalise_frame(&mut frame);
        assert_eq!(frame, INIT_FRAME_1);
    }
}
