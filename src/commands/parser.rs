//! Status response decoder
//!
//! Decodes assembled status frames into [`DeviceState`] values. Validation
//! runs before any state is handed out: the frame must be full length, carry
//! the status command byte, pass the additive checksum and decode to
//! plausible temperatures. The unit has been observed sending frames whose
//! CRC-16 disagrees with its own checksum, so the CRC is not checked on
//! receive.

use crate::commands::types::{
    DecodeError, DeviceState, FanSpeed, HorizontalSwing, HvacMode, VerticalSwing,
};
use crate::config::temperature;
use crate::protocol::checksum::{checksum8, checksum_offset};
use crate::protocol::frames::{command, offset, status_flag, STATUS_FRAME_LEN};

/// Decoder for status response frames
pub struct StatusParser;

impl StatusParser {
    /// Create a new status parser
    pub fn new() -> Self {
        Self
    }

    /// Decode a status frame into the device state it reports.
    ///
    /// Rejected frames leave no trace; callers keep their previous state.
    pub fn parse(&self, frame: &[u8]) -> Result<DeviceState, DecodeError> {
        if frame.len() < STATUS_FRAME_LEN {
            return Err(DecodeError::FrameTruncated);
        }

        if frame[offset::COMMAND] != command::STATUS_RESPONSE {
            return Err(DecodeError::UnrecognisedFrameType);
        }

        let Some(checksum_at) = checksum_offset(frame) else {
            return Err(DecodeError::FrameTruncated);
        };
        let Some(calculated) = checksum8(frame, checksum_at) else {
            log::warn!(
                "status frame shorter than its declared length ({} vs {})",
                frame.len(),
                checksum_at
            );
            return Err(DecodeError::ChecksumMismatch);
        };
        let Some(&received) = frame.get(checksum_at) else {
            return Err(DecodeError::ChecksumMismatch);
        };
        if calculated != received {
            log::warn!(
                "invalid status checksum ({:#04x} calculated, {:#04x} received)",
                calculated,
                received
            );
            return Err(DecodeError::ChecksumMismatch);
        }

        let mode_byte = frame[offset::MODE];
        let flags = frame[offset::STATUS_FLAGS];

        let state = DeviceState {
            power: flag_set(flags, status_flag::POWER),
            hvac_mode: HvacMode::from_code(mode_byte).unwrap_or(HvacMode::Auto),
            fan_speed: FanSpeed::from_code(mode_byte).unwrap_or(FanSpeed::Auto),
            horizontal_swing: HorizontalSwing::from_code(frame[offset::HORIZONTAL_SWING])
                .unwrap_or(HorizontalSwing::Centre),
            vertical_swing: VerticalSwing::from_code(frame[offset::VERTICAL_SWING])
                .unwrap_or(VerticalSwing::Centre),
            quiet_mode: flag_set(flags, status_flag::QUIET),
            fast_mode: flag_set(flags, status_flag::FAST),
            purify_mode: flag_set(flags, status_flag::PURIFY),
            setpoint_raw: frame[offset::SET_TEMPERATURE],
            current_temperature_raw: frame[offset::CURRENT_TEMPERATURE],
        };

        let current = state.current_temperature();
        let target = state.target_temperature();
        if !(temperature::MIN_VALID_INDOOR..=temperature::MAX_VALID_INDOOR).contains(&current)
            || !(temperature::MIN_SETPOINT..=temperature::MAX_SETPOINT).contains(&target)
        {
            log::warn!(
                "implausible temperatures in status frame (current {} °C, target {} °C)",
                current,
                target
            );
            return Err(DecodeError::ImplausibleTemperature);
        }

        Ok(state)
    }
}

impl Default for StatusParser {
    fn default() -> Self {
        Self::new()
    }
}

fn flag_set(flags: u8, bit: u8) -> bool {
    flags & (1 << bit) != 0
}
