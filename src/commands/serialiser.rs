//! Control frame serialiser
//!
//! Builds control frames by reproducing the unit's current settings and
//! applying the requested changes on top. The unit treats every control
//! frame as a complete settings write rather than a delta, so seeding from
//! the last decoded status keeps unrelated settings stable.

use crate::commands::memory::{ModeMemory, ModeSlot};
use crate::commands::types::{
    ChangeRequest, ClimateMode, DeviceState, FanLevel, FanSpeed, HorizontalSwing, HvacMode,
    SwingMode, VerticalSwing,
};
use crate::config::temperature;
use crate::protocol::checksum::finalise_frame;
use crate::protocol::frames::{offset, status_flag, CONTROL_FRAME_LEN, CONTROL_TEMPLATE};

/// Serialiser for control frames
pub struct ControlSerialiser;

impl ControlSerialiser {
    /// Create a new control serialiser
    pub fn new() -> Self {
        Self
    }

    /// Build a finalised control frame carrying the given changes.
    ///
    /// Settings not named in the request are copied from `state` so the
    /// unit sees them unchanged. Mode changes restore the remembered fan
    /// speed and setpoint for the target mode family; an explicit fan or
    /// temperature request in the same frame then overrides the restored
    /// value.
    pub fn serialise(
        &self,
        state: &DeviceState,
        memory: &ModeMemory,
        request: &ChangeRequest,
    ) -> [u8; CONTROL_FRAME_LEN] {
        let mut frame = CONTROL_TEMPLATE;

        set_flag(&mut frame, status_flag::POWER, state.power);
        set_flag(&mut frame, status_flag::PURIFY, state.purify_mode);
        set_flag(&mut frame, status_flag::QUIET, state.quiet_mode);
        set_flag(&mut frame, status_flag::FAST, state.fast_mode);
        set_mode_code(&mut frame, state.hvac_mode);
        set_fan_speed(&mut frame, state.fan_speed);
        set_horizontal(&mut frame, state.horizontal_swing);
        set_vertical(&mut frame, state.vertical_swing);
        set_setpoint_raw(&mut frame, state.setpoint_raw);

        if let Some(mode) = request.mode {
            apply_mode(&mut frame, state, memory, mode);
        }
        if let Some(fan) = request.fan {
            apply_fan(&mut frame, fan);
        }
        if let Some(swing) = request.swing {
            apply_swing(&mut frame, swing);
        }
        if let Some(celsius) = request.target_temperature {
            // Round half up before removing the 16 °C base
            let raw = ((celsius + 0.5) as u8).wrapping_sub(temperature::SETPOINT_BASE);
            set_setpoint_raw(&mut frame, raw);
        }

        finalise_frame(&mut frame);
        frame
    }
}

impl Default for ControlSerialiser {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_mode(
    frame: &mut [u8; CONTROL_FRAME_LEN],
    state: &DeviceState,
    memory: &ModeMemory,
    mode: ClimateMode,
) {
    match mode {
        ClimateMode::Off => {
            // Power acts as a toggle on the wire, like the remote's button
            set_flag(frame, status_flag::POWER, !state.power);
        }
        ClimateMode::HeatCool | ClimateMode::Auto => {
            set_flag(frame, status_flag::POWER, true);
            set_mode_code(frame, HvacMode::Auto);
            restore_slot(frame, memory.climate());
        }
        ClimateMode::Cool => {
            set_flag(frame, status_flag::POWER, true);
            set_mode_code(frame, HvacMode::Cool);
            restore_slot(frame, memory.climate());
        }
        ClimateMode::Heat => {
            set_flag(frame, status_flag::POWER, true);
            set_mode_code(frame, HvacMode::Heat);
            restore_slot(frame, memory.climate());
        }
        ClimateMode::Dry => {
            set_flag(frame, status_flag::POWER, true);
            set_mode_code(frame, HvacMode::Dry);
            restore_slot(frame, memory.climate());
        }
        ClimateMode::FanOnly => {
            set_flag(frame, status_flag::POWER, true);
            set_mode_code(frame, HvacMode::Fan);
            restore_slot(frame, memory.fan_only());
        }
    }
}

fn apply_fan(frame: &mut [u8; CONTROL_FRAME_LEN], fan: FanLevel) {
    let speed = match fan {
        FanLevel::Auto => FanSpeed::Auto,
        FanLevel::Low => FanSpeed::Low,
        FanLevel::Medium => FanSpeed::Mid,
        FanLevel::High => FanSpeed::High,
        other => {
            log::debug!("fan level {:?} has no wire code, ignoring", other);
            return;
        }
    };
    set_fan_speed(frame, speed);
}

fn apply_swing(frame: &mut [u8; CONTROL_FRAME_LEN], swing: SwingMode) {
    let (horizontal, vertical) = match swing {
        SwingMode::Off => (HorizontalSwing::Centre, VerticalSwing::Centre),
        SwingMode::Vertical => (HorizontalSwing::Centre, VerticalSwing::Auto),
        SwingMode::Horizontal => (HorizontalSwing::Auto, VerticalSwing::Centre),
        SwingMode::Both => (HorizontalSwing::Auto, VerticalSwing::Auto),
    };
    set_horizontal(frame, horizontal);
    set_vertical(frame, vertical);
}

fn restore_slot(frame: &mut [u8; CONTROL_FRAME_LEN], slot: ModeSlot) {
    set_fan_speed(frame, slot.fan_speed);
    set_setpoint_raw(frame, slot.setpoint_raw);
}

fn set_flag(frame: &mut [u8; CONTROL_FRAME_LEN], bit: u8, on: bool) {
    if on {
        frame[offset::STATUS_FLAGS] |= 1 << bit;
    } else {
        frame[offset::STATUS_FLAGS] &= !(1 << bit);
    }
}

fn set_mode_code(frame: &mut [u8; CONTROL_FRAME_LEN], mode: HvacMode) {
    let byte = &mut frame[offset::MODE];
    *byte = (*byte & !HvacMode::MASK) | mode as u8;
}

fn set_fan_speed(frame: &mut [u8; CONTROL_FRAME_LEN], speed: FanSpeed) {
    let byte = &mut frame[offset::MODE];
    *byte = (*byte & !FanSpeed::MASK) | speed as u8;
}

fn set_horizontal(frame: &mut [u8; CONTROL_FRAME_LEN], swing: HorizontalSwing) {
    frame[offset::HORIZONTAL_SWING] = swing as u8;
}

fn set_vertical(frame: &mut [u8; CONTROL_FRAME_LEN], swing: VerticalSwing) {
    frame[offset::VERTICAL_SWING] = swing as u8;
}

fn set_setpoint_raw(frame: &mut [u8; CONTROL_FRAME_LEN], raw: u8) {
    frame[offset::SET_TEMPERATURE] = raw;
}
