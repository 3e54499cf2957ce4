//! Per-mode settings memory
//!
//! The unit forgets fan speed and setpoint when switched between fan-only
//! and the climate modes, so the last accepted values are remembered here
//! and restored whenever a mode change is requested. Fan-only keeps its own
//! slot because its usual fan speed differs from the climate modes'.

use crate::commands::types::{DeviceState, FanSpeed, HvacMode};

/// Remembered settings for one mode family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSlot {
    pub fan_speed: FanSpeed,
    /// Setpoint as stored on the wire, degrees above 16 °C
    pub setpoint_raw: u8,
}

/// Settings memory for the two mode families.
///
/// Slots are refreshed from every accepted status response, never from
/// requests, so a rejected frame cannot poison the memory.
pub struct ModeMemory {
    climate: ModeSlot,
    fan_only: ModeSlot,
}

impl ModeMemory {
    pub fn new() -> Self {
        Self {
            // 26 °C, unit-controlled airflow
            climate: ModeSlot {
                fan_speed: FanSpeed::Auto,
                setpoint_raw: 0x0A,
            },
            // 24 °C, maximum airflow
            fan_only: ModeSlot {
                fan_speed: FanSpeed::High,
                setpoint_raw: 0x08,
            },
        }
    }

    /// Refresh the slot matching the state's current mode family.
    pub fn observe(&mut self, state: &DeviceState) {
        let slot = ModeSlot {
            fan_speed: state.fan_speed,
            setpoint_raw: state.setpoint_raw,
        };
        if state.hvac_mode == HvacMode::Fan {
            self.fan_only = slot;
        } else {
            self.climate = slot;
        }
    }

    /// Remembered settings for the climate modes
    pub fn climate(&self) -> ModeSlot {
        self.climate
    }

    /// Remembered settings for fan-only mode
    pub fn fan_only(&self) -> ModeSlot {
        self.fan_only
    }
}

impl Default for ModeMemory {
    fn default() -> Self {
        Self::new()
    }
}
