//! Device state and climate types for the Haier status protocol
//!
//! # Mode Byte
//!
//! Operating mode and fan speed share a single byte: the high nibble selects
//! the mode, the low nibble the fan speed.
//!
//! | Nibble | Field | Codes                                                  |
//! |--------|-------|--------------------------------------------------------|
//! | High   | Mode  | 0x0 auto, 0x2 cool, 0x4 dry, 0x8 heat, 0xC fan         |
//! | Low    | Fan   | 0x1 high, 0x2 mid, 0x3 low, 0x5 auto                   |
//!
//! # Temperatures
//!
//! The setpoint is stored as an offset from 16 °C, so raw 0x09 means 25 °C.
//! The indoor reading is stored in half-degrees and reported in whole
//! degrees, discarding the half-degree bit.
//!
//! # Status Flags
//!
//! One byte carries the boolean features as individual bits: power (bit 0),
//! purify (bit 1), quiet (bit 3) and fast cooling/heating (bit 4).

use crate::config::temperature;
use crate::serial::SerialError;

/// Operating mode codes, stored in the high nibble of the mode byte
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacMode {
    /// Automatic heat/cool selection (0x00)
    Auto = 0x00,

    /// Cooling (0x20)
    Cool = 0x20,

    /// Dehumidify (0x40)
    Dry = 0x40,

    /// Heating (0x80)
    Heat = 0x80,

    /// Fan only, compressor off (0xC0)
    Fan = 0xC0,
}

impl HvacMode {
    /// Mask selecting the mode bits within the shared mode byte
    pub const MASK: u8 = 0xF0;

    /// Try to convert a mode byte to an HvacMode
    pub fn from_code(byte: u8) -> Option<Self> {
        match byte & Self::MASK {
            0x00 => Some(Self::Auto),
            0x20 => Some(Self::Cool),
            0x40 => Some(Self::Dry),
            0x80 => Some(Self::Heat),
            0xC0 => Some(Self::Fan),
            _ => None,
        }
    }
}

/// Fan speed codes, stored in the low nibble of the mode byte
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSpeed {
    /// Maximum airflow (0x01)
    High = 0x01,

    /// Medium airflow (0x02)
    Mid = 0x02,

    /// Minimum airflow (0x03)
    Low = 0x03,

    /// Unit-controlled airflow (0x05)
    Auto = 0x05,
}

impl FanSpeed {
    /// Mask selecting the fan bits within the shared mode byte
    pub const MASK: u8 = 0x0F;

    /// Try to convert a mode byte to a FanSpeed
    pub fn from_code(byte: u8) -> Option<Self> {
        match byte & Self::MASK {
            0x01 => Some(Self::High),
            0x02 => Some(Self::Mid),
            0x03 => Some(Self::Low),
            0x05 => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Horizontal louvre position codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalSwing {
    /// Fixed straight ahead (0x00)
    Centre = 0x00,

    /// Fixed hard left (0x03)
    MaxLeft = 0x03,

    /// Fixed part left (0x04)
    Left = 0x04,

    /// Fixed part right (0x05)
    Right = 0x05,

    /// Fixed hard right (0x06)
    MaxRight = 0x06,

    /// Continuous sweep (0x07)
    Auto = 0x07,
}

impl HorizontalSwing {
    /// Try to convert a byte to a HorizontalSwing
    pub fn from_code(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Centre),
            0x03 => Some(Self::MaxLeft),
            0x04 => Some(Self::Left),
            0x05 => Some(Self::Right),
            0x06 => Some(Self::MaxRight),
            0x07 => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Vertical louvre position codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalSwing {
    /// Health airflow, tilted up (0x01)
    HealthUp = 0x01,

    /// Fixed fully up (0x02)
    MaxUp = 0x02,

    /// Health airflow, tilted down (0x03)
    HealthDown = 0x03,

    /// Fixed part up (0x04)
    Up = 0x04,

    /// Fixed straight ahead (0x06)
    Centre = 0x06,

    /// Fixed down (0x08)
    Down = 0x08,

    /// Continuous sweep (0x0C)
    Auto = 0x0C,
}

impl VerticalSwing {
    /// Try to convert a byte to a VerticalSwing
    pub fn from_code(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::HealthUp),
            0x02 => Some(Self::MaxUp),
            0x03 => Some(Self::HealthDown),
            0x04 => Some(Self::Up),
            0x06 => Some(Self::Centre),
            0x08 => Some(Self::Down),
            0x0C => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Full device state decoded from a status response.
///
/// Raw wire values are kept alongside the decoded enums so a control frame
/// can reproduce the unit's exact current settings before applying changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub power: bool,
    pub hvac_mode: HvacMode,
    pub fan_speed: FanSpeed,
    pub horizontal_swing: HorizontalSwing,
    pub vertical_swing: VerticalSwing,
    pub quiet_mode: bool,
    pub fast_mode: bool,
    pub purify_mode: bool,
    /// Setpoint as stored on the wire, degrees above 16 °C
    pub setpoint_raw: u8,
    /// Indoor reading as stored on the wire, in half-degrees
    pub current_temperature_raw: u8,
}

impl DeviceState {
    /// Climate-facing mode, folding the power flag into the mode
    pub fn climate_mode(&self) -> ClimateMode {
        if !self.power {
            return ClimateMode::Off;
        }
        match self.hvac_mode {
            HvacMode::Auto => ClimateMode::HeatCool,
            HvacMode::Cool => ClimateMode::Cool,
            HvacMode::Dry => ClimateMode::Dry,
            HvacMode::Heat => ClimateMode::Heat,
            HvacMode::Fan => ClimateMode::FanOnly,
        }
    }

    /// Climate-facing fan level.
    ///
    /// Quiet and fast modes pin the effective airflow regardless of the raw
    /// fan speed, so they take precedence when reporting.
    pub fn fan_level(&self) -> FanLevel {
        if !self.power {
            return FanLevel::Off;
        }
        if self.quiet_mode {
            return FanLevel::Low;
        }
        if self.fast_mode {
            return FanLevel::High;
        }
        match self.fan_speed {
            FanSpeed::Auto => FanLevel::Auto,
            FanSpeed::Low => FanLevel::Low,
            FanSpeed::Mid => FanLevel::Medium,
            FanSpeed::High => FanLevel::High,
        }
    }

    /// Climate-facing swing mode folded from the two louvre axes
    pub fn swing_mode(&self) -> SwingMode {
        if !self.power {
            return SwingMode::Off;
        }
        match (self.horizontal_swing, self.vertical_swing) {
            (HorizontalSwing::Auto, VerticalSwing::Auto) => SwingMode::Both,
            (HorizontalSwing::Auto, _) => SwingMode::Horizontal,
            (_, VerticalSwing::Auto) => SwingMode::Vertical,
            _ => SwingMode::Off,
        }
    }

    /// Indoor temperature in whole degrees Celsius
    pub fn current_temperature(&self) -> u8 {
        self.current_temperature_raw / 2
    }

    /// Target setpoint in degrees Celsius
    pub fn target_temperature(&self) -> u8 {
        self.setpoint_raw.saturating_add(temperature::SETPOINT_BASE)
    }

    /// Snapshot of the climate-facing view of this state
    pub fn climate_state(&self) -> ClimateState {
        ClimateState {
            mode: self.climate_mode(),
            fan: self.fan_level(),
            swing: self.swing_mode(),
            current_temperature: self.current_temperature(),
            target_temperature: self.target_temperature(),
        }
    }
}

/// Climate-facing operating mode
///
/// `Auto` and `HeatCool` both select the unit's automatic mode; status
/// responses always report it as `HeatCool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateMode {
    Off,
    HeatCool,
    Auto,
    Cool,
    Heat,
    Dry,
    FanOnly,
}

/// Climate-facing fan level
///
/// Only `Auto`, `Low`, `Medium` and `High` map onto the wire protocol; the
/// remaining levels exist for integration completeness and are ignored when
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanLevel {
    On,
    Off,
    Auto,
    Low,
    Medium,
    High,
    Middle,
    Focus,
    Diffuse,
}

/// Climate-facing louvre sweep selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingMode {
    Off,
    Vertical,
    Horizontal,
    Both,
}

/// Climate-facing summary of a decoded status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateState {
    pub mode: ClimateMode,
    pub fan: FanLevel,
    pub swing: SwingMode,
    /// Indoor temperature in whole degrees Celsius
    pub current_temperature: u8,
    /// Target setpoint in degrees Celsius
    pub target_temperature: u8,
}

/// Requested settings changes, applied on top of the last known state.
///
/// Fields left as `None` keep the unit's current setting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeRequest {
    pub mode: Option<ClimateMode>,
    pub fan: Option<FanLevel>,
    pub swing: Option<SwingMode>,
    /// Desired setpoint in degrees Celsius; callers clamp to the supported
    /// range before requesting
    pub target_temperature: Option<f32>,
}

impl ChangeRequest {
    /// True when no setting is requested to change
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.fan.is_none()
            && self.swing.is_none()
            && self.target_temperature.is_none()
    }
}

/// Reasons a status frame is rejected by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame shorter than a full status response
    FrameTruncated,

    /// Command byte does not identify a status response
    UnrecognisedFrameType,

    /// Additive checksum does not match the trailer, or the declared length
    /// does not fit the frame
    ChecksumMismatch,

    /// Decoded temperatures fall outside their plausible ranges
    ImplausibleTemperature,
}

/// Reasons a change request fails to reach the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// No status response has been decoded yet, so there is no state to
    /// seed the control frame from
    NoStatusReceived,

    /// The serial link failed while sending
    Serial(SerialError),
}

impl From<SerialError> for RequestError {
    fn from(err: SerialError) -> Self {
        Self::Serial(err)
    }
}
