pub mod memory;
pub mod parser;
pub mod serialiser;
pub mod types;

pub use memory::ModeMemory;
pub use parser::StatusParser;
pub use serialiser::ControlSerialiser;
pub use types::{
    ChangeRequest, ClimateMode, ClimateState, DecodeError, DeviceState, FanLevel, RequestError,
    SwingMode,
};
