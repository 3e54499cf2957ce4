//! Link and session constants for the Haier serial protocol

/// Serial link configuration
pub mod serial {
    /// The indoor unit speaks 9600 8N1 only
    pub const BAUD_RATE: u32 = 9600;

    /// Chunk size used when draining the receive side
    pub const READ_BUFFER_SIZE: usize = 64;
}

/// Session timing
pub mod timing {
    /// Cadence at which the host scheduler should request a status poll
    pub const POLL_INTERVAL_MS: u32 = 5000;

    /// Settle time before each initialisation frame
    pub const INIT_FRAME_DELAY_MS: u32 = 1000;
}

/// Temperature limits in whole degrees Celsius
pub mod temperature {
    /// Lowest accepted setpoint
    pub const MIN_SETPOINT: u8 = 16;
    /// Highest accepted setpoint
    pub const MAX_SETPOINT: u8 = 30;

    /// Indoor readings outside this window are treated as corruption
    pub const MIN_VALID_INDOOR: u8 = 10;
    pub const MAX_VALID_INDOOR: u8 = 50;

    /// The wire encodes the setpoint as degrees above this base
    pub const SETPOINT_BASE: u8 = 16;
}
