//! Protocol client
//!
//! Owns the full exchange with one unit, from the startup handshake through
//! status decoding to control frames seeded off the last accepted state.
//! The client never blocks; callers drive it from their own loop, reading
//! whenever data may be pending and polling on their own schedule.

use embedded_hal::delay::DelayNs;

use crate::commands::memory::ModeMemory;
use crate::commands::parser::StatusParser;
use crate::commands::serialiser::ControlSerialiser;
use crate::commands::types::{ChangeRequest, ClimateState, DeviceState, RequestError};
use crate::config::serial::READ_BUFFER_SIZE;
use crate::config::timing::INIT_FRAME_DELAY_MS;
use crate::protocol::frames::{INIT_FRAME_1, INIT_FRAME_2, POLL_FRAME};
use crate::protocol::framing::FrameAssembler;
use crate::serial::traits::{SerialError, SerialPort};

/// Client for one Haier unit on a serial link.
///
/// The serial port is passed into each call rather than owned, so the same
/// port can carry other traffic between calls.
pub struct HaierClient {
    assembler: FrameAssembler,
    parser: StatusParser,
    serialiser: ControlSerialiser,
    memory: ModeMemory,
    state: Option<DeviceState>,
}

impl HaierClient {
    /// Create a client with no known device state
    pub fn new() -> Self {
        Self {
            assembler: FrameAssembler::new(),
            parser: StatusParser::new(),
            serialiser: ControlSerialiser::new(),
            memory: ModeMemory::new(),
            state: None,
        }
    }

    /// Drain pending serial data and decode any complete status frames.
    ///
    /// Returns the climate view of the newest accepted status, or `None`
    /// when this call produced no update. Frames that fail validation are
    /// logged and skipped; the previously accepted state stays in force.
    pub fn process_incoming<S: SerialPort>(
        &mut self,
        serial: &mut S,
    ) -> Result<Option<ClimateState>, SerialError> {
        let mut read_buf = [0u8; READ_BUFFER_SIZE];
        let mut update = None;

        loop {
            let bytes_read = serial.read(&mut read_buf)?;
            if bytes_read == 0 {
                break;
            }

            for &byte in &read_buf[..bytes_read] {
                let Some(frame) = self.assembler.push(byte) else {
                    continue;
                };

                match self.parser.parse(&frame) {
                    Ok(state) => {
                        log::debug!("status accepted: {:02x?}", frame.as_slice());
                        self.memory.observe(&state);
                        self.state = Some(state);
                        update = Some(state.climate_state());
                    }
                    Err(err) => {
                        log::debug!("status rejected ({:?}): {:02x?}", err, frame.as_slice());
                    }
                }
            }
        }

        Ok(update)
    }

    /// Ask the unit for a status report.
    ///
    /// Callers repeat this on their polling cadence; the unit answers each
    /// poll with one status response.
    pub fn send_poll<S: SerialPort>(&mut self, serial: &mut S) -> Result<(), SerialError> {
        log::debug!("polling: {:02x?}", POLL_FRAME);
        serial.write(&POLL_FRAME)?;
        serial.flush()
    }

    /// Run the startup handshake.
    ///
    /// Each handshake frame goes out verbatim after a settling delay; the
    /// unit ignores polls until it has seen both.
    pub fn send_initialisation<S: SerialPort, D: DelayNs>(
        &mut self,
        serial: &mut S,
        delay: &mut D,
    ) -> Result<(), SerialError> {
        for frame in [&INIT_FRAME_1[..], &INIT_FRAME_2[..]] {
            delay.delay_ms(INIT_FRAME_DELAY_MS);
            log::debug!("initialising: {:02x?}", frame);
            serial.write(frame)?;
        }
        serial.flush()
    }

    /// Build and send a control frame applying the requested changes.
    ///
    /// The frame is seeded from the last accepted status, so nothing can be
    /// sent until at least one status response has decoded. An empty
    /// request sends nothing and reports success.
    pub fn request_change<S: SerialPort>(
        &mut self,
        serial: &mut S,
        request: &ChangeRequest,
    ) -> Result<(), RequestError> {
        let Some(state) = self.state else {
            log::debug!("change requested before any status was decoded");
            return Err(RequestError::NoStatusReceived);
        };
        if request.is_empty() {
            log::debug!("empty change request, nothing to send");
            return Ok(());
        }

        let frame = self.serialiser.serialise(&state, &self.memory, request);
        log::debug!("controlling: {:02x?}", frame);
        serial.write(&frame)?;
        serial.flush()?;
        Ok(())
    }

    /// Last accepted device state, if any
    pub fn state(&self) -> Option<&DeviceState> {
        self.state.as_ref()
    }
}

impl Default for HaierClient {
    fn default() -> Self {
        Self::new()
    }
}
