//! Frame assembly from the raw serial byte stream
//!
//! Status frames are delimited by a two-byte 0xFF 0xFF preamble and carry a
//! fixed total length. The assembler hunts for the preamble one byte at a
//! time, then accumulates until a full frame is buffered. Bytes arriving
//! outside a frame are discarded, so the stream resynchronises on the next
//! preamble after line noise or a dropped byte.

use heapless::Vec;

use crate::protocol::frames::{command, offset, PREAMBLE_BYTE, STATUS_FRAME_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the first preamble byte
    SeekingPreamble,
    /// One preamble byte seen; the next byte decides
    PreambleStarted,
    /// Preamble consumed; accumulating the frame body
    ReadingBody,
}

/// Accumulates serial bytes into complete status frames.
pub struct FrameAssembler {
    state: State,
    buffer: Vec<u8, STATUS_FRAME_LEN>,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self {
            state: State::SeekingPreamble,
            buffer: Vec::new(),
        }
    }

    /// Push a received byte into the assembler.
    ///
    /// Returns a complete status frame (preamble included) once one has been
    /// fully accumulated, or `None` while assembly is still in progress.
    /// Complete frames whose command byte is not a status response are
    /// dropped here so the caller only ever sees decodable input.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8, STATUS_FRAME_LEN>> {
        match self.state {
            State::SeekingPreamble => {
                if byte == PREAMBLE_BYTE {
                    self.state = State::PreambleStarted;
                }
                None
            }
            State::PreambleStarted => {
                if byte == PREAMBLE_BYTE {
                    self.buffer.clear();
                    let _ = self.buffer.push(PREAMBLE_BYTE);
                    let _ = self.buffer.push(PREAMBLE_BYTE);
                    self.state = State::ReadingBody;
                } else {
                    // False start, resume the hunt
                    self.state = State::SeekingPreamble;
                }
                None
            }
            State::ReadingBody => {
                let _ = self.buffer.push(byte);
                if self.buffer.len() < STATUS_FRAME_LEN {
                    return None;
                }

                // Frame complete - swap out the buffer
                self.state = State::SeekingPreamble;
                let frame = core::mem::replace(&mut self.buffer, Vec::new());

                if frame[offset::COMMAND] == command::STATUS_RESPONSE {
                    Some(frame)
                } else {
                    log::debug!(
                        "received frame is not a status response: {:#04x}",
                        frame[offset::COMMAND]
                    );
                    None
                }
            }
        }
    }

    /// Reset the assembler, discarding any partial frame.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.state = State::SeekingPreamble;
        self.buffer.clear();
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}
