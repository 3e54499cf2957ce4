//! Adapter for drivers exposing the `embedded-io` traits
//!
//! Wraps any byte stream implementing `Read`, `ReadReady` and `Write` so it
//! can serve as the protocol's [`SerialPort`]. `ReadReady` keeps reads
//! non-blocking: the port is only read once the driver reports pending data.

use embedded_io::{Error, ErrorKind, Read, ReadReady, Write};

use crate::serial::traits::{SerialError, SerialPort};

/// [`SerialPort`] backed by an `embedded-io` byte stream
pub struct IoPort<T> {
    inner: T,
}

impl<T> IoPort<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped driver
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> SerialPort for IoPort<T>
where
    T: Read + ReadReady + Write,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        match self.inner.read_ready() {
            Ok(true) => {}
            Ok(false) => return Ok(0),
            Err(err) => return Err(map_error(err.kind(), SerialError::FramingError)),
        }

        self.inner
            .read(buf)
            .map_err(|err| map_error(err.kind(), SerialError::FramingError))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.inner
            .write_all(data)
            .map_err(|err| map_error(err.kind(), SerialError::WriteError))
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.inner
            .flush()
            .map_err(|err| map_error(err.kind(), SerialError::WriteError))
    }
}

/// Fold driver error kinds onto the protocol's error set.
///
/// `ErrorKind` is non-exhaustive; kinds without a specific mapping fall
/// back to the error matching the failed direction.
fn map_error(kind: ErrorKind, fallback: SerialError) -> SerialError {
    match kind {
        ErrorKind::TimedOut => SerialError::Timeout,
        ErrorKind::OutOfMemory => SerialError::OverflowError,
        _ => fallback,
    }
}
