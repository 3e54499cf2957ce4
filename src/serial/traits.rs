//! Serial port abstraction over the conditioner link.
//!
//! The client only ever sees this trait, so the real UART driver can be
//! swapped for a scripted mock in tests.

/// Errors surfaced by the serial transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Byte framing was lost on the wire
    FramingError,
    /// A buffer filled before its data could be taken
    OverflowError,
    /// The operation gave up waiting
    Timeout,
    /// The driver rejected an outgoing write
    WriteError,
}

/// Byte transport to the unit.
///
/// The client polls rather than blocks, so `read` must return straight
/// away with whatever is pending.
pub trait SerialPort {
    /// Read pending bytes into `buf`.
    ///
    /// Returns how many bytes were copied, `Ok(0)` when nothing is
    /// waiting. Must not block.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError>;

    /// Send bytes down the link
    fn write(&mut self, data: &[u8]) -> Result<(), SerialError>;

    /// Push any driver-buffered output onto the wire
    fn flush(&mut self) -> Result<(), SerialError>;
}

#[cfg(test)]
pub mod mock {
    //! Scripted serial port backing the unit tests.

    use super::*;
    use crate::protocol::frames::STATUS_FRAME_LEN;
    use core::cell::RefCell;
    use heapless::Vec;

    // Room for a few full status frames in either direction.
    const MOCK_CAPACITY: usize = STATUS_FRAME_LEN * 4;

    /// Serial port double with scripted input and captured output.
    ///
    /// Bytes are handed to `read()` in the order they were queued, and
    /// everything the code under test writes is kept for inspection. A
    /// fault can be armed to make a single call fail.
    pub struct MockSerialPort {
        /// Bytes the next read() calls will drain
        rx: RefCell<Vec<u8, MOCK_CAPACITY>>,
        /// Bytes captured from write()
        tx: RefCell<Vec<u8, MOCK_CAPACITY>>,
        /// Fault armed for the next read()
        read_fault: RefCell<Option<SerialError>>,
        /// Fault armed for the next write()
        write_fault: RefCell<Option<SerialError>>,
    }

    impl MockSerialPort {
        /// Create a mock with empty buffers and no faults armed
        pub fn new() -> Self {
            Self {
                rx: RefCell::new(Vec::new()),
                tx: RefCell::new(Vec::new()),
                read_fault: RefCell::new(None),
                write_fault: RefCell::new(None),
            }
        }

        /// Append bytes for later `read()` calls to pick up
        pub fn queue_rx_data(&self, data: &[u8]) {
            let _ = self.rx.borrow_mut().extend_from_slice(data);
        }

        /// Everything written through the port so far
        pub fn get_tx_data(&self) -> Vec<u8, MOCK_CAPACITY> {
            self.tx.borrow().clone()
        }

        /// Forget the captured writes
        pub fn clear_tx_buffer(&self) {
            self.tx.borrow_mut().clear();
        }

        /// Arm a fault for the next `read()`; it fires once
        pub fn set_next_read_error(&self, error: SerialError) {
            *self.read_fault.borrow_mut() = Some(error);
        }

        /// Arm a fault for the next `write()`; it fires once
        pub fn set_next_write_error(&self, error: SerialError) {
            *self.write_fault.borrow_mut() = Some(error);
        }
    }

    impl Default for MockSerialPort {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SerialPort for MockSerialPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
            if let Some(fault) = self.read_fault.borrow_mut().take() {
                return Err(fault);
            }

            let mut rx = self.rx.borrow_mut();
            if rx.is_empty() {
                return Ok(0);
            }

            let count = buf.len().min(rx.len());
            buf[..count].copy_from_slice(&rx[..count]);

            // Drop the bytes just handed out
            let keep = rx.len() - count;
            rx.copy_within(count.., 0);
            rx.truncate(keep);

            Ok(count)
        }

        fn write(&mut self, data: &[u8]) -> Result<(), SerialError> {
            if let Some(fault) = self.write_fault.borrow_mut().take() {
                return Err(fault);
            }

            self.tx
                .borrow_mut()
                .extend_from_slice(data)
                .map_err(|_| SerialError::OverflowError)
        }

        fn flush(&mut self) -> Result<(), SerialError> {
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_hands_out_queued_bytes() {
            let mut port = MockSerialPort::new();
            port.queue_rx_data(&[0xFF, 0xFF, 0x2A]);

            let mut buf = [0u8; 8];
            let count = port.read(&mut buf).unwrap();

            assert_eq!(count, 3);
            assert_eq!(&buf[..3], &[0xFF, 0xFF, 0x2A]);
        }

        #[test]
        fn test_mock_reads_nothing_when_idle() {
            let mut port = MockSerialPort::new();

            let mut buf = [0u8; 8];
            assert_eq!(port.read(&mut buf), Ok(0));
        }

        #[test]
        fn test_mock_drains_in_chunks() {
            let mut port = MockSerialPort::new();
            port.queue_rx_data(&[0x10, 0x20, 0x30, 0x40, 0x50]);

            let mut head = [0u8; 2];
            assert_eq!(port.read(&mut head), Ok(2));
            assert_eq!(&head, &[0x10, 0x20]);

            let mut rest = [0u8; 8];
            assert_eq!(port.read(&mut rest), Ok(3));
            assert_eq!(&rest[..3], &[0x30, 0x40, 0x50]);
        }

        #[test]
        fn test_mock_accumulates_writes() {
            let mut port = MockSerialPort::new();
            port.write(&[0xFF, 0xFF]).unwrap();
            port.write(&[0x0A, 0x40]).unwrap();

            assert_eq!(port.get_tx_data().as_slice(), &[0xFF, 0xFF, 0x0A, 0x40]);

            port.clear_tx_buffer();
            assert!(port.get_tx_data().is_empty());
        }

        #[test]
        fn test_mock_faults_fire_once() {
            let mut port = MockSerialPort::new();
            port.set_next_read_error(SerialError::FramingError);

            let mut buf = [0u8; 8];
            assert_eq!(port.read(&mut buf), Err(SerialError::FramingError));

            port.queue_rx_data(&[0x01]);
            assert_eq!(port.read(&mut buf), Ok(1));
        }

        #[test]
        fn test_mock_write_fault_fires_once() {
            let mut port = MockSerialPort::new();
            port.set_next_write_error(SerialError::WriteError);

            assert_eq!(port.write(&[0x01]), Err(SerialError::WriteError));
            assert_eq!(port.write(&[0x01]), Ok(()));
            assert_eq!(port.get_tx_data().as_slice(), &[0x01]);
        }
    }
}
