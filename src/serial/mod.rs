pub mod io;
pub mod traits;

pub use io::IoPort;
pub use traits::{SerialError, SerialPort};
