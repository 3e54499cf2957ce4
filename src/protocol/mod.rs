pub mod checksum;
pub mod frames;
pub mod framing;

pub use framing::FrameAssembler;
