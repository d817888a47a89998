pub mod capture;
pub mod device;

pub use capture::{ChunkStream, MicrophoneStream};
pub use device::DeviceManager;
