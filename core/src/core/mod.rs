pub mod console;
pub mod host;

pub use console::{Console, ConsoleError};
pub use host::{AudioOut, AudioSink, BufferSide, DisplayBackend, InputSource, StateStore};
