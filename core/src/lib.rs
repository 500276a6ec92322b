//! Real-time execution loop for a handheld console emulator shell.
//!
//! The `core` module defines the seams to the outside world: the emulated
//! console itself and the host's display, audio, input and state-storage
//! subsystems. The `shell` module is the loop built on top of those seams:
//! frame pacing, the pause/context-menu state machine, double-buffer and
//! pause-snapshot coordination, and the audio hand-off. Everything in `shell`
//! runs on one logical thread and is testable against mock collaborators.

pub mod core;
pub mod shell;

pub mod prelude {
    pub use crate::core::console::{Console, ConsoleError, FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};
    pub use crate::core::host::{
        AudioOut, AudioSink, BufferSide, DisplayBackend, InputSource, StateStore,
    };
    pub use crate::shell::input::{Button, PadState};
    pub use crate::shell::menu::Settings;
    pub use crate::shell::session::Session;
}
