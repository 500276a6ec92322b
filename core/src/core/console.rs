use crate::core::host::AudioSink;
use crate::shell::input::PadState;

/// Native display resolution of the handheld, in pixels.
pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 240;

/// Framebuffers are RGB565, two bytes per pixel, little-endian.
pub const BYTES_PER_PIXEL: usize = 2;

/// Size of one full frame in bytes (115 200).
pub const FRAME_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL;

/// Errors surfaced by a console core outside the frame loop.
///
/// Nothing inside `run_frame` may fail; loading a ROM or deserializing a
/// save state happens before or between frames and reports through here.
#[derive(Debug)]
pub enum ConsoleError {
    /// The ROM image was rejected (truncated, wrong system, bad header).
    BadRom(String),

    /// A save-state blob could not be applied (wrong version, truncated).
    BadState(String),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRom(msg) => write!(f, "bad ROM: {msg}"),
            Self::BadState(msg) => write!(f, "bad save state: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Interface to an emulated console core.
///
/// The shell is a pure pacing and presentation engine: it does not know
/// which system is being emulated. Each core implements this trait and is
/// discovered through the registry in `lantern-cores`.
pub trait Console {
    /// Load a ROM image. Called once before the session starts.
    fn load_rom(&mut self, data: &[u8]) -> Result<(), ConsoleError>;

    /// Execute one emulated frame.
    ///
    /// When `video` is `Some`, the core renders pixels into the supplied
    /// RGB565 buffer (at least [`FRAME_BYTES`] long). When it is `None`,
    /// the core runs logic only and skips pixel output; audio and timing
    /// must advance exactly as in a rendered frame.
    ///
    /// The core pushes any audio it produced during the frame through
    /// `audio`, zero or more times, as interleaved stereo 16-bit blocks.
    /// The sink may block until the host queue has room; the core must not
    /// call back into itself from inside the push.
    fn run_frame(&mut self, video: Option<&mut [u8]>, audio: &mut dyn AudioSink);

    /// Latch the controller state for subsequent frames.
    ///
    /// The shell only calls this when the pad mask actually changed, so the
    /// call is allowed to be non-trivial.
    fn set_pad(&mut self, pad: PadState);

    /// Reset to power-on state. `hard` also clears battery-backed memory.
    fn reset(&mut self, hard: bool);

    /// Serialize the full machine state into a save-state blob.
    fn save_state(&self) -> Vec<u8>;

    /// Restore a previously serialized machine state.
    fn load_state(&mut self, data: &[u8]) -> Result<(), ConsoleError>;

    /// Output sample rate of the core's audio, in Hz.
    fn sample_rate(&self) -> u32 {
        44_100
    }
}
