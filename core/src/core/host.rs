//! Host subsystem interfaces consumed by the shell.
//!
//! The shell never talks to a windowing, audio or input library directly;
//! the frontend implements these traits over whatever backend it uses and
//! tests implement them with mocks.

use crate::shell::input::Button;

/// RGB565 color.
pub type Color = u16;

pub const COLOR_BLACK: Color = 0x0000;
pub const COLOR_WHITE: Color = 0xFFFF;
pub const COLOR_NAVY: Color = 0x0010;
pub const COLOR_GREY: Color = 0x8410;

/// One of the two physical framebuffer sides of the double-buffered display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferSide {
    A,
    B,
}

/// Sample sink handed to the console core for each frame.
///
/// Blocks of interleaved 16-bit stereo samples, forwarded downstream
/// verbatim. The call may block the caller until queue space is available;
/// that backpressure is the only flow control the audio path has.
pub trait AudioSink {
    fn push_samples(&mut self, samples: &[i16]);
}

/// Host audio output subsystem: a streaming queue of stereo 16-bit samples.
pub trait AudioOut {
    /// Enqueue interleaved stereo samples, blocking until the queue has room.
    fn queue_stereo_blocking(&mut self, samples: &[i16]);

    /// Set the output volume on a 0..=10 scale.
    fn set_volume(&mut self, level: u8);
}

/// Host display subsystem: a double-buffered pipeline plus the overlay
/// drawing primitives the context menu is composed with.
pub trait DisplayBackend {
    /// Writable back buffer for the frame about to be rendered.
    fn back_buffer(&mut self) -> &mut [u8];

    /// Queue the just-filled back buffer for display and swap sides
    /// (when swapping is enabled).
    fn present(&mut self);

    /// Enable or disable buffer swapping. While disabled, the last
    /// displayed frame stays on screen.
    fn set_swap_enabled(&mut self, enabled: bool);

    /// The physical side most recently blitted to the screen. Because of
    /// pipeline latency this is not necessarily the side most recently
    /// passed to [`DisplayBackend::present`].
    fn last_blitted_side(&self) -> BufferSide;

    /// Read access to one physical side's pixels.
    fn side_pixels(&self, side: BufferSide) -> &[u8];

    /// Display brightness on a 0..=10 scale.
    fn set_brightness(&mut self, level: u8);

    // Overlay composition primitives (menu rendering).

    /// Fill the overlay composition buffer with a solid color.
    fn clear(&mut self, color: Color);

    /// Blend a full frame of RGB565 pixels into the overlay buffer at the
    /// given opacity (0 = invisible, 255 = opaque).
    fn blit_blended(&mut self, pixels: &[u8], alpha: u8);

    /// Fill an axis-aligned rectangle, clipped to the screen.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color);

    /// Draw a text string at the given position.
    fn draw_text(&mut self, text: &str, x: u32, y: u32, fg: Color, bg: Color);

    /// Width in pixels `text` would occupy when drawn.
    fn text_width(&self, text: &str) -> u32;

    /// Push the overlay composition buffer to the screen immediately.
    fn refresh(&mut self);
}

/// Host input subsystem: raw button state, sampled once per iteration.
pub trait InputSource {
    /// Sample the hardware. Must be called exactly once per loop iteration
    /// before any `held`/`pressed` query.
    fn poll(&mut self);

    /// Whether `button` is currently held down.
    fn held(&self, button: Button) -> bool;

    /// Whether `button` went down since the previous [`InputSource::poll`]
    /// (edge, not level). Used only for menu navigation.
    fn pressed(&self, button: Button) -> bool;

    /// Whether the host asked the application to close (window close on a
    /// desktop host). Never true on the actual handheld.
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Persistence for numbered save-state slots.
pub trait StateStore {
    fn save(&mut self, slot: u8, data: &[u8]) -> std::io::Result<()>;
    fn load(&mut self, slot: u8) -> std::io::Result<Vec<u8>>;
}
