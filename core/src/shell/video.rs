//! Double-buffer coordination and the pause snapshot.

use crate::core::console::FRAME_BYTES;
use crate::core::host::DisplayBackend;
use crate::shell::menu::{self, MenuStateMachine, Settings};

/// Hands the console a writable back buffer, triggers swaps, and freezes
/// presentation around the pause snapshot.
///
/// The snapshot buffer holds exactly one screen of pixels, is written only
/// when entering the menu, and stays valid until the next [`pause`] call.
///
/// [`pause`]: DoubleBufferCoordinator::pause
pub struct DoubleBufferCoordinator {
    display: Box<dyn DisplayBackend>,
    snapshot: Vec<u8>,
    paused: bool,
}

impl DoubleBufferCoordinator {
    pub fn new(display: Box<dyn DisplayBackend>) -> Self {
        Self {
            display,
            snapshot: vec![0; FRAME_BYTES],
            paused: false,
        }
    }

    /// The buffer the console should draw this frame into. Must be fetched
    /// before every rendered frame; the side it refers to changes on swap.
    pub fn acquire_back_buffer(&mut self) -> &mut [u8] {
        self.display.back_buffer()
    }

    /// Queue the just-filled back buffer for display and swap.
    pub fn present_frame(&mut self) {
        self.display.present();
    }

    /// Capture the currently displayed frame into the pause snapshot, then
    /// stop buffer swapping so it stays on screen beneath the overlay.
    ///
    /// The most recently *presented* side is not necessarily the one on
    /// screen yet, so the display is asked which physical side was last
    /// blitted instead of assuming one.
    pub fn pause(&mut self) {
        let side = self.display.last_blitted_side();
        self.snapshot.copy_from_slice(self.display.side_pixels(side));
        self.display.set_swap_enabled(false);
        self.paused = true;
    }

    /// Re-enable buffer swapping. The snapshot is left untouched.
    pub fn resume(&mut self) {
        self.display.set_swap_enabled(true);
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    pub fn display_mut(&mut self) -> &mut dyn DisplayBackend {
        self.display.as_mut()
    }

    /// Compose and push the menu overlay over the held snapshot.
    pub fn draw_menu(&mut self, menu: &MenuStateMachine, settings: &Settings) {
        let Self {
            display, snapshot, ..
        } = self;
        menu::render_menu(display.as_mut(), menu, snapshot, settings);
    }
}
