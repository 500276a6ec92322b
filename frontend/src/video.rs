//! SDL2 implementation of [`DisplayBackend`]: two RGB565 side buffers
//! mirroring the handheld's double-buffered panel, plus an overlay
//! composition buffer the menu is drawn into.

use lantern_core::core::console::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};
use lantern_core::core::host::{BufferSide, Color, DisplayBackend};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::font;

pub struct SdlDisplay {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    sides: [Vec<u8>; 2],
    back: usize,
    last_blitted: usize,
    swap_enabled: bool,
    compose: Vec<u8>,
    brightness: u8,
}

impl SdlDisplay {
    /// Create an SDL window and renderer at the panel's native resolution.
    pub fn new(sdl_video: &sdl2::VideoSubsystem, title: &str, scale: u32) -> Self {
        let window = sdl_video
            .window(
                title,
                SCREEN_WIDTH as u32 * scale,
                SCREEN_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .expect("Failed to create window");

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .expect("Failed to create canvas");

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            sides: [vec![0; FRAME_BYTES], vec![0; FRAME_BYTES]],
            back: 0,
            last_blitted: 0,
            swap_enabled: true,
            compose: vec![0; FRAME_BYTES],
            brightness: 10,
        }
    }

    /// Upload an RGB565 framebuffer to a streaming texture and present it.
    fn upload(&mut self, pixels: &[u8]) {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB565,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
            )
            .expect("Failed to create texture");

        let pitch = SCREEN_WIDTH * 2;
        if self.brightness >= 10 {
            texture
                .update(None, pixels, pitch)
                .expect("Failed to update texture");
        } else {
            let dimmed = dim_rgb565(pixels, self.brightness);
            texture
                .update(None, &dimmed, pitch)
                .expect("Failed to update texture");
        }

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}

impl DisplayBackend for SdlDisplay {
    fn back_buffer(&mut self) -> &mut [u8] {
        &mut self.sides[self.back]
    }

    fn present(&mut self) {
        if !self.swap_enabled {
            return;
        }
        let pixels = self.sides[self.back].clone();
        self.upload(&pixels);
        self.last_blitted = self.back;
        self.back ^= 1;
    }

    fn set_swap_enabled(&mut self, enabled: bool) {
        self.swap_enabled = enabled;
    }

    fn last_blitted_side(&self) -> BufferSide {
        if self.last_blitted == 0 {
            BufferSide::A
        } else {
            BufferSide::B
        }
    }

    fn side_pixels(&self, side: BufferSide) -> &[u8] {
        match side {
            BufferSide::A => &self.sides[0],
            BufferSide::B => &self.sides[1],
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(10);
    }

    fn clear(&mut self, color: Color) {
        let bytes = color.to_le_bytes();
        for px in self.compose.chunks_exact_mut(2) {
            px.copy_from_slice(&bytes);
        }
    }

    fn blit_blended(&mut self, pixels: &[u8], alpha: u8) {
        for (dst, src) in self
            .compose
            .chunks_exact_mut(2)
            .zip(pixels.chunks_exact(2))
        {
            let d = u16::from_le_bytes([dst[0], dst[1]]);
            let s = u16::from_le_bytes([src[0], src[1]]);
            dst.copy_from_slice(&blend_rgb565(s, d, alpha).to_le_bytes());
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let bytes = color.to_le_bytes();
        let x1 = ((x + w) as usize).min(SCREEN_WIDTH);
        let y1 = ((y + h) as usize).min(SCREEN_HEIGHT);
        for py in y as usize..y1 {
            for px in x as usize..x1 {
                let offset = (py * SCREEN_WIDTH + px) * 2;
                self.compose[offset] = bytes[0];
                self.compose[offset + 1] = bytes[1];
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: u32, y: u32, fg: Color, bg: Color) {
        font::draw_text(&mut self.compose, text, x, y, fg, bg);
    }

    fn text_width(&self, text: &str) -> u32 {
        font::text_width(text)
    }

    fn refresh(&mut self) {
        let pixels = self.compose.clone();
        self.upload(&pixels);
    }
}

/// Source-over blend of two RGB565 pixels at the given opacity.
fn blend_rgb565(src: u16, dst: u16, alpha: u8) -> u16 {
    let a = alpha as u32;
    let inv = 255 - a;

    let sr = (src >> 11) as u32 & 0x1F;
    let sg = (src >> 5) as u32 & 0x3F;
    let sb = src as u32 & 0x1F;
    let dr = (dst >> 11) as u32 & 0x1F;
    let dg = (dst >> 5) as u32 & 0x3F;
    let db = dst as u32 & 0x1F;

    let r = (sr * a + dr * inv) / 255;
    let g = (sg * a + dg * inv) / 255;
    let b = (sb * a + db * inv) / 255;
    ((r << 11) | (g << 5) | b) as u16
}

/// Scale every channel of an RGB565 buffer by `level / 10`.
fn dim_rgb565(pixels: &[u8], level: u8) -> Vec<u8> {
    let level = level.min(10) as u32;
    let mut out = Vec::with_capacity(pixels.len());
    for px in pixels.chunks_exact(2) {
        let v = u16::from_le_bytes([px[0], px[1]]);
        let r = ((v >> 11) as u32 & 0x1F) * level / 10;
        let g = ((v >> 5) as u32 & 0x3F) * level / 10;
        let b = (v as u32 & 0x1F) * level / 10;
        let dimmed = ((r << 11) | (g << 5) | b) as u16;
        out.extend_from_slice(&dimmed.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_full_alpha_keeps_source() {
        assert_eq!(blend_rgb565(0xFFFF, 0x0000, 255), 0xFFFF);
    }

    #[test]
    fn blend_zero_alpha_keeps_destination() {
        assert_eq!(blend_rgb565(0xFFFF, 0x1234, 0), 0x1234);
    }

    #[test]
    fn blend_mid_alpha_lands_between() {
        let out = blend_rgb565(0xFFFF, 0x0000, 128);
        let r = out >> 11 & 0x1F;
        assert!(r > 0x08 && r < 0x18, "r = {r}");
    }

    #[test]
    fn dim_full_brightness_is_identity() {
        let pixels = [0x34, 0x12, 0xFF, 0xFF];
        assert_eq!(dim_rgb565(&pixels, 10), pixels);
    }

    #[test]
    fn dim_zero_brightness_is_black() {
        let pixels = [0xFF, 0xFF, 0x34, 0x12];
        assert_eq!(dim_rgb565(&pixels, 0), [0, 0, 0, 0]);
    }
}
