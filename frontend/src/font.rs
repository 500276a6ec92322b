//! Minimal 4x5 bitmap font for menu and overlay text, drawn at 2x scale
//! onto an RGB565 framebuffer. Each glyph is 4 pixels wide, 5 rows tall.
//! Bits are MSB-left within each u8 (only top 4 bits used).

use lantern_core::core::console::SCREEN_WIDTH;
use lantern_core::core::host::Color;

const GLYPHS: &[(&[u8; 5], u8)] = &[
    // '0'
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'0'),
    // '1'
    (&[0x20, 0x60, 0x20, 0x20, 0x70], b'1'),
    // '2'
    (&[0x60, 0x90, 0x20, 0x40, 0xF0], b'2'),
    // '3'
    (&[0x60, 0x90, 0x20, 0x90, 0x60], b'3'),
    // '4'
    (&[0x90, 0x90, 0xF0, 0x10, 0x10], b'4'),
    // '5'
    (&[0xF0, 0x80, 0xE0, 0x10, 0xE0], b'5'),
    // '6'
    (&[0x60, 0x80, 0xE0, 0x90, 0x60], b'6'),
    // '7'
    (&[0xF0, 0x10, 0x20, 0x40, 0x40], b'7'),
    // '8'
    (&[0x60, 0x90, 0x60, 0x90, 0x60], b'8'),
    // '9'
    (&[0x60, 0x90, 0x70, 0x10, 0x60], b'9'),
    // 'A'
    (&[0x60, 0x90, 0xF0, 0x90, 0x90], b'A'),
    // 'B'
    (&[0xE0, 0x90, 0xE0, 0x90, 0xE0], b'B'),
    // 'C'
    (&[0x70, 0x80, 0x80, 0x80, 0x70], b'C'),
    // 'D'
    (&[0xE0, 0x90, 0x90, 0x90, 0xE0], b'D'),
    // 'E'
    (&[0xF0, 0x80, 0xE0, 0x80, 0xF0], b'E'),
    // 'F'
    (&[0xF0, 0x80, 0xE0, 0x80, 0x80], b'F'),
    // 'G'
    (&[0x70, 0x80, 0xB0, 0x90, 0x70], b'G'),
    // 'H'
    (&[0x90, 0x90, 0xF0, 0x90, 0x90], b'H'),
    // 'I'
    (&[0x70, 0x20, 0x20, 0x20, 0x70], b'I'),
    // 'J'
    (&[0x10, 0x10, 0x10, 0x90, 0x60], b'J'),
    // 'K'
    (&[0x90, 0xA0, 0xC0, 0xA0, 0x90], b'K'),
    // 'L'
    (&[0x80, 0x80, 0x80, 0x80, 0xF0], b'L'),
    // 'M'
    (&[0x90, 0xF0, 0xF0, 0x90, 0x90], b'M'),
    // 'N'
    (&[0x90, 0xD0, 0xB0, 0x90, 0x90], b'N'),
    // 'O'
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'O'),
    // 'P'
    (&[0xE0, 0x90, 0xE0, 0x80, 0x80], b'P'),
    // 'Q'
    (&[0x60, 0x90, 0x90, 0xA0, 0x50], b'Q'),
    // 'R'
    (&[0xE0, 0x90, 0xE0, 0xA0, 0x90], b'R'),
    // 'S'
    (&[0x70, 0x80, 0x60, 0x10, 0xE0], b'S'),
    // 'T'
    (&[0x70, 0x20, 0x20, 0x20, 0x20], b'T'),
    // 'U'
    (&[0x90, 0x90, 0x90, 0x90, 0x60], b'U'),
    // 'V'
    (&[0x90, 0x90, 0x90, 0x60, 0x60], b'V'),
    // 'W'
    (&[0x90, 0x90, 0xF0, 0xF0, 0x90], b'W'),
    // 'X'
    (&[0x90, 0x90, 0x60, 0x90, 0x90], b'X'),
    // 'Y'
    (&[0x50, 0x50, 0x20, 0x20, 0x20], b'Y'),
    // 'Z'
    (&[0xF0, 0x10, 0x20, 0x40, 0xF0], b'Z'),
    // '%'
    (&[0x90, 0x20, 0x40, 0x80, 0x90], b'%'),
    // '&'
    (&[0x60, 0x90, 0x60, 0xA0, 0x50], b'&'),
    // '-'
    (&[0x00, 0x00, 0xE0, 0x00, 0x00], b'-'),
    // '.'
    (&[0x00, 0x00, 0x00, 0x00, 0x40], b'.'),
    // ' '
    (&[0x00, 0x00, 0x00, 0x00, 0x00], b' '),
];

const GLYPH_W: usize = 4;
const GLYPH_H: usize = 5;
const SCALE: usize = 2;

/// Horizontal advance per character in framebuffer pixels.
pub const ADVANCE: u32 = ((GLYPH_W + 1) * SCALE) as u32;

fn glyph_for(ch: u8) -> &'static [u8; 5] {
    let ch = ch.to_ascii_uppercase();
    for &(data, c) in GLYPHS {
        if c == ch {
            return data;
        }
    }
    // fallback: space
    &[0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Pixel width of `text` when drawn with [`draw_text`].
pub fn text_width(text: &str) -> u32 {
    text.len() as u32 * ADVANCE
}

/// Draw a text string onto a 240-wide RGB565 framebuffer. Each character
/// cell is painted `bg` first so text reads cleanly over blended pixels.
pub fn draw_text(buffer: &mut [u8], text: &str, x: u32, y: u32, fg: Color, bg: Color) {
    for (ci, ch) in text.bytes().enumerate() {
        let glyph = glyph_for(ch);
        let gx = x as usize + ci * (GLYPH_W + 1) * SCALE;

        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..=GLYPH_W {
                let px = gx + col * SCALE;
                let py = y as usize + row * SCALE;
                let lit = col < GLYPH_W && bits & (0x80 >> col) != 0;
                fill_cell(buffer, px, py, if lit { fg } else { bg });
            }
        }
    }
}

/// Paint one SCALE x SCALE pixel cell, clipped to the framebuffer.
fn fill_cell(buffer: &mut [u8], x: usize, y: usize, color: Color) {
    let bytes = color.to_le_bytes();
    for dy in 0..SCALE {
        for dx in 0..SCALE {
            let offset = ((y + dy) * SCREEN_WIDTH + x + dx) * 2;
            if offset + 1 < buffer.len() {
                buffer[offset] = bytes[0];
                buffer[offset + 1] = bytes[1];
            }
        }
    }
}

/// Glyph cell height in framebuffer pixels.
pub const fn text_height() -> u32 {
    (GLYPH_H * SCALE) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::core::console::FRAME_BYTES;
    use lantern_core::core::host::{COLOR_BLACK, COLOR_WHITE};

    #[test]
    fn text_width_counts_advance_per_char() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("QUIT"), 4 * ADVANCE);
    }

    #[test]
    fn draw_text_sets_pixels_in_buffer() {
        let mut buffer = vec![0u8; FRAME_BYTES];
        draw_text(&mut buffer, "8", 10, 10, COLOR_WHITE, COLOR_BLACK);
        assert!(buffer.iter().any(|&b| b != 0));
    }

    #[test]
    fn lowercase_maps_to_uppercase_glyphs() {
        let mut upper = vec![0u8; FRAME_BYTES];
        let mut lower = vec![0u8; FRAME_BYTES];
        draw_text(&mut upper, "QUIT", 10, 10, COLOR_WHITE, COLOR_BLACK);
        draw_text(&mut lower, "quit", 10, 10, COLOR_WHITE, COLOR_BLACK);
        assert_eq!(upper, lower);
    }

    #[test]
    fn draw_clips_at_framebuffer_edge() {
        let mut buffer = vec![0u8; FRAME_BYTES];
        // Bottom-right corner; must not panic.
        draw_text(&mut buffer, "888", 235, 235, COLOR_WHITE, COLOR_BLACK);
    }
}
