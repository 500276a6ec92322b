//! Built-in test-pattern core.
//!
//! Not an emulator: a minimal console that exercises every shell seam.
//! It scrolls a gradient keyed off the ROM bytes, moves a sprite with the
//! pad, hums through the audio sink while A is held, and round-trips its
//! whole state through save/load. Useful for smoke-running the frontend
//! without ROMs and as the live core in integration tests.

use lantern_core::core::console::{
    Console, ConsoleError, FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use lantern_core::core::host::AudioSink;
use lantern_core::shell::input::PadState;

use crate::registry::CoreEntry;

/// Stereo sample frames produced per video frame (44 100 Hz / 60).
const SAMPLES_PER_FRAME: usize = 735;

const SPRITE_SIZE: i32 = 16;
const SPRITE_SPEED: i32 = 2;

const STATE_VERSION: u8 = 1;
const STATE_LEN: usize = 1 + 2 + 8 + 4 + 4 + 4;

pub struct TestPatternCore {
    pad: PadState,
    frame: u64,
    sprite_x: i32,
    sprite_y: i32,
    tone_phase: u32,
    seed: u16,
}

impl TestPatternCore {
    pub fn new() -> Self {
        Self {
            pad: PadState::default(),
            frame: 0,
            sprite_x: (SCREEN_WIDTH as i32 - SPRITE_SIZE) / 2,
            sprite_y: (SCREEN_HEIGHT as i32 - SPRITE_SIZE) / 2,
            tone_phase: 0,
            seed: 0,
        }
    }

    fn step_sprite(&mut self) {
        if self.pad.contains(PadState::LEFT) {
            self.sprite_x -= SPRITE_SPEED;
        }
        if self.pad.contains(PadState::RIGHT) {
            self.sprite_x += SPRITE_SPEED;
        }
        if self.pad.contains(PadState::UP) {
            self.sprite_y -= SPRITE_SPEED;
        }
        if self.pad.contains(PadState::DOWN) {
            self.sprite_y += SPRITE_SPEED;
        }
        self.sprite_x = self.sprite_x.clamp(0, SCREEN_WIDTH as i32 - SPRITE_SIZE);
        self.sprite_y = self.sprite_y.clamp(0, SCREEN_HEIGHT as i32 - SPRITE_SIZE);
    }

    fn draw(&self, frame: &mut [u8]) {
        let scroll = (self.frame & 0xFF) as u32;
        for y in 0..SCREEN_HEIGHT as u32 {
            // Gradient banded by row, hue shifted by the ROM seed.
            let shade = ((y + scroll) & 0x1F) as u16;
            let color = (shade << 11) | (((shade * 2) ^ self.seed & 0x3F) << 5) | (31 - shade);
            for x in 0..SCREEN_WIDTH as u32 {
                put_pixel(frame, x, y, color);
            }
        }
        for dy in 0..SPRITE_SIZE {
            for dx in 0..SPRITE_SIZE {
                put_pixel(
                    frame,
                    (self.sprite_x + dx) as u32,
                    (self.sprite_y + dy) as u32,
                    0xFFFF,
                );
            }
        }
    }

    fn push_audio(&mut self, audio: &mut dyn AudioSink) {
        let mut block = [0i16; SAMPLES_PER_FRAME * 2];
        if self.pad.contains(PadState::A) {
            // 441 Hz square wave: 50 stereo frames per period at 44.1 kHz.
            for pair in block.chunks_exact_mut(2) {
                let level = if (self.tone_phase / 50) % 2 == 0 { 3000 } else { -3000 };
                pair[0] = level;
                pair[1] = level;
                self.tone_phase += 1;
            }
        } else {
            self.tone_phase = 0;
        }
        audio.push_samples(&block);
    }
}

impl Default for TestPatternCore {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TestPatternCore {
    fn load_rom(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        if data.is_empty() {
            return Err(ConsoleError::BadRom("empty ROM image".into()));
        }
        self.seed = data
            .iter()
            .fold(0u16, |acc, &b| acc.rotate_left(3) ^ b as u16);
        Ok(())
    }

    fn run_frame(&mut self, video: Option<&mut [u8]>, audio: &mut dyn AudioSink) {
        self.step_sprite();
        if let Some(frame) = video {
            debug_assert!(frame.len() >= FRAME_BYTES);
            self.draw(frame);
        }
        self.push_audio(audio);
        self.frame += 1;
    }

    fn set_pad(&mut self, pad: PadState) {
        self.pad = pad;
    }

    fn reset(&mut self, _hard: bool) {
        let seed = self.seed;
        *self = Self::new();
        self.seed = seed;
    }

    fn save_state(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(STATE_LEN);
        data.push(STATE_VERSION);
        data.extend_from_slice(&self.seed.to_le_bytes());
        data.extend_from_slice(&self.frame.to_le_bytes());
        data.extend_from_slice(&self.sprite_x.to_le_bytes());
        data.extend_from_slice(&self.sprite_y.to_le_bytes());
        data.extend_from_slice(&self.tone_phase.to_le_bytes());
        data
    }

    fn load_state(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        if data.len() != STATE_LEN {
            return Err(ConsoleError::BadState(format!(
                "expected {STATE_LEN} bytes, got {}",
                data.len()
            )));
        }
        if data[0] != STATE_VERSION {
            return Err(ConsoleError::BadState(format!(
                "unknown state version {}",
                data[0]
            )));
        }
        self.seed = u16::from_le_bytes(data[1..3].try_into().unwrap());
        self.frame = u64::from_le_bytes(data[3..11].try_into().unwrap());
        self.sprite_x = i32::from_le_bytes(data[11..15].try_into().unwrap());
        self.sprite_y = i32::from_le_bytes(data[15..19].try_into().unwrap());
        self.tone_phase = u32::from_le_bytes(data[19..23].try_into().unwrap());
        Ok(())
    }
}

fn put_pixel(frame: &mut [u8], x: u32, y: u32, color: u16) {
    let offset = (y as usize * SCREEN_WIDTH + x as usize) * 2;
    frame[offset..offset + 2].copy_from_slice(&color.to_le_bytes());
}

fn create() -> Box<dyn Console> {
    Box::new(TestPatternCore::new())
}

inventory::submit! {
    CoreEntry::new("test-pattern", &["rom", "bin"], create)
}
