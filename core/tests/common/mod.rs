#![allow(dead_code)]

//! Mock collaborators for exercising the shell without a live backend.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use lantern_core::core::console::{Console, ConsoleError, FRAME_BYTES};
use lantern_core::core::host::{
    AudioOut, AudioSink, BufferSide, Color, DisplayBackend, InputSource, StateStore,
};
use lantern_core::shell::input::{Button, PadState};

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DisplayStats {
    pub presents: u32,
    pub swap_disables: u32,
    pub swap_enables: u32,
    pub refreshes: u32,
    pub clears: u32,
    pub brightness: u8,
    /// First byte of the most recent blended blit (the pause snapshot).
    pub blended_first_byte: Option<u8>,
}

/// Double-buffered display with two in-memory sides and shared counters.
pub struct MockDisplay {
    sides: [Vec<u8>; 2],
    back: usize,
    last_blitted: usize,
    swap_enabled: bool,
    pub stats: Rc<RefCell<DisplayStats>>,
}

impl MockDisplay {
    pub fn new(stats: Rc<RefCell<DisplayStats>>) -> Self {
        Self {
            sides: [vec![0; FRAME_BYTES], vec![0; FRAME_BYTES]],
            back: 0,
            last_blitted: 0,
            swap_enabled: true,
            stats,
        }
    }
}

impl DisplayBackend for MockDisplay {
    fn back_buffer(&mut self) -> &mut [u8] {
        &mut self.sides[self.back]
    }

    fn present(&mut self) {
        self.stats.borrow_mut().presents += 1;
        if self.swap_enabled {
            self.last_blitted = self.back;
            self.back ^= 1;
        }
    }

    fn set_swap_enabled(&mut self, enabled: bool) {
        let mut stats = self.stats.borrow_mut();
        if enabled {
            stats.swap_enables += 1;
        } else {
            stats.swap_disables += 1;
        }
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
        self.stats.borrow_mut().brightness = level;
    }

    fn clear(&mut self, _color: Color) {
        self.stats.borrow_mut().clears += 1;
    }

    fn blit_blended(&mut self, pixels: &[u8], _alpha: u8) {
        self.stats.borrow_mut().blended_first_byte = pixels.first().copied();
    }

    fn fill_rect(&mut self, _x: u32, _y: u32, _w: u32, _h: u32, _color: Color) {}

    fn draw_text(&mut self, _text: &str, _x: u32, _y: u32, _fg: Color, _bg: Color) {}

    fn text_width(&self, text: &str) -> u32 {
        text.len() as u32 * 10
    }

    fn refresh(&mut self) {
        self.stats.borrow_mut().refreshes += 1;
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InputFrame {
    pub held: Vec<Button>,
    pub pressed: Vec<Button>,
}

pub fn idle() -> InputFrame {
    InputFrame::default()
}

pub fn press(button: Button) -> InputFrame {
    InputFrame {
        held: vec![],
        pressed: vec![button],
    }
}

pub fn hold(buttons: &[Button]) -> InputFrame {
    InputFrame {
        held: buttons.to_vec(),
        pressed: vec![],
    }
}

/// Plays back one scripted [`InputFrame`] per poll; once the script runs
/// out it reports a host close request so sessions always terminate.
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    current: InputFrame,
    exhausted: bool,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self {
            frames: frames.into(),
            current: InputFrame::default(),
            exhausted: false,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) {
        match self.frames.pop_front() {
            Some(frame) => self.current = frame,
            None => {
                self.current = InputFrame::default();
                self.exhausted = true;
            }
        }
    }

    fn held(&self, button: Button) -> bool {
        self.current.held.contains(&button)
    }

    fn pressed(&self, button: Button) -> bool {
        self.current.pressed.contains(&button)
    }

    fn quit_requested(&self) -> bool {
        self.exhausted
    }
}

/// Single-shot edge input for driving the menu state machine directly.
pub struct EdgeInput {
    pub pressed: Vec<Button>,
}

impl EdgeInput {
    pub fn new(pressed: &[Button]) -> Self {
        Self {
            pressed: pressed.to_vec(),
        }
    }
}

impl InputSource for EdgeInput {
    fn poll(&mut self) {}

    fn held(&self, _button: Button) -> bool {
        false
    }

    fn pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ConsoleLog {
    /// Render flag of every executed frame, in order.
    pub rendered: Vec<bool>,
    pub pads: Vec<u8>,
    pub resets: Vec<bool>,
    pub saves: u32,
    pub loads: u32,
}

/// Records every call; fills rendered frames with `fill` so tests can trace
/// pixels through the snapshot path.
pub struct MockConsole {
    pub log: Rc<RefCell<ConsoleLog>>,
    pub fill: u8,
}

impl MockConsole {
    pub fn new(log: Rc<RefCell<ConsoleLog>>, fill: u8) -> Self {
        Self { log, fill }
    }
}

impl Console for MockConsole {
    fn load_rom(&mut self, _data: &[u8]) -> Result<(), ConsoleError> {
        Ok(())
    }

    fn run_frame(&mut self, video: Option<&mut [u8]>, audio: &mut dyn AudioSink) {
        self.log.borrow_mut().rendered.push(video.is_some());
        if let Some(frame) = video {
            frame.fill(self.fill);
        }
        audio.push_samples(&[0; 64]);
    }

    fn set_pad(&mut self, pad: PadState) {
        self.log.borrow_mut().pads.push(pad.bits());
    }

    fn reset(&mut self, hard: bool) {
        self.log.borrow_mut().resets.push(hard);
    }

    fn save_state(&self) -> Vec<u8> {
        self.log.borrow_mut().saves += 1;
        vec![0xAA, 0xBB]
    }

    fn load_state(&mut self, _data: &[u8]) -> Result<(), ConsoleError> {
        self.log.borrow_mut().loads += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Audio out
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AudioLog {
    pub samples: usize,
    pub volume: u8,
}

pub struct MockAudioOut {
    pub log: Rc<RefCell<AudioLog>>,
}

impl AudioOut for MockAudioOut {
    fn queue_stereo_blocking(&mut self, samples: &[i16]) {
        self.log.borrow_mut().samples += samples.len();
    }

    fn set_volume(&mut self, level: u8) {
        self.log.borrow_mut().volume = level;
    }
}

// ---------------------------------------------------------------------------
// State store
// ---------------------------------------------------------------------------

pub struct MockStore {
    pub slots: Rc<RefCell<HashMap<u8, Vec<u8>>>>,
}

impl StateStore for MockStore {
    fn save(&mut self, slot: u8, data: &[u8]) -> std::io::Result<()> {
        self.slots.borrow_mut().insert(slot, data.to_vec());
        Ok(())
    }

    fn load(&mut self, slot: u8) -> std::io::Result<Vec<u8>> {
        self.slots
            .borrow()
            .get(&slot)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "empty slot"))
    }
}
