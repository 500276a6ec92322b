//! SDL2 implementation of [`InputSource`]: keyboard state sampled once
//! per loop iteration, with held and edge-triggered views.

use lantern_core::core::host::InputSource;
use lantern_core::shell::input::Button;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::EventPump;

pub struct SdlInput {
    pump: EventPump,
    held: [bool; Button::COUNT],
    pressed: [bool; Button::COUNT],
    quit: bool,
}

impl SdlInput {
    pub fn new(sdl: &sdl2::Sdl) -> Self {
        Self {
            pump: sdl.event_pump().expect("Failed to create event pump"),
            held: [false; Button::COUNT],
            pressed: [false; Button::COUNT],
            quit: false,
        }
    }
}

fn bind(scancode: Scancode) -> Option<Button> {
    match scancode {
        Scancode::Up => Some(Button::Up),
        Scancode::Down => Some(Button::Down),
        Scancode::Left => Some(Button::Left),
        Scancode::Right => Some(Button::Right),
        Scancode::Z => Some(Button::A),
        Scancode::X => Some(Button::B),
        Scancode::Return => Some(Button::Start),
        Scancode::RShift => Some(Button::Select),
        Scancode::Escape => Some(Button::Menu),
        _ => None,
    }
}

impl InputSource for SdlInput {
    fn poll(&mut self) {
        self.pressed = [false; Button::COUNT];
        for event in self.pump.poll_iter() {
            match event {
                Event::Quit { .. } => self.quit = true,
                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(button) = bind(sc) {
                        self.held[button as usize] = true;
                        self.pressed[button as usize] = true;
                    }
                }
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button) = bind(sc) {
                        self.held[button as usize] = false;
                    }
                }
                _ => {}
            }
        }
    }

    fn held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    fn pressed(&self, button: Button) -> bool {
        self.pressed[button as usize]
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
