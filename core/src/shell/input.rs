//! Controller state: pad bitmask construction and change detection.

use crate::core::host::InputSource;

/// Logical buttons of the handheld.
///
/// `Select` and `Start` are the two system buttons mapped onto the emulated
/// SELECT/START lines; `Menu` is the host-level button that opens the
/// context menu and never reaches the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Select,
    Start,
    Menu,
}

impl Button {
    pub const COUNT: usize = 9;
}

/// Bitmask of the emulated controller's currently-held buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadState(u8);

impl PadState {
    pub const RIGHT: u8 = 0x01;
    pub const LEFT: u8 = 0x02;
    pub const UP: u8 = 0x04;
    pub const DOWN: u8 = 0x08;
    pub const A: u8 = 0x10;
    pub const B: u8 = 0x20;
    pub const SELECT: u8 = 0x40;
    pub const START: u8 = 0x80;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }
}

/// Rebuilds the pad mask from held-button state every iteration and reports
/// it only when it changed, since pushing it to the console is assumed to
/// be a non-trivial call.
#[derive(Default)]
pub struct InputMapper {
    last: PadState,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample held buttons and return the new pad mask if it differs from
    /// the previously reported one.
    pub fn sample(&mut self, input: &dyn InputSource) -> Option<PadState> {
        let mut bits = 0u8;
        bits |= if input.held(Button::Right) { PadState::RIGHT } else { 0 };
        bits |= if input.held(Button::Left) { PadState::LEFT } else { 0 };
        bits |= if input.held(Button::Up) { PadState::UP } else { 0 };
        bits |= if input.held(Button::Down) { PadState::DOWN } else { 0 };
        bits |= if input.held(Button::A) { PadState::A } else { 0 };
        bits |= if input.held(Button::B) { PadState::B } else { 0 };
        bits |= if input.held(Button::Select) { PadState::SELECT } else { 0 };
        bits |= if input.held(Button::Start) { PadState::START } else { 0 };

        let pad = PadState(bits);
        if pad != self.last {
            self.last = pad;
            Some(pad)
        } else {
            None
        }
    }

    /// The most recently reported pad mask.
    pub fn current(&self) -> PadState {
        self.last
    }
}
