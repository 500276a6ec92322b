//! The pause/context-menu state machine and its overlay rendering.

use crate::core::host::{
    COLOR_BLACK, COLOR_GREY, COLOR_NAVY, COLOR_WHITE, DisplayBackend, InputSource,
};
use crate::shell::input::Button;

pub const MENU_ROWS: usize = 5;

/// Upper bound of the volume and brightness scales.
pub const MAX_LEVEL: u8 = 10;

/// Highest selectable save-state slot.
pub const MAX_STATE_SLOT: u8 = 9;

/// Names shown for the palette option. Cycling is recognized by the state
/// machine but not yet wired to any core.
pub const PALETTE_NAMES: [&str; 4] = ["Classic", "Pocket", "Light", "Inverted"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Save,
    Load,
    Restart,
    Options,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOption {
    Volume,
    Brightness,
    Palette,
    StateSlot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntryKind {
    Action(MenuAction),
    Option(MenuOption),
    Blank,
}

pub struct MenuEntry {
    pub label: &'static str,
    pub enabled: bool,
    pub kind: MenuEntryKind,
}

/// Root context-menu rows, in display order. Immutable for the process
/// lifetime; confirm dispatch goes through the entry kind, not the index.
pub const CONTEXT_ENTRIES: [MenuEntry; MENU_ROWS] = [
    MenuEntry { label: "Save & Continue", enabled: true, kind: MenuEntryKind::Action(MenuAction::Save) },
    MenuEntry { label: "Load Game", enabled: true, kind: MenuEntryKind::Action(MenuAction::Load) },
    MenuEntry { label: "Restart", enabled: true, kind: MenuEntryKind::Action(MenuAction::Restart) },
    MenuEntry { label: "Options", enabled: true, kind: MenuEntryKind::Action(MenuAction::Options) },
    MenuEntry { label: "Quit", enabled: true, kind: MenuEntryKind::Action(MenuAction::Quit) },
];

/// Options-submenu rows. The last row is a disabled placeholder so both
/// tables share the same height and cursor range.
pub const OPTION_ENTRIES: [MenuEntry; MENU_ROWS] = [
    MenuEntry { label: "Volume", enabled: true, kind: MenuEntryKind::Option(MenuOption::Volume) },
    MenuEntry { label: "Brightness", enabled: true, kind: MenuEntryKind::Option(MenuOption::Brightness) },
    MenuEntry { label: "Palette", enabled: true, kind: MenuEntryKind::Option(MenuOption::Palette) },
    MenuEntry { label: "State Slot", enabled: true, kind: MenuEntryKind::Option(MenuOption::StateSlot) },
    MenuEntry { label: "", enabled: false, kind: MenuEntryKind::Blank },
];

/// User-adjustable session settings, owned by the session and persisted by
/// the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Output volume, 0..=10.
    pub volume: u8,
    /// Display brightness, 0..=10.
    pub brightness: u8,
    /// Index into [`PALETTE_NAMES`].
    pub palette: usize,
    /// Save-state slot, 0..=9.
    pub state_slot: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 8,
            brightness: MAX_LEVEL,
            palette: 0,
            state_slot: 0,
        }
    }
}

/// Application-level UI state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiState {
    Running,
    ContextMenu,
}

/// What the session should do when leaving the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeAction {
    /// Plain resume, no console interaction (cancel, Save-as-no-op paths).
    Continue,
    /// Serialize the console and write the current slot, then resume.
    SaveState,
    /// Read the current slot into the console, then resume.
    LoadState,
    /// Hard-reset the console, then resume.
    Restart,
}

/// Command emitted by one menu update for the session to apply. All side
/// effects on the scheduler, the buffer coordinator and the console happen
/// in the session; the state machine itself only tracks UI state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    None,
    /// Capture the pause snapshot, stop buffer swapping, show the menu.
    OpenMenu,
    /// Return to running. `resume_swap` is false in exactly one case:
    /// cancelling the root menu while the cursor sits on Quit.
    Resume {
        action: ResumeAction,
        resume_swap: bool,
    },
    /// Terminate the main loop. Buffer swapping stays paused.
    Quit,
}

/// Running / context-menu state machine.
///
/// The context menu and the options submenu share one cursor; it is never
/// reset, so re-entering the menu (or the submenu) finds the cursor where
/// it was left.
pub struct MenuStateMachine {
    state: UiState,
    in_options: bool,
    cursor: usize,
}

impl MenuStateMachine {
    pub fn new() -> Self {
        Self {
            state: UiState::Running,
            in_options: false,
            cursor: 0,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == UiState::ContextMenu
    }

    pub fn in_options(&self) -> bool {
        self.in_options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Consume this iteration's pressed edges and produce the command the
    /// session should apply. Total: every (state, input) pair maps to a
    /// command, possibly `None`.
    pub fn update(&mut self, input: &dyn InputSource, settings: &mut Settings) -> ShellCommand {
        match self.state {
            UiState::Running => {
                if input.pressed(Button::Menu) {
                    self.state = UiState::ContextMenu;
                    self.in_options = false;
                    ShellCommand::OpenMenu
                } else {
                    ShellCommand::None
                }
            }
            UiState::ContextMenu => self.update_menu(input, settings),
        }
    }

    fn update_menu(&mut self, input: &dyn InputSource, settings: &mut Settings) -> ShellCommand {
        if input.pressed(Button::B) {
            return self.cancel();
        }
        if input.pressed(Button::A) && !self.in_options {
            return self.confirm();
        }
        if input.pressed(Button::Down) {
            self.cursor = (self.cursor + 1) % MENU_ROWS;
        } else if input.pressed(Button::Up) {
            self.cursor = (self.cursor + MENU_ROWS - 1) % MENU_ROWS;
        } else if self.in_options && (input.pressed(Button::Right) || input.pressed(Button::Left)) {
            self.adjust(settings, input.pressed(Button::Right));
        }
        ShellCommand::None
    }

    /// One nesting level, not a stack: cancel leaves the options submenu
    /// first, and only a root-level cancel leaves the menu entirely.
    fn cancel(&mut self) -> ShellCommand {
        if self.in_options {
            self.in_options = false;
            return ShellCommand::None;
        }
        let resume_swap = !matches!(
            CONTEXT_ENTRIES[self.cursor].kind,
            MenuEntryKind::Action(MenuAction::Quit)
        );
        self.state = UiState::Running;
        ShellCommand::Resume {
            action: ResumeAction::Continue,
            resume_swap,
        }
    }

    fn confirm(&mut self) -> ShellCommand {
        match CONTEXT_ENTRIES[self.cursor].kind {
            MenuEntryKind::Action(MenuAction::Save) => {
                self.state = UiState::Running;
                ShellCommand::Resume {
                    action: ResumeAction::SaveState,
                    resume_swap: true,
                }
            }
            MenuEntryKind::Action(MenuAction::Load) => {
                self.state = UiState::Running;
                ShellCommand::Resume {
                    action: ResumeAction::LoadState,
                    resume_swap: true,
                }
            }
            MenuEntryKind::Action(MenuAction::Restart) => {
                self.state = UiState::Running;
                ShellCommand::Resume {
                    action: ResumeAction::Restart,
                    resume_swap: true,
                }
            }
            MenuEntryKind::Action(MenuAction::Options) => {
                self.in_options = true;
                ShellCommand::None
            }
            MenuEntryKind::Action(MenuAction::Quit) => ShellCommand::Quit,
            _ => ShellCommand::None,
        }
    }

    fn adjust(&mut self, settings: &mut Settings, increase: bool) {
        match OPTION_ENTRIES[self.cursor].kind {
            MenuEntryKind::Option(MenuOption::Volume) => {
                settings.volume = step(settings.volume, increase, MAX_LEVEL);
            }
            MenuEntryKind::Option(MenuOption::Brightness) => {
                settings.brightness = step(settings.brightness, increase, MAX_LEVEL);
            }
            MenuEntryKind::Option(MenuOption::StateSlot) => {
                settings.state_slot = step(settings.state_slot, increase, MAX_STATE_SLOT);
            }
            // Palette cycling is not wired to any core yet.
            MenuEntryKind::Option(MenuOption::Palette) => {}
            _ => {}
        }
    }
}

impl Default for MenuStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Step a 0..=max scale by one, clamped at both ends.
fn step(value: u8, increase: bool, max: u8) -> u8 {
    if increase {
        if value < max { value + 1 } else { max }
    } else {
        value.saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Overlay rendering
// ---------------------------------------------------------------------------

const PANEL_X: u32 = 40;
const PANEL_Y: u32 = 37;
const PANEL_W: u32 = 160;
const PANEL_H: u32 = 133;
const ROW_X: u32 = 50;
const ROW_W: u32 = 140;
const ROW_H: u32 = 20;
const ROW_PITCH: u32 = 22;
const TEXT_X: u32 = 60;
const TEXT_RIGHT: u32 = 190;
const FIRST_ROW_Y: u32 = 50;
const SNAPSHOT_ALPHA: u8 = 150;

/// Compose the menu overlay: dimmed pause snapshot, panel, highlight bar,
/// entry labels and, in the options submenu, right-aligned current values.
/// Pushed to the screen immediately; buffer swapping stays untouched.
pub fn render_menu(
    display: &mut dyn DisplayBackend,
    menu: &MenuStateMachine,
    snapshot: &[u8],
    settings: &Settings,
) {
    display.clear(COLOR_BLACK);
    display.blit_blended(snapshot, SNAPSHOT_ALPHA);
    display.fill_rect(PANEL_X, PANEL_Y, PANEL_W, PANEL_H, COLOR_NAVY);

    for row in 0..MENU_ROWS {
        let entry = if menu.in_options() {
            &OPTION_ENTRIES[row]
        } else {
            &CONTEXT_ENTRIES[row]
        };
        let selected = menu.cursor() == row;
        let mut fg = if selected { COLOR_NAVY } else { COLOR_WHITE };
        let bg = if selected { COLOR_WHITE } else { COLOR_NAVY };
        let y = FIRST_ROW_Y + row as u32 * ROW_PITCH;

        if selected {
            display.fill_rect(ROW_X, y, ROW_W, ROW_H, COLOR_WHITE);
        }
        if !entry.enabled {
            fg = COLOR_GREY;
        }
        display.draw_text(entry.label, TEXT_X, y + 5, fg, bg);

        if menu.in_options()
            && let Some(value) = option_value(entry, settings)
        {
            let width = display.text_width(&value);
            display.draw_text(&value, TEXT_RIGHT - width - 5, y + 5, fg, bg);
        }
    }

    display.refresh();
}

fn option_value(entry: &MenuEntry, settings: &Settings) -> Option<String> {
    match entry.kind {
        MenuEntryKind::Option(MenuOption::Volume) => {
            Some(format!("{}%", settings.volume as u32 * 10))
        }
        MenuEntryKind::Option(MenuOption::Brightness) => {
            Some(format!("{}%", settings.brightness as u32 * 10))
        }
        MenuEntryKind::Option(MenuOption::Palette) => {
            Some(PALETTE_NAMES[settings.palette % PALETTE_NAMES.len()].to_string())
        }
        MenuEntryKind::Option(MenuOption::StateSlot) => Some(settings.state_slot.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_tables_are_five_rows() {
        assert_eq!(CONTEXT_ENTRIES.len(), MENU_ROWS);
        assert_eq!(OPTION_ENTRIES.len(), MENU_ROWS);
        assert!(!OPTION_ENTRIES[4].enabled);
    }

    #[test]
    fn step_clamps_at_both_ends() {
        assert_eq!(step(MAX_LEVEL, true, MAX_LEVEL), MAX_LEVEL);
        assert_eq!(step(0, false, MAX_LEVEL), 0);
        assert_eq!(step(5, true, MAX_LEVEL), 6);
        assert_eq!(step(5, false, MAX_LEVEL), 4);
    }

    #[test]
    fn option_values_format_as_percentages() {
        let settings = Settings {
            volume: 7,
            brightness: 10,
            ..Settings::default()
        };
        assert_eq!(
            option_value(&OPTION_ENTRIES[0], &settings),
            Some("70%".to_string())
        );
        assert_eq!(
            option_value(&OPTION_ENTRIES[1], &settings),
            Some("100%".to_string())
        );
        assert_eq!(option_value(&OPTION_ENTRIES[4], &settings), None);
    }
}
