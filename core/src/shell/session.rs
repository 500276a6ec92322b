//! The main loop: one continuous cycle composing input, menu, pacing,
//! buffering and the console until a quit command.

use std::time::{Duration, Instant};

use crate::core::console::Console;
use crate::core::host::{AudioOut, DisplayBackend, InputSource, StateStore};
use crate::shell::audio::AudioStreamBridge;
use crate::shell::input::InputMapper;
use crate::shell::menu::{MenuStateMachine, ResumeAction, Settings, ShellCommand};
use crate::shell::timing::{FrameScheduler, FrameTimingStats};
use crate::shell::video::DoubleBufferCoordinator;

/// Redraw cadence of the menu overlay. The running path paces itself; the
/// menu path just throttles its redraw to roughly one frame period.
const MENU_REDRAW_PERIOD: Duration = Duration::from_millis(16);

/// One emulation session: owns the UI state, selection cursor, settings and
/// timing accumulators for the lifetime of the process, and runs the loop.
///
/// Strictly single-threaded: input, menu, scheduler, coordinator and console
/// execute in sequence within one iteration. The only concurrency boundary
/// is inside the host audio queue, reached through the bridge.
pub struct Session {
    console: Box<dyn Console>,
    video: DoubleBufferCoordinator,
    audio: AudioStreamBridge,
    input: Box<dyn InputSource>,
    store: Box<dyn StateStore>,
    mapper: InputMapper,
    scheduler: FrameScheduler,
    menu: MenuStateMachine,
    settings: Settings,
    running: bool,
    frame_counter: u64,
}

impl Session {
    pub fn new(
        console: Box<dyn Console>,
        display: Box<dyn DisplayBackend>,
        audio_out: Box<dyn AudioOut>,
        input: Box<dyn InputSource>,
        store: Box<dyn StateStore>,
        settings: Settings,
    ) -> Self {
        Self {
            console,
            video: DoubleBufferCoordinator::new(display),
            audio: AudioStreamBridge::new(audio_out),
            input,
            store,
            mapper: InputMapper::new(),
            scheduler: FrameScheduler::new(),
            menu: MenuStateMachine::new(),
            settings,
            running: false,
            frame_counter: 0,
        }
    }

    /// Run until the Quit menu action or a host close request.
    pub fn run(&mut self) {
        self.running = true;
        self.apply_settings();

        let mut last_iteration = Instant::now();
        while self.running {
            let t0 = Instant::now();
            self.input.poll();
            if self.input.quit_requested() {
                log::info!("host close request, ending session");
                break;
            }

            if self.menu.is_open() {
                if self.menu_iteration() {
                    // Timed as if the session just started: the first
                    // post-menu frame must not see menu dwell time.
                    last_iteration = Instant::now();
                }
            } else {
                self.frame_iteration(t0, &mut last_iteration);
            }
        }
    }

    pub fn timing(&self) -> &FrameTimingStats {
        &self.scheduler.stats
    }

    pub fn menu(&self) -> &MenuStateMachine {
        &self.menu
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// One running-state iteration: pad, pause check, frame, pacing.
    fn frame_iteration(&mut self, t0: Instant, last_iteration: &mut Instant) {
        if let Some(pad) = self.mapper.sample(self.input.as_ref()) {
            self.console.set_pad(pad);
        }

        if let ShellCommand::OpenMenu = self.menu.update(self.input.as_ref(), &mut self.settings) {
            log::info!("entering context menu, pausing presentation");
            self.video.pause();
            return;
        }

        if self.scheduler.take_render_flag() {
            let frame = self.video.acquire_back_buffer();
            self.console.run_frame(Some(frame), &mut self.audio);
            self.video.present_frame();
        } else {
            // Logic-only step: the skipped draw pays back carried debt.
            self.console.run_frame(None, &mut self.audio);
        }
        self.frame_counter += 1;

        let elapsed_us = t0.elapsed().as_micros() as i64;
        let sleep = self.scheduler.pace(elapsed_us);
        log::trace!(
            "frame {}: fps {:.2}, elapsed {}us, accumulator {}us, sleep {:?}",
            self.frame_counter,
            self.scheduler.stats.fps(),
            elapsed_us,
            self.scheduler.accumulator_us(),
            sleep,
        );
        if let Some(duration) = sleep {
            std::thread::sleep(duration);
        }

        self.scheduler
            .stats
            .record(t0.duration_since(*last_iteration).as_micros() as u64);
        *last_iteration = t0;
    }

    /// One menu-state iteration: redraw the overlay, consume navigation,
    /// apply whatever command falls out. Returns true when the session
    /// resumed running.
    fn menu_iteration(&mut self) -> bool {
        self.video.draw_menu(&self.menu, &self.settings);

        let command = self.menu.update(self.input.as_ref(), &mut self.settings);
        self.apply_settings();

        let mut resumed = false;
        match command {
            ShellCommand::Resume {
                action,
                resume_swap,
            } => {
                if resume_swap {
                    self.video.resume();
                }
                match action {
                    ResumeAction::Continue => {}
                    ResumeAction::SaveState => self.save_state(),
                    ResumeAction::LoadState => self.load_state(),
                    ResumeAction::Restart => {
                        log::info!("hard reset requested from menu");
                        self.console.reset(true);
                    }
                }
                self.scheduler.reset();
                resumed = true;
            }
            ShellCommand::Quit => {
                log::info!("quit selected, ending session");
                self.running = false;
            }
            ShellCommand::None | ShellCommand::OpenMenu => {}
        }

        if self.running && !resumed {
            std::thread::sleep(MENU_REDRAW_PERIOD);
        }
        resumed
    }

    fn apply_settings(&mut self) {
        self.audio.set_volume(self.settings.volume);
        self.video
            .display_mut()
            .set_brightness(self.settings.brightness);
    }

    fn save_state(&mut self) {
        let slot = self.settings.state_slot;
        let data = self.console.save_state();
        match self.store.save(slot, &data) {
            Ok(()) => log::info!("saved state to slot {slot} ({} bytes)", data.len()),
            Err(e) => log::warn!("failed to save state to slot {slot}: {e}"),
        }
    }

    fn load_state(&mut self) {
        let slot = self.settings.state_slot;
        match self.store.load(slot) {
            Ok(data) => {
                if let Err(e) = self.console.load_state(&data) {
                    log::warn!("slot {slot} holds an unusable state: {e}");
                }
            }
            Err(e) => log::warn!("failed to load state from slot {slot}: {e}"),
        }
    }
}
