//! Frame pacing: the 60 Hz feedback controller and its diagnostics.

use std::time::Duration;

/// Wall-clock budget of one emulated frame at the 60 Hz target.
pub const TARGET_FRAME_US: i64 = 1_000_000 / 60;

/// Margin reserved for scheduling overhead: a sleep is only worth taking
/// when the remaining budget exceeds it, and the sleep is shortened by it.
pub const SLEEP_JITTER_US: i64 = 360;

/// Accumulated frame-time figures since the last reset.
///
/// Purely diagnostic. Reset on every menu-to-running transition so menu
/// dwell time never counts against emulation FPS.
#[derive(Clone, Debug)]
pub struct FrameTimingStats {
    frames: u32,
    total_us: u64,
    min_us: u64,
    max_us: u64,
}

impl FrameTimingStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            total_us: 0,
            min_us: u64::MAX,
            max_us: 0,
        }
    }

    pub fn record(&mut self, elapsed_us: u64) {
        self.frames += 1;
        self.total_us += elapsed_us;
        self.min_us = self.min_us.min(elapsed_us);
        self.max_us = self.max_us.max(elapsed_us);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Instantaneous frames-per-second; 0 before any frame was measured.
    pub fn fps(&self) -> f32 {
        if self.total_us == 0 {
            return 0.0;
        }
        self.frames as f32 / (self.total_us as f32 / 1e6)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn total_us(&self) -> u64 {
        self.total_us
    }

    pub fn min_us(&self) -> u64 {
        if self.frames == 0 { 0 } else { self.min_us }
    }

    pub fn max_us(&self) -> u64 {
        self.max_us
    }
}

impl Default for FrameTimingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Feedback controller that keeps the loop locked to the frame budget.
///
/// Carries a signed microsecond accumulator: 0 or negative, the debt left
/// over from frames that overran. A frame that overruns its budget clears
/// the render flag so the next iteration runs logic-only, paying the debt
/// back by dropping exactly one draw instead of letting slowdown compound
/// into audio/video desync. The flag re-arms as soon as it is consumed, so
/// draws are skipped at most one at a time.
pub struct FrameScheduler {
    accumulator_us: i64,
    render: bool,
    pub stats: FrameTimingStats,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            accumulator_us: 0,
            render: true,
            stats: FrameTimingStats::new(),
        }
    }

    /// Whether the frame being started should be drawn. Consuming a cleared
    /// flag re-arms it for the following iteration.
    pub fn take_render_flag(&mut self) -> bool {
        let render = self.render;
        if !render {
            self.render = true;
        }
        render
    }

    /// Close out an iteration that took `elapsed_us` and decide how to pay
    /// for it: returns the duration to sleep when the frame came in under
    /// budget, or `None` when there is nothing to sleep off. A negative
    /// budget clears the render flag and is carried in the accumulator.
    pub fn pace(&mut self, elapsed_us: i64) -> Option<Duration> {
        let budget = TARGET_FRAME_US - elapsed_us + self.accumulator_us;
        if budget > SLEEP_JITTER_US {
            self.accumulator_us = 0;
            Some(Duration::from_micros((budget - SLEEP_JITTER_US) as u64))
        } else {
            if budget < 0 {
                self.render = false;
            }
            self.accumulator_us = budget.min(0);
            None
        }
    }

    /// Forget all carried debt and diagnostics, as if the session had just
    /// started. Invoked on every menu-to-running transition.
    pub fn reset(&mut self) {
        self.accumulator_us = 0;
        self.render = true;
        self.stats.reset();
    }

    pub fn accumulator_us(&self) -> i64 {
        self.accumulator_us
    }

    pub fn will_render(&self) -> bool {
        self.render
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
