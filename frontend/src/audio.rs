//! SDL2 implementation of [`AudioOut`] over a queue device.
//!
//! The shell pushes one frame's worth of samples per emulated frame; the
//! blocking loop in [`SdlAudioOut::queue_stereo_blocking`] is what paces
//! the emulation when the display has no frames to render.

use std::time::Duration;

use lantern_core::core::host::AudioOut;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

/// Poll interval while waiting for queue space.
const BACKPRESSURE_POLL: Duration = Duration::from_micros(500);

pub struct SdlAudioOut {
    queue: AudioQueue<i16>,
    volume: u8,
    high_water_bytes: u32,
}

impl SdlAudioOut {
    pub fn new(sdl_audio: &sdl2::AudioSubsystem, sample_rate: u32) -> Self {
        let desired_spec = AudioSpecDesired {
            freq: Some(sample_rate as i32),
            channels: Some(2),
            samples: Some(512),
        };

        let queue = sdl_audio
            .open_queue::<i16, _>(None, &desired_spec)
            .expect("Failed to open SDL audio queue");
        queue.resume();

        // Block once ~100 ms of stereo audio is queued.
        let high_water_bytes = sample_rate / 10 * 2 * 2;

        Self {
            queue,
            volume: 10,
            high_water_bytes,
        }
    }
}

impl AudioOut for SdlAudioOut {
    fn queue_stereo_blocking(&mut self, samples: &[i16]) {
        while self.queue.size() > self.high_water_bytes {
            std::thread::sleep(BACKPRESSURE_POLL);
        }

        let result = if self.volume >= 10 {
            self.queue.queue_audio(samples)
        } else {
            let scaled: Vec<i16> = samples
                .iter()
                .map(|&s| (s as i32 * self.volume as i32 / 10) as i16)
                .collect();
            self.queue.queue_audio(&scaled)
        };
        if let Err(e) = result {
            log::warn!("audio queue rejected block: {e}");
        }
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = level.min(10);
    }
}
