//! Audio hand-off between the console core and the host output queue.

use crate::core::host::{AudioOut, AudioSink};

/// Pass-through adapter from the console's per-frame sample pushes to the
/// host audio queue.
///
/// No buffering, resampling or format conversion happens here: blocks are
/// forwarded verbatim, in stereo, with blocking enabled. A blocked push
/// stalls the console's frame execution until queue space opens up, which
/// is the loop's only backpressure mechanism.
pub struct AudioStreamBridge {
    out: Box<dyn AudioOut>,
}

impl AudioStreamBridge {
    pub fn new(out: Box<dyn AudioOut>) -> Self {
        Self { out }
    }

    pub fn set_volume(&mut self, level: u8) {
        self.out.set_volume(level);
    }
}

impl AudioSink for AudioStreamBridge {
    fn push_samples(&mut self, samples: &[i16]) {
        self.out.queue_stereo_blocking(samples);
    }
}
