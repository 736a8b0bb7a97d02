//! Damped scroll accumulator.
//!
//! Deltas received from the device are summed into an accumulator. The frame timer of the caller calls
//! [`ScrollEngine::drain`] once per [`ScrollEngine::frame_interval`], each call releases a damped part of what is left.
use core::time::Duration;

use log::debug;

use crate::config::HostConfig;

/// Accumulated deltas at or below this magnitude are considered drained
const DRAIN_THRESHOLD: f64 = 0.1;

pub struct ScrollEngine {
    accumulator: f64,
    damping: f64,
    max_step_per_frame: f64,
    minimum_output_magnitude: f64,
    frame_interval: Duration,
}

impl ScrollEngine {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            accumulator: 0.0,
            damping: config.damping,
            max_step_per_frame: config.max_step_per_frame,
            minimum_output_magnitude: config.minimum_output_magnitude,
            frame_interval: Duration::from_millis(config.host_interval_ms as u64),
        }
    }

    /// Queue a vertical delta received from the device
    pub fn enqueue(&mut self, vertical: i16) {
        self.accumulator += vertical as f64;
    }

    /// Apply a step/interval pair. Zero leaves the corresponding value untouched.
    ///
    /// The step bounds the per-frame movement, the interval becomes the frame period.
    pub fn update_configuration(&mut self, step: u8, interval_ms: u8) {
        if step > 0 {
            self.max_step_per_frame = step as f64;
        }
        if interval_ms > 0 {
            self.frame_interval = Duration::from_millis(interval_ms as u64);
        }
        debug!(
            "Engine config: max step {}, frame interval {:?}",
            self.max_step_per_frame, self.frame_interval
        );
    }

    /// Release the movement of one frame, in whole pixels.
    ///
    /// Returns `None` when there's nothing left to scroll. `Some(0)` is a sub-pixel frame: the remainder is still
    /// consumed from the accumulator.
    pub fn drain(&mut self) -> Option<i32> {
        if self.accumulator.abs() <= DRAIN_THRESHOLD {
            return None;
        }

        let mut delta = (self.accumulator * self.damping).clamp(-self.max_step_per_frame, self.max_step_per_frame);
        if delta.abs() < self.minimum_output_magnitude {
            // Never move past what is left, so the remainder settles at zero
            let magnitude = self.minimum_output_magnitude.min(self.accumulator.abs());
            delta = magnitude.copysign(self.accumulator);
        }

        self.accumulator -= delta;
        Some(delta.round() as i32)
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn max_step_per_frame(&self) -> f64 {
        self.max_step_per_frame
    }
}
