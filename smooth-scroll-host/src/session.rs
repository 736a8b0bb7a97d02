//! One attached macropad.
use core::time::Duration;

use log::{debug, error, info};
use smooth_scroll::codec::{PACKET_SIZE, decode, decode_scroll};

use crate::config::HostConfig;
use crate::engine::ScrollEngine;
use crate::error::HostError;

/// Smallest input report the host looks at
const MIN_REPORT_LEN: usize = 8;

/// Output side of the raw HID device, implemented by the platform HID layer
pub trait PacketSink {
    fn send_packet(&mut self, packet: &[u8; PACKET_SIZE]) -> Result<(), HostError>;
}

/// Routes reports of an attached device into the scroll engine
pub struct HostSession {
    config: HostConfig,
    engine: ScrollEngine,
}

impl HostSession {
    pub fn new(config: HostConfig) -> Self {
        let config = config.sanitized();
        info!(
            "Host config: step={} interval={} damping={:.3} maxStepPerFrame={:.2} minOutput={:.2}",
            config.host_step_pixels,
            config.host_interval_ms,
            config.damping,
            config.max_step_per_frame,
            config.minimum_output_magnitude
        );
        Self {
            engine: ScrollEngine::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    /// Push the configured step and interval to a freshly attached device
    pub fn on_attach<S: PacketSink>(&self, sink: &mut S) -> Result<(), HostError> {
        sink.send_packet(&self.config.config_packet()).inspect_err(|e| {
            error!("Failed to push configuration: {}", e);
        })
    }

    /// Handle an input report, returns whether it was understood
    pub fn handle_report(&mut self, report: &[u8]) -> bool {
        if report.len() < MIN_REPORT_LEN {
            debug!("Drop short report: {:?}", report);
            return false;
        }
        if let Some(scroll) = decode_scroll(report) {
            self.engine.enqueue(scroll.vertical);
            true
        } else if let Some(message) = decode(report) {
            self.engine.update_configuration(message.step, message.interval);
            true
        } else {
            debug!("Drop unknown report: {:?}", &report[..MIN_REPORT_LEN]);
            false
        }
    }

    /// Movement of the next frame, see [`ScrollEngine::drain`]
    pub fn drain(&mut self) -> Option<i32> {
        self.engine.drain()
    }

    pub fn frame_interval(&self) -> Duration {
        self.engine.frame_interval()
    }
}
