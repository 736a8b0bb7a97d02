//! Packets pushed by the host.
//!
//! The host only sends config updates, and never gets an answer. Everything that isn't a valid config message is
//! dropped.
use embassy_time::Timer;
use embassy_usb::class::hid::ReadError;

use crate::codec::decode;
use crate::config::ScrollConfig;
use crate::hid::{HidError, HidReaderTrait, RawPacket};
use crate::state::ScrollState;

/// Route a received packet, returns the new config if the packet was a config message.
pub fn process_packet(state: &ScrollState, buf: &[u8]) -> Option<ScrollConfig> {
    match decode(buf) {
        Some(message) => {
            let config = state.apply_config(message);
            info!(
                "Scroll config updated to step {}, interval {}ms",
                config.step_pixels(),
                config.interval_ms()
            );
            Some(config)
        }
        None => {
            debug!("Drop host packet: {:?}", buf);
            None
        }
    }
}

/// Task which receives packets from the host and applies them to the scroll state
pub struct HostListener<'a, R: HidReaderTrait<ReportType = RawPacket>> {
    state: &'a ScrollState,
    reader: R,
}

impl<'a, R: HidReaderTrait<ReportType = RawPacket>> HostListener<'a, R> {
    pub fn new(state: &'a ScrollState, reader: R) -> Self {
        Self { state, reader }
    }

    pub async fn run(&mut self) {
        loop {
            match self.process().await {
                Ok(_) => continue,
                Err(HidError::UsbReadError(ReadError::Disabled)) => {
                    // Not connected yet
                    Timer::after_millis(1000).await;
                }
                Err(e) => {
                    error!("Read host packet error: {:?}", e);
                    Timer::after_millis(100).await;
                }
            }
        }
    }

    pub async fn process(&mut self) -> Result<(), HidError> {
        let packet = self.reader.read_report().await?;
        process_packet(self.state, packet.as_bytes());
        Ok(())
    }
}
