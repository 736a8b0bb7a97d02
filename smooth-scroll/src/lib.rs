//! Firmware core of a two-key smooth scrolling macropad.
//!
//! Holding one of the scroll keys sends a stream of scroll reports over a 32-byte raw HID channel. The host can
//! change the step and the repeat interval at any time by sending a config packet on the same channel.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod codec;
pub mod config;
pub mod event;
pub mod hid;
pub mod host;
pub mod keymap;
pub mod processor;
pub mod state;
pub mod usb;

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::codec::ScrollReport;
use crate::config::DeviceConfig;
use crate::hid::{HidReaderTrait, HidWriterTrait, RawPacket};
use crate::host::HostListener;
use crate::processor::ScrollProcessor;
use crate::state::ScrollState;

/// Raw mutex used by the shared state and channels.
///
/// Host packets can arrive from an interrupt executor, so a critical section is required.
pub type RawMutex = CriticalSectionRawMutex;

/// Run the scroll poll loop and the host listener until the end of the world.
///
/// `state` should be created by [`DeviceConfig::scroll_state`], the poll loop ticks every
/// `device_config.tick_interval`.
pub async fn run_scroll_service<R, W>(state: &ScrollState, reader: R, writer: W, device_config: &DeviceConfig<'_>)
where
    R: HidReaderTrait<ReportType = RawPacket>,
    W: HidWriterTrait<ReportType = ScrollReport>,
{
    info!(
        "Starting scroll service, config: {:?}, tick: {}ms",
        state.config(),
        device_config.tick_interval.as_millis()
    );
    let mut processor = ScrollProcessor::new(state, writer, device_config.tick_interval);
    let mut listener = HostListener::new(state, reader);
    join(processor.run(), listener.run()).await;
}
