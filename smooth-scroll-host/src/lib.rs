//! Host side of the smooth-scroll macropad.
//!
//! The macropad streams raw pixel deltas. This crate turns them into a smooth stream of frames: deltas are
//! accumulated by [`engine::ScrollEngine`] and released a damped fraction at a time on every frame. Posting the frames
//! as OS scroll events and talking to the HID device are left to the caller, see [`session::PacketSink`].

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::HostConfig;
pub use engine::ScrollEngine;
pub use error::HostError;
pub use session::{HostSession, PacketSink};
