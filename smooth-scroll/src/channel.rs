//! Exposed channels which can be used to feed the scroll processor

pub use embassy_sync::channel;
use embassy_sync::channel::Channel;

use crate::RawMutex;
use crate::event::KeyEvent;

pub const KEY_EVENT_CHANNEL_SIZE: usize = 16;

/// Channel for scroll key events, filled by the key scanning task
pub static KEY_EVENT_CHANNEL: Channel<RawMutex, KeyEvent, KEY_EVENT_CHANNEL_SIZE> = Channel::new();
