//! Shared scroll state, touched by the poll loop and by the host listener.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;

use crate::RawMutex;
use crate::codec::{ConfigMessage, ScrollReport};
use crate::config::ScrollConfig;
use crate::event::{KeyEvent, ScrollDirection};

/// Which scroll keys are currently held
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollAxisState {
    pub up_active: bool,
    pub down_active: bool,
}

impl ScrollAxisState {
    pub fn set(&mut self, direction: ScrollDirection, active: bool) {
        match direction {
            ScrollDirection::Up => self.up_active = active,
            ScrollDirection::Down => self.down_active = active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.up_active || self.down_active
    }

    /// Net vertical movement of all held keys, opposite keys cancel each other
    pub fn vertical_delta(&self, step: u8) -> i16 {
        let step = step as i16;
        let mut delta = 0;
        if self.up_active {
            delta -= step;
        }
        if self.down_active {
            delta += step;
        }
        delta
    }
}

/// Signed delta of a single step in the given direction
fn direction_delta(direction: ScrollDirection, step: u8) -> i16 {
    match direction {
        ScrollDirection::Up => -(step as i16),
        ScrollDirection::Down => step as i16,
    }
}

struct ScrollInner {
    config: ScrollConfig,
    axis: ScrollAxisState,
    /// When the last report was emitted
    last_emit: Instant,
}

/// All mutable state of the scroll keys.
///
/// Every handler runs its read-modify-write inside one critical section and hands the report back to the caller,
/// so the report is sent after the lock is released, built from the config seen inside the lock.
pub struct ScrollState {
    inner: Mutex<RawMutex, RefCell<ScrollInner>>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollState {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ScrollInner {
                config,
                axis: ScrollAxisState::default(),
                last_emit: Instant::from_ticks(0),
            })),
        }
    }

    /// Current scroll config
    pub fn config(&self) -> ScrollConfig {
        self.inner.lock(|inner| inner.borrow().config)
    }

    /// Currently held keys
    pub fn axis(&self) -> ScrollAxisState {
        self.inner.lock(|inner| inner.borrow().axis)
    }

    /// Press a scroll key, the first step is emitted right away.
    pub fn key_down(&self, direction: ScrollDirection, now: Instant) -> Option<ScrollReport> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.axis.set(direction, true);
            inner.last_emit = now;
            let step = inner.config.step_pixels();
            ScrollReport::new(direction_delta(direction, step), 0, true, step)
        })
    }

    /// Release a scroll key. Nothing is sent, the repeat just stops.
    pub fn key_up(&self, direction: ScrollDirection) {
        self.inner.lock(|inner| inner.borrow_mut().axis.set(direction, false));
    }

    pub fn process_key_event(&self, event: KeyEvent, now: Instant) -> Option<ScrollReport> {
        if event.pressed {
            self.key_down(event.direction, now)
        } else {
            self.key_up(event.direction);
            None
        }
    }

    /// Periodic tick, emits a repeat report when a key is held and the interval has elapsed.
    pub fn on_tick(&self, now: Instant) -> Option<ScrollReport> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            if !inner.axis.is_active() {
                return None;
            }
            if now.saturating_duration_since(inner.last_emit) < inner.config.interval() {
                return None;
            }
            inner.last_emit = now;
            let step = inner.config.step_pixels();
            ScrollReport::new(inner.axis.vertical_delta(step), 0, true, step)
        })
    }

    /// Apply a config message from the host, returns the config in use afterwards
    pub fn apply_config(&self, message: ConfigMessage) -> ScrollConfig {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.config = inner.config.apply_update(message.step, message.interval);
            inner.config
        })
    }
}
