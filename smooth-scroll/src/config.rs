use embassy_time::Duration;

use crate::state::ScrollState;

/// Default scroll step in pixels
pub const DEFAULT_SCROLL_STEP: u8 = 24;
/// Default minimal time between two repeated reports, in milliseconds
pub const DEFAULT_SCROLL_INTERVAL: u8 = 5;
/// Smallest step accepted from the host
pub const MIN_SCROLL_STEP: u8 = 2;
/// Smallest interval accepted from the host
pub const MIN_SCROLL_INTERVAL: u8 = 1;

/// Config for the whole device
pub struct DeviceConfig<'a> {
    pub usb_config: UsbConfig<'a>,
    /// Scroll config used at startup, until the host pushes a new one
    pub scroll_config: ScrollConfig,
    /// Period of the poll loop tick. It should not be longer than the smallest interval, aka 1ms.
    pub tick_interval: Duration,
}

impl Default for DeviceConfig<'_> {
    fn default() -> Self {
        Self {
            usb_config: UsbConfig::default(),
            scroll_config: ScrollConfig::default(),
            tick_interval: Duration::from_millis(1),
        }
    }
}

impl DeviceConfig<'_> {
    /// Scroll state seeded with the startup config
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState::new(self.scroll_config)
    }
}

/// Configurations for usb
#[derive(Clone, Copy, Debug)]
pub struct UsbConfig<'a> {
    /// Vender id
    pub vid: u16,
    /// Product id
    pub pid: u16,
    /// Manufacturer
    pub manufacturer: &'a str,
    /// Product name
    pub product_name: &'a str,
    /// Serial number
    pub serial_number: &'a str,
}

impl Default for UsbConfig<'_> {
    fn default() -> Self {
        Self {
            vid: 0xCEEB,
            pid: 0x0002,
            manufacturer: "ANAVI",
            product_name: "Macro Pad 2",
            serial_number: "smooth-scroll:000001",
        }
    }
}

/// Runtime scroll sensitivity, which can be changed by the host.
///
/// `step_pixels >= 2` and `interval_ms >= 1` always hold. The only way to change a config is [`ScrollConfig::apply_update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    step_pixels: u8,
    interval_ms: u8,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_pixels: DEFAULT_SCROLL_STEP,
            interval_ms: DEFAULT_SCROLL_INTERVAL,
        }
    }
}

impl ScrollConfig {
    /// Create a config from the defaults with the requested values applied
    pub fn new(step_pixels: u8, interval_ms: u8) -> Self {
        Self::default().apply_update(step_pixels, interval_ms)
    }

    pub fn step_pixels(&self) -> u8 {
        self.step_pixels
    }

    pub fn interval_ms(&self) -> u8 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    /// Apply the requested values.
    ///
    /// Each field is checked on its own: a value below its minimum keeps the current one, the other field is
    /// still updated.
    pub fn apply_update(self, requested_step: u8, requested_interval: u8) -> Self {
        let mut updated = self;
        if requested_step >= MIN_SCROLL_STEP {
            updated.step_pixels = requested_step;
        } else {
            debug!("Ignore scroll step {}, keep {}", requested_step, self.step_pixels);
        }
        if requested_interval >= MIN_SCROLL_INTERVAL {
            updated.interval_ms = requested_interval;
        } else {
            debug!("Ignore scroll interval {}, keep {}", requested_interval, self.interval_ms);
        }
        updated
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[ctor::ctor]
    fn init_log() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    #[test]
    fn test_default() {
        let config = ScrollConfig::default();
        assert_eq!(config.step_pixels(), 24);
        assert_eq!(config.interval_ms(), 5);
        assert_eq!(config.interval(), Duration::from_millis(5));
    }

    #[test]
    fn test_device_config() {
        let config = DeviceConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(1));
        assert_eq!(config.usb_config.vid, 0xCEEB);
        assert_eq!(config.usb_config.pid, 0x0002);
        assert_eq!(config.scroll_state().config(), ScrollConfig::default());

        let config = DeviceConfig {
            scroll_config: ScrollConfig::new(30, 8),
            ..Default::default()
        };
        assert_eq!(config.scroll_state().config(), ScrollConfig::new(30, 8));
    }

    #[test]
    fn test_apply_update_partial() {
        let config = ScrollConfig::default();
        assert_eq!(config.apply_update(1, 10), ScrollConfig::new(24, 10));
        assert_eq!(config.apply_update(1, 10).step_pixels(), 24);
        assert_eq!(config.apply_update(1, 10).interval_ms(), 10);

        let updated = config.apply_update(50, 0);
        assert_eq!(updated.step_pixels(), 50);
        assert_eq!(updated.interval_ms(), 5);
    }

    #[test]
    fn test_apply_update_bounds() {
        let config = ScrollConfig::default();
        // Both rejected
        assert_eq!(config.apply_update(0, 0), config);
        // Minimums are inclusive
        let updated = config.apply_update(2, 1);
        assert_eq!((updated.step_pixels(), updated.interval_ms()), (2, 1));
        let updated = config.apply_update(u8::MAX, u8::MAX);
        assert_eq!((updated.step_pixels(), updated.interval_ms()), (255, 255));
    }

    #[test]
    fn test_new_keeps_invariant() {
        let config = ScrollConfig::new(1, 0);
        assert_eq!(config, ScrollConfig::default());
        for step in 0..=u8::MAX {
            for interval in [0, 1, 7] {
                let config = ScrollConfig::new(step, interval);
                assert!(config.step_pixels() >= MIN_SCROLL_STEP);
                assert!(config.interval_ms() >= MIN_SCROLL_INTERVAL);
            }
        }
    }
}
