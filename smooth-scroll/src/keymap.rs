use crate::channel::KEY_EVENT_CHANNEL;
use crate::event::{KeyEvent, ScrollDirection};

/// Maps physical key positions to scroll directions.
///
/// Positions without a direction are not scroll keys, their events are left to the rest of the firmware.
pub struct ScrollKeymap<const ROW: usize, const COL: usize> {
    layout: [[Option<ScrollDirection>; COL]; ROW],
}

impl Default for ScrollKeymap<1, 2> {
    /// One row with two keys: scroll up, scroll down
    fn default() -> Self {
        Self::new([[Some(ScrollDirection::Up), Some(ScrollDirection::Down)]])
    }
}

impl<const ROW: usize, const COL: usize> ScrollKeymap<ROW, COL> {
    pub const fn new(layout: [[Option<ScrollDirection>; COL]; ROW]) -> Self {
        Self { layout }
    }

    pub fn direction(&self, row: u8, col: u8) -> Option<ScrollDirection> {
        self.layout
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .flatten()
    }

    /// Convert a matrix event into a scroll key event, `None` means the key is not a scroll key.
    pub fn key_event(&self, row: u8, col: u8, pressed: bool) -> Option<KeyEvent> {
        match self.direction(row, col) {
            Some(direction) => Some(KeyEvent { direction, pressed }),
            None => {
                trace!("Key ({}, {}) is not a scroll key", row, col);
                None
            }
        }
    }

    /// Forward a matrix event to the scroll processor.
    ///
    /// Returns false if the key is not a scroll key, the event is then left to the caller.
    pub async fn send_key_event(&self, row: u8, col: u8, pressed: bool) -> bool {
        match self.key_event(row, col, pressed) {
            Some(event) => {
                KEY_EVENT_CHANNEL.send(event).await;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use embassy_futures::block_on;

    use super::*;

    #[test]
    fn test_default_layout() {
        let keymap = ScrollKeymap::<1, 2>::default();
        assert_eq!(keymap.direction(0, 0), Some(ScrollDirection::Up));
        assert_eq!(keymap.direction(0, 1), Some(ScrollDirection::Down));
        assert_eq!(keymap.key_event(0, 1, true), Some(KeyEvent::press(ScrollDirection::Down)));
        assert_eq!(keymap.key_event(0, 0, false), Some(KeyEvent::release(ScrollDirection::Up)));
    }

    #[test]
    fn test_out_of_range() {
        let keymap = ScrollKeymap::<1, 2>::default();
        assert_eq!(keymap.direction(1, 0), None);
        assert_eq!(keymap.direction(0, 2), None);
        assert_eq!(keymap.key_event(5, 5, true), None);
    }

    #[test]
    fn test_custom_layout() {
        let keymap = ScrollKeymap::new([[None, Some(ScrollDirection::Down)], [Some(ScrollDirection::Up), None]]);
        assert_eq!(keymap.direction(0, 0), None);
        assert_eq!(keymap.direction(1, 0), Some(ScrollDirection::Up));
        assert_eq!(keymap.key_event(1, 1, true), None);
    }

    #[test]
    fn test_send_key_event() {
        let keymap = ScrollKeymap::<1, 2>::default();
        block_on(async {
            assert!(keymap.send_key_event(0, 1, true).await);
            assert!(!keymap.send_key_event(0, 3, true).await);
            assert!(keymap.send_key_event(0, 1, false).await);
        });
        assert_eq!(KEY_EVENT_CHANNEL.try_receive(), Ok(KeyEvent::press(ScrollDirection::Down)));
        assert_eq!(KEY_EVENT_CHANNEL.try_receive(), Ok(KeyEvent::release(ScrollDirection::Down)));
        assert!(KEY_EVENT_CHANNEL.is_empty());
    }
}
