//! Events delivered to the scroll poll loop

/// Logical scroll direction of a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Key press/release of one of the scroll keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub direction: ScrollDirection,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(direction: ScrollDirection) -> Self {
        Self {
            direction,
            pressed: true,
        }
    }

    pub fn release(direction: ScrollDirection) -> Self {
        Self {
            direction,
            pressed: false,
        }
    }
}
