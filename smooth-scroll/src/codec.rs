//! Raw HID packet layout shared by the device and the host daemon.
//!
//! Every packet is 32 bytes:
//! - Byte 0: magic header `0xA5`
//! - Byte 1: message type, `0x01` for device -> host scroll, `0x81` for host -> device config
//! - Byte 2-3: vertical delta in pixels, `i16` little endian (scroll) / step (config, byte 2)
//! - Byte 4-5: horizontal delta in pixels, `i16` little endian (scroll) / interval (config, byte 3)
//! - Byte 6: flags, bit0 is the continuous gesture flag
//! - Byte 7: nominal step size suggested by firmware
//! - Byte 8-31: reserved, zero on send and ignored on receive
use byteorder::{ByteOrder, LittleEndian};

/// Size of every packet on the raw HID channel
pub const PACKET_SIZE: usize = 32;
/// Sentinel at byte 0 of packets in both directions
pub const MESSAGE_MAGIC: u8 = 0xA5;
/// Device -> host scroll report
pub const MESSAGE_TYPE_SCROLL: u8 = 0x01;
/// Host -> device config update
pub const MESSAGE_TYPE_CONFIG: u8 = 0x81;

/// Bit of the flags byte which marks a hold-driven repeat sequence
pub const FLAG_CONTINUOUS: u8 = 0x01;

const CONFIG_MESSAGE_LEN: usize = 4;
const SCROLL_HEADER_LEN: usize = 8;

/// Scroll report sent from the device to the host.
///
/// A report always carries a movement: [`ScrollReport::new`] refuses to build one whose deltas are both zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollReport {
    /// Vertical delta in pixels, negative scrolls up
    pub vertical: i16,
    /// Horizontal delta in pixels, always 0 on the macropad
    pub horizontal: i16,
    /// Part of an ongoing hold-driven gesture
    pub continuous: bool,
    /// Step size the firmware is currently using, informational only
    pub step_hint: u8,
}

impl ScrollReport {
    pub fn new(vertical: i16, horizontal: i16, continuous: bool, step_hint: u8) -> Option<Self> {
        if vertical == 0 && horizontal == 0 {
            return None;
        }
        Some(Self {
            vertical,
            horizontal,
            continuous,
            step_hint,
        })
    }

    /// Serialize the report into a raw HID packet
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = MESSAGE_MAGIC;
        buf[1] = MESSAGE_TYPE_SCROLL;
        LittleEndian::write_i16(&mut buf[2..4], self.vertical);
        LittleEndian::write_i16(&mut buf[4..6], self.horizontal);
        buf[6] = if self.continuous { FLAG_CONTINUOUS } else { 0 };
        buf[7] = self.step_hint;
        buf
    }
}

/// Config update pushed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigMessage {
    /// Requested step in pixels
    pub step: u8,
    /// Requested repeat interval in milliseconds
    pub interval: u8,
}

impl ConfigMessage {
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = MESSAGE_MAGIC;
        buf[1] = MESSAGE_TYPE_CONFIG;
        buf[2] = self.step;
        buf[3] = self.interval;
        buf
    }
}

/// Encode a scroll report, returns `None` if there's nothing to scroll.
pub fn encode_scroll(vertical: i16, horizontal: i16, continuous: bool, step_hint: u8) -> Option<[u8; PACKET_SIZE]> {
    ScrollReport::new(vertical, horizontal, continuous, step_hint).map(|r| r.to_bytes())
}

/// Encode a config update, which is what the host sends after the device is attached.
pub fn encode_config(step: u8, interval: u8) -> [u8; PACKET_SIZE] {
    ConfigMessage { step, interval }.to_bytes()
}

/// Decode an inbound packet.
///
/// Only config messages are accepted. Short packets, a wrong magic byte and unknown message types all yield `None`,
/// so that newer hosts can send messages this firmware doesn't know yet.
pub fn decode(buf: &[u8]) -> Option<ConfigMessage> {
    if buf.len() < CONFIG_MESSAGE_LEN {
        return None;
    }
    if buf[0] != MESSAGE_MAGIC || buf[1] != MESSAGE_TYPE_CONFIG {
        return None;
    }
    Some(ConfigMessage {
        step: buf[2],
        interval: buf[3],
    })
}

/// Decode a scroll report, used on the host side.
pub fn decode_scroll(buf: &[u8]) -> Option<ScrollReport> {
    if buf.len() < SCROLL_HEADER_LEN {
        return None;
    }
    if buf[0] != MESSAGE_MAGIC || buf[1] != MESSAGE_TYPE_SCROLL {
        return None;
    }
    Some(ScrollReport {
        vertical: LittleEndian::read_i16(&buf[2..4]),
        horizontal: LittleEndian::read_i16(&buf[4..6]),
        continuous: buf[6] & FLAG_CONTINUOUS != 0,
        step_hint: buf[7],
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_scroll_layout() {
        let buf = encode_scroll(-24, 0, true, 24).unwrap();
        assert_eq!(buf[..8], [0xA5, 0x01, 0xE8, 0xFF, 0x00, 0x00, 0x01, 24]);
        assert!(buf[8..].iter().all(|b| *b == 0));

        let buf = encode_scroll(300, -2, false, 7).unwrap();
        assert_eq!(buf[..8], [0xA5, 0x01, 0x2C, 0x01, 0xFE, 0xFF, 0x00, 7]);
    }

    #[test]
    fn test_encode_zero_delta() {
        assert_eq!(encode_scroll(0, 0, true, 24), None);
        assert_eq!(ScrollReport::new(0, 0, false, 2), None);
        // Horizontal only is still a movement
        assert!(encode_scroll(0, 5, true, 24).is_some());
    }

    #[test]
    fn test_round_trip() {
        for (v, h) in [(1, 0), (-1, 0), (0, 1), (i16::MAX, i16::MIN), (-24, 24), (24, 0)] {
            for continuous in [true, false] {
                let buf = encode_scroll(v, h, continuous, 24).unwrap();
                let report = decode_scroll(&buf).unwrap();
                assert_eq!(report.vertical, v);
                assert_eq!(report.horizontal, h);
                assert_eq!(report.continuous, continuous);
                assert_eq!(report.step_hint, 24);
            }
        }
    }

    #[test]
    fn test_decode_config() {
        assert_eq!(
            decode(&[0xA5, 0x81, 40, 8]),
            Some(ConfigMessage { step: 40, interval: 8 })
        );
        // Trailing bytes are ignored
        let mut buf = encode_config(3, 1);
        buf[4..].fill(0xEE);
        assert_eq!(decode(&buf), Some(ConfigMessage { step: 3, interval: 1 }));
    }

    #[test]
    fn test_decode_rejects() {
        // Too short
        assert_eq!(decode(&[0xA5, 0x81, 40]), None);
        assert_eq!(decode(&[]), None);
        // Wrong magic
        assert_eq!(decode(&[0xA4, 0x81, 40, 8]), None);
        // Scroll report is not accepted by the device
        assert_eq!(decode(&encode_scroll(10, 0, true, 24).unwrap()), None);
        // Unknown type
        assert_eq!(decode(&[0xA5, 0x42, 40, 8]), None);
    }

    #[test]
    fn test_decode_scroll_rejects() {
        assert_eq!(decode_scroll(&encode_config(24, 5)), None);
        assert_eq!(decode_scroll(&[0xA5, 0x01, 0x10, 0x00, 0x00, 0x00, 0x01]), None);
    }
}
