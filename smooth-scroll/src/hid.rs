//! Traits and types for the raw HID packet channel.
//!
//! The channel is fire-and-forget: the device writes scroll reports, and reads config packets which are never
//! acknowledged.
use core::future::Future;

use embassy_usb::class::hid::ReadError;
use embassy_usb::driver::EndpointError;

use crate::codec::PACKET_SIZE;

#[derive(PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    UsbReadError(ReadError),
    UsbEndpointError(EndpointError),
}

/// A packet received from the host, `len` is the number of bytes actually read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPacket {
    pub data: [u8; PACKET_SIZE],
    pub len: usize,
}

impl RawPacket {
    pub fn new(data: [u8; PACKET_SIZE], len: usize) -> Self {
        Self {
            data,
            len: len.min(PACKET_SIZE),
        }
    }

    /// Build a packet from a received buffer, anything beyond `PACKET_SIZE` is cut off
    pub fn from_slice(buf: &[u8]) -> Self {
        let len = buf.len().min(PACKET_SIZE);
        let mut data = [0u8; PACKET_SIZE];
        data[..len].copy_from_slice(&buf[..len]);
        Self { data, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// HidWriterTrait is used for sending reports to the host
pub trait HidWriterTrait {
    /// The report type that the writer sends
    type ReportType;

    /// Write report to the host, return the number of bytes written if success.
    fn write_report(&mut self, report: Self::ReportType) -> impl Future<Output = Result<usize, HidError>>;
}

/// HidReaderTrait is used for receiving packets from the host
pub trait HidReaderTrait {
    /// Report type
    type ReportType;

    /// Read HID report from the host
    fn read_report(&mut self) -> impl Future<Output = Result<Self::ReportType, HidError>>;
}
