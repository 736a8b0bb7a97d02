//! Raw HID interface over embassy-usb
use embassy_usb::Builder;
use embassy_usb::class::hid::{Config, HidBootProtocol, HidReader, HidReaderWriter, HidSubclass, HidWriter, State};
use embassy_usb::driver::Driver;
use static_cell::StaticCell;
use usbd_hid::descriptor::generator_prelude::*;

use crate::codec::{PACKET_SIZE, ScrollReport};
use crate::config::UsbConfig;
use crate::hid::{HidError, HidReaderTrait, HidWriterTrait, RawPacket};

/// Vendor defined raw HID report, the same usage page/usage is matched by the host daemon
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = 0xFF60, usage = 0x61) = {
        (usage = 0x62, logical_min = 0x0) = {
            #[item_settings(data,variable,absolute)] input_data=input;
        };
        (usage = 0x63, logical_min = 0x0) = {
            #[item_settings(data,variable,absolute)] output_data=output;
        };
    }
)]
#[derive(Default)]
pub struct RawScrollReport {
    pub input_data: [u8; 32],
    pub output_data: [u8; 32],
}

/// Create the usb builder.
///
/// The descriptor buffers are static, so this function should be called only once.
pub fn new_usb_builder<'d, D: Driver<'d>>(driver: D, usb_config: UsbConfig<'d>) -> Builder<'d, D> {
    // Create embassy-usb Config
    let mut config = embassy_usb::Config::new(usb_config.vid, usb_config.pid);
    config.manufacturer = Some(usb_config.manufacturer);
    config.product = Some(usb_config.product_name);
    config.serial_number = Some(usb_config.serial_number);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    const USB_BUF_SIZE: usize = 128;

    // Create embassy-usb DeviceBuilder using the driver and config.
    static CONFIG_DESC: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; USB_BUF_SIZE]> = StaticCell::new();

    Builder::new(
        driver,
        config,
        &mut CONFIG_DESC.init([0; USB_BUF_SIZE])[..],
        &mut BOS_DESC.init([0; 16])[..],
        &mut MSOS_DESC.init([0; 16])[..],
        &mut CONTROL_BUF.init([0; USB_BUF_SIZE])[..],
    )
}

/// Add the raw HID interface to the builder, returns the reader and the writer of the packet channel.
pub fn add_raw_hid<'d, D: Driver<'d>>(
    builder: &mut Builder<'d, D>,
    state: &'d mut State<'d>,
) -> (UsbRawHidReader<'d, D>, UsbRawHidWriter<'d, D>) {
    let hid_config = Config {
        report_descriptor: RawScrollReport::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: PACKET_SIZE as u16,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };
    let rw: HidReaderWriter<'d, D, PACKET_SIZE, PACKET_SIZE> = HidReaderWriter::new(builder, state, hid_config);
    let (reader, writer) = rw.split();
    (UsbRawHidReader { reader }, UsbRawHidWriter { writer })
}

pub struct UsbRawHidReader<'d, D: Driver<'d>> {
    reader: HidReader<'d, D, PACKET_SIZE>,
}

impl<'d, D: Driver<'d>> HidReaderTrait for UsbRawHidReader<'d, D> {
    type ReportType = RawPacket;

    async fn read_report(&mut self) -> Result<Self::ReportType, HidError> {
        let mut buf = [0u8; PACKET_SIZE];
        let n = self.reader.read(&mut buf).await.map_err(HidError::UsbReadError)?;
        trace!("Received raw hid packet: {:?}", &buf[..n]);
        Ok(RawPacket::new(buf, n))
    }
}

pub struct UsbRawHidWriter<'d, D: Driver<'d>> {
    writer: HidWriter<'d, D, PACKET_SIZE>,
}

impl<'d, D: Driver<'d>> HidWriterTrait for UsbRawHidWriter<'d, D> {
    type ReportType = ScrollReport;

    async fn write_report(&mut self, report: Self::ReportType) -> Result<usize, HidError> {
        self.writer
            .write(&report.to_bytes())
            .await
            .map_err(HidError::UsbEndpointError)?;
        Ok(PACKET_SIZE)
    }
}
