use embassy_sync::channel::Channel;
use smooth_scroll::RawMutex;
use smooth_scroll::codec::ScrollReport;
use smooth_scroll::hid::{HidError, HidReaderTrait, HidWriterTrait, RawPacket};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub type PacketChannel = Channel<RawMutex, RawPacket, 4>;
pub type ReportChannel = Channel<RawMutex, ScrollReport, 16>;

/// Host -> device side of the packet channel, packets are queued by the test
pub struct TestReader<'a> {
    pub packets: &'a PacketChannel,
}

impl HidReaderTrait for TestReader<'_> {
    type ReportType = RawPacket;

    async fn read_report(&mut self) -> Result<RawPacket, HidError> {
        Ok(self.packets.receive().await)
    }
}

/// Device -> host side of the packet channel, every written report ends up in the channel
pub struct TestWriter<'a> {
    pub reports: &'a ReportChannel,
}

impl HidWriterTrait for TestWriter<'_> {
    type ReportType = ScrollReport;

    async fn write_report(&mut self, report: ScrollReport) -> Result<usize, HidError> {
        self.reports.send(report).await;
        Ok(32)
    }
}
