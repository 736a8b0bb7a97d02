use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Ticker};

use crate::channel::KEY_EVENT_CHANNEL;
use crate::codec::ScrollReport;
use crate::hid::HidWriterTrait;
use crate::state::ScrollState;

/// The poll loop of the scroll keys.
///
/// Key events and ticks are handled in the order they arrive. Reports are written to the host after the state lock
/// is released.
pub struct ScrollProcessor<'a, W: HidWriterTrait<ReportType = ScrollReport>> {
    state: &'a ScrollState,
    writer: W,
    /// Period of the tick, should be <= the smallest interval
    tick_interval: Duration,
}

impl<'a, W: HidWriterTrait<ReportType = ScrollReport>> ScrollProcessor<'a, W> {
    pub fn new(state: &'a ScrollState, writer: W, tick_interval: Duration) -> Self {
        Self {
            state,
            writer,
            tick_interval,
        }
    }

    pub async fn run(&mut self) {
        let mut ticker = Ticker::every(self.tick_interval);
        loop {
            let report = match select(KEY_EVENT_CHANNEL.receive(), ticker.next()).await {
                Either::First(event) => {
                    debug!("Scroll key event: {:?}", event);
                    self.state.process_key_event(event, Instant::now())
                }
                Either::Second(_) => self.state.on_tick(Instant::now()),
            };
            if let Some(report) = report {
                self.send_report(report).await;
            }
        }
    }

    async fn send_report(&mut self, report: ScrollReport) {
        trace!("Sending scroll report: {:?}", report);
        if let Err(e) = self.writer.write_report(report).await {
            error!("Send scroll report error: {:?}", e);
        }
    }
}
