//! Keyboard reports waiting for the USB endpoint.
//!
//! The layout produces a report every tick but the host only polls the
//! interrupt endpoint every few milliseconds, so a write can fail with
//! `WouldBlock`. Every distinct report is queued and written in order, so a
//! tap that lasted one tick still reaches the host, followed by its release.

use keyberon::key_code::KbHidReport;

use crate::config::REPORT_QUEUE_LEN;

#[derive(Debug)]
pub struct ReportQueue {
    pending: [KbHidReport; REPORT_QUEUE_LEN],
    head: usize,
    len: usize,
    /// Newest queued report, or the last written one when nothing is queued.
    last: KbHidReport,
}

impl Default for ReportQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportQueue {
    pub fn new() -> Self {
        Self {
            pending: core::array::from_fn(|_| KbHidReport::default()),
            head: 0,
            len: 0,
            last: KbHidReport::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Queues `report` unless it is the same as the newest one.
    ///
    /// When the queue is full the newest entry is replaced, so the host
    /// always ends up with the latest state.
    pub fn push(&mut self, report: KbHidReport) {
        if report == self.last {
            return;
        }
        self.last = report.clone();
        if self.len == REPORT_QUEUE_LEN {
            let newest = (self.head + self.len - 1) % REPORT_QUEUE_LEN;
            self.pending[newest] = report;
        } else {
            self.pending[(self.head + self.len) % REPORT_QUEUE_LEN] = report;
            self.len += 1;
        }
    }

    /// Writes queued reports in order until `write` fails or accepts
    /// nothing. The report being written stays queued until `write` returns
    /// a non zero length.
    pub fn flush<E>(
        &mut self,
        mut write: impl FnMut(&KbHidReport) -> Result<usize, E>,
    ) -> Result<(), E> {
        while self.len > 0 {
            if write(&self.pending[self.head])? == 0 {
                break;
            }
            self.head = (self.head + 1) % REPORT_QUEUE_LEN;
            self.len -= 1;
        }
        Ok(())
    }

    /// Forgets everything, the host starts from an empty report after it
    /// (re)configures the device.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
        self.last = KbHidReport::default();
    }
}
