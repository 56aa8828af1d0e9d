//! Frame pacer: a tokio-driven stand-in for a vsync callback.
//!
//! Deadlines sit on a fixed grid of `1 / refresh_hz`. If the host falls behind,
//! missed refreshes are skipped rather than queued, so a slow frame shows up as
//! a dropped refresh and never as a burst of catch-up draws.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use crate::render_loop::{RefreshHandle, RefreshScheduler};

#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    next_id: u64,
    pending: Option<RefreshHandle>,
    last_deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(refresh_hz: u32) -> Self {
        let hz = refresh_hz.max(1) as u64;
        Self {
            period: Duration::from_nanos(1_000_000_000 / hz),
            next_id: 0,
            pending: None,
            last_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn pending(&self) -> Option<RefreshHandle> {
        self.pending
    }

    /// Next deadline on the refresh grid that is not in the past.
    fn next_deadline(&self, now: Instant) -> Instant {
        let Some(last) = self.last_deadline else {
            return now;
        };
        let mut next = last + self.period;
        if next < now {
            let behind = now.duration_since(next).as_nanos();
            let skip = behind / self.period.as_nanos() + 1;
            next += self.period * skip as u32;
        }
        next
    }

    /// Wait for the next refresh and hand back the pending request.
    ///
    /// Returns `None` straight away when nothing is scheduled.
    pub async fn next_refresh(&mut self) -> Option<RefreshHandle> {
        let handle = self.pending?;
        let deadline = self.next_deadline(Instant::now());
        sleep_until(deadline).await;
        self.last_deadline = Some(deadline);
        // A cancel cannot interleave here: the pacer is borrowed mutably.
        self.pending.take().filter(|h| *h == handle)
    }

    /// Sleep one refresh period. Used by hosts while the overlay is idle.
    pub async fn idle(&mut self) {
        tokio::time::sleep(self.period).await;
    }
}

impl RefreshScheduler for FramePacer {
    fn request_refresh(&mut self) -> RefreshHandle {
        self.next_id += 1;
        let handle = RefreshHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_refresh(&mut self, handle: RefreshHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
