//! Browser timer backing the poll scheduler.

use std::time::Duration;

use aini_app::ports::Ticker;
use gloo_timers::future::TimeoutFuture;

/// Sleeps one period per tick on the browser event loop.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutTicker {
    period_ms: u32,
}

impl TimeoutTicker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period_ms: u32::try_from(period.as_millis()).unwrap_or(u32::MAX),
        }
    }
}

impl Ticker for TimeoutTicker {
    async fn tick(&mut self) {
        TimeoutFuture::new(self.period_ms).await;
    }
}
