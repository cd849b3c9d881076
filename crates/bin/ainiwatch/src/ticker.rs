//! Tokio-backed [`Ticker`].

use std::time::Duration;

use aini_app::ports::Ticker;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fires once per period, starting one period after creation.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
