//! Ticker port — the recurring timer behind background polling.

use std::future::Future;

/// A periodic timer.
///
/// Each call to [`tick`](Self::tick) resolves once the next period has elapsed.
/// The first tick must not fire immediately: the scheduler performs its own
/// initial fetch on activation.
pub trait Ticker {
    fn tick(&mut self) -> impl Future<Output = ()>;
}
