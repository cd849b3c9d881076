//! # aini-app
//!
//! Application layer — dashboard use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusApi` — the three backend calls (status, settings, start/stop)
//!   - `Ticker` — the recurring timer that paces background polling
//! - Own the per-view state container (`DashboardSession`) and its teardown rule
//! - Provide the use-cases the view drives:
//!   - `StatusClient` — fetch and derive server/service state
//!   - `PollScheduler` — initial load, silent 30s refresh, manual refresh
//!   - `ActionDispatcher` — start/stop a server, then resynchronize
//!
//! ## Concurrency model
//! Everything runs on one execution context (the browser event loop, or a tokio
//! `LocalSet` natively). State is `Rc`/`RefCell` based and futures are not `Send`.
//!
//! ## Dependency rule
//! Depends on `aini-domain` only (plus `futures` for cancellation).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
