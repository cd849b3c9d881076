//! # aini-adapter-http-reqwest
//!
//! Native HTTP adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `StatusApi` port defined in `aini-app::ports::status_api`
//! - Own the HTTP client (connection pool, request timeout, base URL)
//! - Classify failures into transport, decode and application errors
//!
//! ## Dependency rule
//! Depends on `aini-app` (for port traits) and `aini-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod client;
pub mod error;

pub use client::{Config, ReqwestStatusApi};
pub use error::HttpError;
