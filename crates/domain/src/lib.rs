//! # aini-domain
//!
//! Pure domain model for the AINI dashboard.
//!
//! ## Responsibilities
//! - Define the two managed **servers** (`app`, `gpu`) and their derived running state
//! - Define the two external **services** (`consul`, `s3`) and their availability
//! - Define the **wire payloads** of the status, settings and action endpoints
//! - Contain the derivation rule that turns a raw status response into UI state
//! - Error conventions shared by every layer ([`error::FetchError`], [`error::ActionError`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod action;
pub mod server;
pub mod service;
pub mod settings;
pub mod status;
