//! Data-only types shared by the command and service layers.
//!
//! ## Files
//! - `models.rs` — credential name, challenge, platform status, outcome, JSON envelopes.
//! - `exit_code.rs` — the numeric exit-code contract and its messages.
//!
//! No filesystem or platform side effects live here.

pub mod exit_code;
pub mod models;
