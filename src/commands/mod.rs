//! Command handler layer.
//!
//! Owns stdin/stdout and turns a verification outcome into output plus an
//! exit status. Business logic lives in `services/*`.
//!
//! ## Files
//! - `sign.rs` — the verify-and-sign command.

pub mod sign;

pub use sign::{handle_parse_error, handle_sign};
