//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `platform.rs` — the credential platform trait and the unavailable stand-in.
//! - `windows_hello.rs` — WinRT `KeyCredentialManager` binding (Windows only).
//! - `software.rs` — file-backed ed25519 credentials.
//! - `verify.rs` — capability check, lookup, sign.
//! - `config.rs` — config file discovery and parsing.
//! - `storage.rs` — audit log.
//! - `output.rs` — signature/failure output, raw or JSON.

pub mod config;
pub mod output;
pub mod platform;
pub mod software;
pub mod storage;
pub mod verify;
#[cfg(windows)]
pub mod windows_hello;

#[cfg(windows)]
pub type NativePlatform = windows_hello::WindowsHello;
#[cfg(not(windows))]
pub type NativePlatform = platform::Unavailable;
