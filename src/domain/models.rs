use crate::cli::{InputEncoding, ProviderKind};
use crate::domain::exit_code::ExitStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Name of an enrolled credential, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialName(String);

impl CredentialName {
    pub fn new(raw: impl Into<String>) -> Result<Self, InputError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InputError::EmptyCredentialName);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bytes to be signed. Consumed by the sign step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge(Vec<u8>);

impl Challenge {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Outcome reported by the credential subsystem for a lookup or a sign
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformStatus {
    Success,
    UnknownError,
    NotFound,
    UserCanceled,
    UserPrefersPassword,
    CredentialAlreadyExists,
    SecurityDeviceLocked,
}

impl PlatformStatus {
    #[cfg(test)]
    pub const ALL: [PlatformStatus; 7] = [
        PlatformStatus::Success,
        PlatformStatus::UnknownError,
        PlatformStatus::NotFound,
        PlatformStatus::UserCanceled,
        PlatformStatus::UserPrefersPassword,
        PlatformStatus::CredentialAlreadyExists,
        PlatformStatus::SecurityDeviceLocked,
    ];

    pub fn is_success(self) -> bool {
        self == PlatformStatus::Success
    }
}

/// The single result of one verify-and-sign run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Signature(Vec<u8>),
    Failure { code: ExitStatus, message: String },
}

impl VerificationOutcome {
    pub fn failure(code: ExitStatus, name: &CredentialName) -> Self {
        VerificationOutcome::Failure {
            code,
            message: code.message(name),
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            VerificationOutcome::Signature(_) => ExitStatus::Success,
            VerificationOutcome::Failure { code, .. } => *code,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("credential name must not be empty")]
    EmptyCredentialName,
    #[error("input is not valid UTF-8 text")]
    InvalidUtf8,
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: u8,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct SignatureReport {
    pub credential: CredentialName,
    /// Hex-encoded raw signature.
    pub signature: String,
}

#[derive(Serialize)]
pub struct AuditEntry {
    pub ts: u64,
    pub credential: String,
    pub code: u8,
    pub challenge_sha256: String,
    pub challenge_len: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub software: SoftwareConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub input_encoding: InputEncoding,
    #[serde(default)]
    pub legacy_sign_status: bool,
    #[serde(default)]
    pub audit: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct SoftwareConfig {
    /// Defaults to `<config dir>/keys` when unset.
    pub key_dir: Option<PathBuf>,
}
