//! Exit-code contract.
//!
//! These numbers are consumed by other tools (password managers, agents) that
//! branch on the process status. Never renumber a variant. 174 is the slot the
//! platform's own success status would occupy in the 171.. sequence and stays
//! out of the normal mapping.

use crate::domain::models::{CredentialName, PlatformStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Usage = 1,
    Unsupported = 170,
    CredentialExists = 171,
    NotFound = 172,
    DeviceLocked = 173,
    UnknownError = 175,
    UserCanceled = 176,
    UserPrefersPassword = 177,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_platform_status(status: PlatformStatus) -> Self {
        match status {
            PlatformStatus::Success => ExitStatus::Success,
            PlatformStatus::CredentialAlreadyExists => ExitStatus::CredentialExists,
            PlatformStatus::NotFound => ExitStatus::NotFound,
            PlatformStatus::SecurityDeviceLocked => ExitStatus::DeviceLocked,
            PlatformStatus::UnknownError => ExitStatus::UnknownError,
            PlatformStatus::UserCanceled => ExitStatus::UserCanceled,
            PlatformStatus::UserPrefersPassword => ExitStatus::UserPrefersPassword,
        }
    }

    /// What the historical build reported for any sign failure: it translated
    /// the lookup status, always Success by then, as `171 + ordinal`, and
    /// Success is ordinal 0 in `KeyCredentialStatus`.
    pub fn legacy_sign_failure() -> Self {
        ExitStatus::CredentialExists
    }

    /// Stable identifier used in `--json` error envelopes.
    pub fn kind(self) -> &'static str {
        match self {
            ExitStatus::Success => "SUCCESS",
            ExitStatus::Usage => "USAGE",
            ExitStatus::Unsupported => "UNSUPPORTED",
            ExitStatus::CredentialExists => "CREDENTIAL_EXISTS",
            ExitStatus::NotFound => "CREDENTIAL_NOT_FOUND",
            ExitStatus::DeviceLocked => "DEVICE_LOCKED",
            ExitStatus::UnknownError => "UNKNOWN_ERROR",
            ExitStatus::UserCanceled => "USER_CANCELED",
            ExitStatus::UserPrefersPassword => "USER_PREFERS_PASSWORD",
        }
    }

    pub fn message(self, name: &CredentialName) -> String {
        message_for_code(self.code(), name)
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Human-readable line for a raw exit code. Total over `u8`.
pub fn message_for_code(code: u8, name: &CredentialName) -> String {
    match code {
        0 => "Success.".to_string(),
        1 => "Invalid invocation.".to_string(),
        170 => "Biometric credential support is not available on this device.".to_string(),
        171 => "The credential already exists. Creation failed.".to_string(),
        172 => format!("The credential '{}' does not exist.", name),
        173 => "The security device is locked.".to_string(),
        175 => "Unknown error.".to_string(),
        176 => "The user cancelled.".to_string(),
        177 => "The user prefers to enter a password. Aborted.".to_string(),
        _ => "Unknown internal error.".to_string(),
    }
}
