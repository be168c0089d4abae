//! Verify-and-sign flow: capability check, credential lookup, sign request.
//!
//! Each platform call happens at most once and the first failure ends the
//! run. Nothing is retried; a cancelled or locked prompt goes back to the
//! caller as its exit code.

use crate::domain::exit_code::ExitStatus;
use crate::domain::models::{Challenge, CredentialName, VerificationOutcome};
use crate::services::platform::CredentialPlatform;

#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyOptions {
    /// Translate a sign failure from the lookup status instead of the sign
    /// status. Reproduces the historical exit code 171.
    pub legacy_sign_status: bool,
}

pub fn verify_and_sign<P: CredentialPlatform>(
    platform: &P,
    name: &CredentialName,
    challenge: Challenge,
    options: VerifyOptions,
) -> VerificationOutcome {
    match platform.is_supported() {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!("credential platform not supported on this device");
            return VerificationOutcome::failure(ExitStatus::Unsupported, name);
        }
        Err(e) => {
            tracing::error!(error = %e, "capability check failed");
            return VerificationOutcome::failure(ExitStatus::UnknownError, name);
        }
    }

    let retrieval = match platform.open_credential(name) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, credential = %name, "credential lookup failed");
            return VerificationOutcome::failure(ExitStatus::UnknownError, name);
        }
    };
    if !retrieval.status.is_success() {
        tracing::warn!(
            status = ?retrieval.status,
            credential = %name,
            "credential lookup rejected"
        );
        return VerificationOutcome::failure(
            ExitStatus::from_platform_status(retrieval.status),
            name,
        );
    }
    let Some(credential) = retrieval.credential else {
        tracing::error!(credential = %name, "platform reported success without a credential");
        return VerificationOutcome::failure(ExitStatus::UnknownError, name);
    };
    tracing::debug!(credential = %name, len = challenge.len(), "requesting signature");

    let signed = match platform.request_sign(&credential, challenge.as_bytes()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, credential = %name, "sign request failed");
            return VerificationOutcome::failure(ExitStatus::UnknownError, name);
        }
    };
    if !signed.status.is_success() {
        tracing::warn!(status = ?signed.status, credential = %name, "sign request rejected");
        let code = if options.legacy_sign_status {
            ExitStatus::legacy_sign_failure()
        } else {
            ExitStatus::from_platform_status(signed.status)
        };
        return VerificationOutcome::failure(code, name);
    }

    match signed.signature {
        Some(bytes) => {
            tracing::debug!(len = bytes.len(), "signature received");
            VerificationOutcome::Signature(bytes)
        }
        None => {
            tracing::error!(credential = %name, "platform reported success without a signature");
            VerificationOutcome::failure(ExitStatus::UnknownError, name)
        }
    }
}
