//! Windows Hello binding through WinRT `KeyCredentialManager`.
//!
//! Every WinRT call here returns an `IAsyncOperation`; we block on it with
//! `.get()` since the flow is strictly sequential.

use crate::domain::models::{CredentialName, PlatformStatus};
use crate::services::platform::{CredentialPlatform, Retrieval, SignResult};
use windows::core::{Array, HSTRING};
use windows::Security::Credentials::{KeyCredential, KeyCredentialManager, KeyCredentialStatus};
use windows::Security::Cryptography::CryptographicBuffer;

#[derive(Debug, Default)]
pub struct WindowsHello;

fn map_status(status: KeyCredentialStatus) -> PlatformStatus {
    match status {
        KeyCredentialStatus::Success => PlatformStatus::Success,
        KeyCredentialStatus::NotFound => PlatformStatus::NotFound,
        KeyCredentialStatus::UserCanceled => PlatformStatus::UserCanceled,
        KeyCredentialStatus::UserPrefersPassword => PlatformStatus::UserPrefersPassword,
        KeyCredentialStatus::CredentialAlreadyExists => PlatformStatus::CredentialAlreadyExists,
        KeyCredentialStatus::SecurityDeviceLocked => PlatformStatus::SecurityDeviceLocked,
        other => {
            tracing::debug!(raw = other.0, "unmapped KeyCredentialStatus");
            PlatformStatus::UnknownError
        }
    }
}

impl CredentialPlatform for WindowsHello {
    type Credential = KeyCredential;

    fn is_supported(&self) -> anyhow::Result<bool> {
        Ok(KeyCredentialManager::IsSupportedAsync()?.get()?)
    }

    fn open_credential(&self, name: &CredentialName) -> anyhow::Result<Retrieval<KeyCredential>> {
        let result = KeyCredentialManager::OpenAsync(&HSTRING::from(name.as_str()))?.get()?;
        let status = map_status(result.Status()?);
        if !status.is_success() {
            return Ok(Retrieval::failed(status));
        }
        Ok(Retrieval::found(result.Credential()?))
    }

    fn request_sign(
        &self,
        credential: &KeyCredential,
        challenge: &[u8],
    ) -> anyhow::Result<SignResult> {
        let buffer = CryptographicBuffer::CreateFromByteArray(challenge)?;
        let result = credential.RequestSignAsync(&buffer)?.get()?;
        let status = map_status(result.Status()?);
        if !status.is_success() {
            return Ok(SignResult::failed(status));
        }
        let mut signature = Array::<u8>::new();
        CryptographicBuffer::CopyToByteArray(&result.Result()?, &mut signature)?;
        Ok(SignResult::signed(signature.to_vec()))
    }
}
