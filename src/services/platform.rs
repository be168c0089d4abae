use crate::domain::models::{CredentialName, PlatformStatus};

/// Result of looking up a credential: the platform status and, on success,
/// a handle that can be asked to sign.
#[derive(Debug)]
pub struct Retrieval<C> {
    pub status: PlatformStatus,
    pub credential: Option<C>,
}

impl<C> Retrieval<C> {
    pub fn found(credential: C) -> Self {
        Self {
            status: PlatformStatus::Success,
            credential: Some(credential),
        }
    }

    pub fn failed(status: PlatformStatus) -> Self {
        Self {
            status,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignResult {
    pub status: PlatformStatus,
    pub signature: Option<Vec<u8>>,
}

impl SignResult {
    pub fn signed(signature: Vec<u8>) -> Self {
        Self {
            status: PlatformStatus::Success,
            signature: Some(signature),
        }
    }

    pub fn failed(status: PlatformStatus) -> Self {
        Self {
            status,
            signature: None,
        }
    }
}

/// The credential subsystem as seen by the orchestrator.
///
/// Each call may block while the platform shows its own prompt. An `Err`
/// means the call itself could not be made; statuses the platform reports
/// come back inside `Ok`.
pub trait CredentialPlatform {
    type Credential;

    fn is_supported(&self) -> anyhow::Result<bool>;

    fn open_credential(
        &self,
        name: &CredentialName,
    ) -> anyhow::Result<Retrieval<Self::Credential>>;

    fn request_sign(
        &self,
        credential: &Self::Credential,
        challenge: &[u8],
    ) -> anyhow::Result<SignResult>;
}

/// Stand-in for hosts without a native credential subsystem.
#[cfg_attr(windows, allow(dead_code))]
#[derive(Debug, Default)]
pub struct Unavailable;

impl CredentialPlatform for Unavailable {
    type Credential = ();

    fn is_supported(&self) -> anyhow::Result<bool> {
        Ok(false)
    }

    fn open_credential(&self, _name: &CredentialName) -> anyhow::Result<Retrieval<()>> {
        Ok(Retrieval::failed(PlatformStatus::UnknownError))
    }

    fn request_sign(&self, _credential: &(), _challenge: &[u8]) -> anyhow::Result<SignResult> {
        Ok(SignResult::failed(PlatformStatus::UnknownError))
    }
}
