//! File-backed ed25519 credentials for hosts without Windows Hello.
//!
//! Layout under `key_dir`:
//! - `<name>.key` — hex-encoded 32-byte ed25519 seed.
//! - `<name>.locked` — optional marker; the credential reports a locked device.
//!
//! Enrollment is out of scope: keys are provisioned by other tooling.

use crate::domain::models::{CredentialName, PlatformStatus};
use crate::services::platform::{CredentialPlatform, Retrieval, SignResult};
use ed25519_dalek::{Signer, SigningKey};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum KeystoreError {
    #[error("key file {0} is not valid hex")]
    NotHex(PathBuf),
    #[error("key file {path} holds {len} bytes, expected 32")]
    BadLength { path: PathBuf, len: usize },
}

#[derive(Debug, Clone)]
pub struct SoftwareKeystore {
    key_dir: PathBuf,
}

pub struct SoftwareCredential {
    key: SigningKey,
}

impl SoftwareKeystore {
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        Self {
            key_dir: key_dir.into(),
        }
    }

    fn entry_path(&self, name: &CredentialName, ext: &str) -> Option<PathBuf> {
        let raw = name.as_str();
        if raw.contains(['/', '\\']) || raw == "." || raw == ".." || raw.contains('\0') {
            return None;
        }
        Some(self.key_dir.join(format!("{}.{}", raw, ext)))
    }
}

fn read_signing_key(path: &Path) -> anyhow::Result<SigningKey> {
    let raw = std::fs::read_to_string(path)?;
    let bytes = hex::decode(raw.trim()).map_err(|_| KeystoreError::NotHex(path.to_path_buf()))?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeystoreError::BadLength {
            path: path.to_path_buf(),
            len: bytes.len(),
        })?;
    Ok(SigningKey::from_bytes(&seed))
}

impl CredentialPlatform for SoftwareKeystore {
    type Credential = SoftwareCredential;

    fn is_supported(&self) -> anyhow::Result<bool> {
        Ok(self.key_dir.is_dir())
    }

    fn open_credential(
        &self,
        name: &CredentialName,
    ) -> anyhow::Result<Retrieval<SoftwareCredential>> {
        let (Some(key_path), Some(lock_path)) =
            (self.entry_path(name, "key"), self.entry_path(name, "locked"))
        else {
            return Ok(Retrieval::failed(PlatformStatus::NotFound));
        };
        if !key_path.is_file() {
            return Ok(Retrieval::failed(PlatformStatus::NotFound));
        }
        if lock_path.exists() {
            return Ok(Retrieval::failed(PlatformStatus::SecurityDeviceLocked));
        }
        match read_signing_key(&key_path) {
            Ok(key) => Ok(Retrieval::found(SoftwareCredential { key })),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable software credential");
                Ok(Retrieval::failed(PlatformStatus::UnknownError))
            }
        }
    }

    fn request_sign(
        &self,
        credential: &SoftwareCredential,
        challenge: &[u8],
    ) -> anyhow::Result<SignResult> {
        let sig = credential.key.sign(challenge);
        Ok(SignResult::signed(sig.to_bytes().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};
    use tempfile::TempDir;

    const SEED: [u8; 32] = [7u8; 32];

    fn store_with_key(name: &str) -> (TempDir, SoftwareKeystore) {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::write(tmp.path().join(format!("{}.key", name)), hex::encode(SEED))
            .expect("write key");
        let store = SoftwareKeystore::new(tmp.path());
        (tmp, store)
    }

    fn name(raw: &str) -> CredentialName {
        CredentialName::new(raw).expect("valid name")
    }

    #[test]
    fn supported_only_when_key_dir_exists() {
        let (tmp, store) = store_with_key("main");
        assert!(store.is_supported().expect("query"));
        let missing = SoftwareKeystore::new(tmp.path().join("nope"));
        assert!(!missing.is_supported().expect("query"));
    }

    #[test]
    fn missing_key_is_not_found() {
        let (_tmp, store) = store_with_key("main");
        let r = store.open_credential(&name("other")).expect("lookup");
        assert_eq!(r.status, PlatformStatus::NotFound);
        assert!(r.credential.is_none());
    }

    #[test]
    fn path_like_names_never_leave_key_dir() {
        let (tmp, store) = store_with_key("main");
        let nested = tmp.path().join("sub");
        std::fs::create_dir_all(&nested).expect("mkdir");
        let store_nested = SoftwareKeystore::new(&nested);
        for raw in ["../main", "..", "a/b", "a\\b"] {
            let r = store_nested.open_credential(&name(raw)).expect("lookup");
            assert_eq!(r.status, PlatformStatus::NotFound, "{}", raw);
        }
        assert_eq!(
            store.open_credential(&name("main")).expect("lookup").status,
            PlatformStatus::Success
        );
    }

    #[test]
    fn lock_marker_reports_locked_device() {
        let (tmp, store) = store_with_key("main");
        std::fs::write(tmp.path().join("main.locked"), "").expect("write marker");
        let r = store.open_credential(&name("main")).expect("lookup");
        assert_eq!(r.status, PlatformStatus::SecurityDeviceLocked);
    }

    #[test]
    fn malformed_key_is_unknown_error() {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::write(tmp.path().join("short.key"), "abcd").expect("write key");
        std::fs::write(tmp.path().join("junk.key"), "not hex at all").expect("write key");
        let store = SoftwareKeystore::new(tmp.path());
        for raw in ["short", "junk"] {
            let r = store.open_credential(&name(raw)).expect("lookup");
            assert_eq!(r.status, PlatformStatus::UnknownError, "{}", raw);
        }
    }

    #[test]
    fn signature_verifies_against_seed_public_key() {
        let (_tmp, store) = store_with_key("main");
        let cred = store
            .open_credential(&name("main"))
            .expect("lookup")
            .credential
            .expect("credential");
        let res = store.request_sign(&cred, b"challenge").expect("sign");
        assert_eq!(res.status, PlatformStatus::Success);
        let bytes = res.signature.expect("signature");
        assert_eq!(bytes.len(), 64);
        let sig = Signature::from_slice(&bytes).expect("64 bytes");
        let public = SigningKey::from_bytes(&SEED).verifying_key();
        assert!(public.verify(b"challenge", &sig).is_ok());
    }
}
