use crate::domain::exit_code::ExitStatus;
use crate::domain::models::{AuditEntry, Challenge, CredentialName};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;

pub fn audit_entry(
    name: &CredentialName,
    challenge: &Challenge,
    status: ExitStatus,
) -> AuditEntry {
    AuditEntry {
        ts: unix_now(),
        credential: name.as_str().to_string(),
        code: status.code(),
        challenge_sha256: hex::encode(Sha256::digest(challenge.as_bytes())),
        challenge_len: challenge.len(),
    }
}

/// Appends one JSON line. Failures are logged, never surfaced.
pub fn audit(path: &Path, entry: &AuditEntry) {
    if let Err(e) = append_line(path, entry) {
        tracing::warn!(error = %e, path = %path.display(), "audit write failed");
    }
}

fn append_line(path: &Path, entry: &AuditEntry) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let line = format!("{}\n", serde_json::to_string(entry)?);
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .write_all(line.as_bytes())?;
    Ok(())
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_appends_digest_not_challenge() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("nested/audit.jsonl");
        let name = CredentialName::new("main").expect("valid name");
        let challenge = Challenge::new(b"top secret".to_vec());

        audit(&path, &audit_entry(&name, &challenge, ExitStatus::Success));
        audit(&path, &audit_entry(&name, &challenge, ExitStatus::UserCanceled));

        let raw = std::fs::read_to_string(&path).expect("read audit");
        assert!(!raw.contains("top secret"));
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["credential"], "main");
        assert_eq!(lines[0]["code"], 0);
        assert_eq!(lines[1]["code"], 176);
        assert_eq!(lines[0]["challenge_len"], 10);
        assert_eq!(
            lines[0]["challenge_sha256"],
            hex::encode(Sha256::digest(b"top secret"))
        );
    }
}
