#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use ed25519_dalek::{Signature, SigningKey, Verifier};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SEED: [u8; 32] = [42u8; 32];

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub key_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let key_dir = home.join(".config/hello-auth/keys");
        fs::create_dir_all(&key_dir).expect("create key dir");
        Self {
            _tmp: tmp,
            home,
            key_dir,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hello-auth");
        cmd.env("HOME", &self.home)
            .env("USERPROFILE", &self.home)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Command preset to the on-disk provider.
    pub fn software(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--provider", "software"]);
        cmd
    }

    pub fn write_key(&self, name: &str) {
        fs::write(self.key_dir.join(format!("{}.key", name)), hex::encode(SEED))
            .expect("write key");
    }

    pub fn lock_key(&self, name: &str) {
        fs::write(self.key_dir.join(format!("{}.locked", name)), "").expect("write lock marker");
    }

    pub fn write_config(&self, body: &str) {
        fs::write(self.home.join(".config/hello-auth/config.toml"), body).expect("write config");
    }

    pub fn audit_log(&self) -> PathBuf {
        self.home.join(".config/hello-auth/audit.jsonl")
    }
}

pub fn assert_signed(message: &[u8], signature: &[u8]) {
    let sig = Signature::from_slice(signature).expect("64-byte signature");
    let public = SigningKey::from_bytes(&SEED).verifying_key();
    public
        .verify(message, &sig)
        .expect("signature verifies against the stored key");
}
