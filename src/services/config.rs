use crate::domain::models::ConfigFile;
use std::path::{Path, PathBuf};

pub fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
    Ok(PathBuf::from(home))
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(".config/hello-auth"))
}

pub fn default_key_dir() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("keys"))
}

pub fn audit_log_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("audit.jsonl"))
}

/// Loads the config file. An explicit path must exist; the default path is
/// optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let Ok(dir) = config_dir() else {
                return Ok(ConfigFile::default());
            };
            let p = dir.join("config.toml");
            if !p.exists() {
                return Ok(ConfigFile::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
    parse_config(&raw).map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

pub fn parse_config(raw: &str) -> anyhow::Result<ConfigFile> {
    Ok(toml::from_str(raw)?)
}
