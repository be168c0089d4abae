use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: hello-auth credential_key_name

This program authenticates the current user with the platform biometric/PIN
prompt and writes a signature of the input read from stdin to stdout.
The input is signed by the private key associated with 'credential_key_name'.";

#[derive(Parser, Debug)]
#[command(
    name = "hello-auth",
    version,
    about = "Sign stdin with a biometric/PIN-protected platform credential"
)]
pub struct Cli {
    #[arg(
        allow_hyphen_values = true,
        help = "Name of the enrolled credential to sign with"
    )]
    pub credential_name: Option<String>,
    /// Anything after the name is ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
    #[arg(long, help = "Report the outcome as a JSON envelope")]
    pub json: bool,
    #[arg(long, help = "Config file (default: ~/.config/hello-auth/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, help = "Credential provider, overrides the config file")]
    pub provider: Option<ProviderKind>,
    #[arg(long, value_enum, help = "How stdin is turned into the bytes to sign")]
    pub input_encoding: Option<InputEncoding>,
    #[arg(
        long,
        default_value_t = false,
        help = "Report sign failures from the lookup status (historical exit code 171)"
    )]
    pub legacy_sign_status: bool,
    #[arg(short, long, help = "Debug logging on stderr")]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Native credential subsystem (Windows Hello).
    #[default]
    Platform,
    /// ed25519 keys stored on disk.
    Software,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    #[default]
    Raw,
    Utf8,
}
