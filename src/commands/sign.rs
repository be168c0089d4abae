use crate::cli::{Cli, InputEncoding, ProviderKind, USAGE};
use crate::domain::exit_code::ExitStatus;
use crate::domain::models::{
    Challenge, ConfigFile, CredentialName, InputError, VerificationOutcome,
};
use crate::services::config::{audit_log_path, default_key_dir, load_config};
use crate::services::output::{write_failure, write_signature};
use crate::services::platform::CredentialPlatform;
use crate::services::software::SoftwareKeystore;
use crate::services::storage::{audit, audit_entry};
use crate::services::verify::{verify_and_sign, VerifyOptions};
use crate::services::NativePlatform;
use clap::error::ErrorKind;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Flags and config merged; CLI wins.
#[derive(Debug, Clone)]
pub struct Settings {
    pub json: bool,
    pub provider: ProviderKind,
    pub input_encoding: InputEncoding,
    pub legacy_sign_status: bool,
    pub key_dir: Option<PathBuf>,
    pub audit_path: Option<PathBuf>,
}

pub fn resolve_settings(cli: &Cli, cfg: &ConfigFile) -> anyhow::Result<Settings> {
    let key_dir = match &cfg.software.key_dir {
        Some(d) => Some(d.clone()),
        None => default_key_dir().ok(),
    };
    let audit_path = if cfg.general.audit {
        Some(audit_log_path()?)
    } else {
        None
    };
    Ok(Settings {
        json: cli.json,
        provider: cli.provider.unwrap_or(cfg.general.provider),
        input_encoding: cli.input_encoding.unwrap_or(cfg.general.input_encoding),
        legacy_sign_status: cli.legacy_sign_status || cfg.general.legacy_sign_status,
        key_dir,
        audit_path,
    })
}

pub fn decode_challenge(bytes: Vec<u8>, encoding: InputEncoding) -> Result<Challenge, InputError> {
    match encoding {
        InputEncoding::Raw => Ok(Challenge::new(bytes)),
        InputEncoding::Utf8 => {
            let text = String::from_utf8(bytes).map_err(|_| InputError::InvalidUtf8)?;
            let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
            Ok(Challenge::new(text.as_bytes().to_vec()))
        }
    }
}

/// Help and version go to `out` with status 0; every other argument error is
/// an invocation error. clap's own diagnostic goes to stderr.
pub fn handle_parse_error(err: &clap::Error, out: &mut impl Write) -> ExitStatus {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if let Err(e) = write!(out, "{}", err.render()).and_then(|_| out.flush()) {
                tracing::error!(error = %e, "cannot write help");
            }
            ExitStatus::Success
        }
        _ => {
            eprint!("{}", err.render());
            write_usage(out, false)
        }
    }
}

fn write_usage(out: &mut impl Write, json: bool) -> ExitStatus {
    if json {
        return fail(out, true, ExitStatus::Usage, USAGE);
    }
    if let Err(e) = writeln!(out, "{}", USAGE).and_then(|_| out.flush()) {
        tracing::error!(error = %e, "cannot write usage");
    }
    ExitStatus::Usage
}

pub fn handle_sign(cli: &Cli, input: &mut impl Read, out: &mut impl Write) -> ExitStatus {
    let Some(raw_name) = cli.credential_name.as_deref() else {
        return write_usage(out, cli.json);
    };
    if !cli.extra.is_empty() {
        tracing::debug!(count = cli.extra.len(), "ignoring arguments after the credential name");
    }
    let name = match CredentialName::new(raw_name) {
        Ok(n) => n,
        Err(e) => return fail(out, cli.json, ExitStatus::Usage, &e.to_string()),
    };

    let settings = match load_config(cli.config.as_deref())
        .and_then(|cfg| resolve_settings(cli, &cfg))
    {
        Ok(s) => s,
        Err(e) => return fail(out, cli.json, ExitStatus::Usage, &e.to_string()),
    };
    tracing::debug!(?settings, "resolved settings");

    let mut bytes = Vec::new();
    if let Err(e) = input.read_to_end(&mut bytes) {
        tracing::error!(error = %e, "cannot read stdin");
        let message = format!("cannot read input: {}", e);
        return fail(out, settings.json, ExitStatus::UnknownError, &message);
    }
    let challenge = match decode_challenge(bytes, settings.input_encoding) {
        Ok(c) => c,
        Err(e) => return fail(out, settings.json, ExitStatus::Usage, &e.to_string()),
    };

    match settings.provider {
        ProviderKind::Platform => {
            sign_with(&NativePlatform::default(), &settings, &name, challenge, out)
        }
        ProviderKind::Software => {
            let Some(key_dir) = settings.key_dir.clone() else {
                let message = "no key directory configured for the software provider";
                return fail(out, settings.json, ExitStatus::Usage, message);
            };
            sign_with(&SoftwareKeystore::new(key_dir), &settings, &name, challenge, out)
        }
    }
}

pub fn sign_with<P: CredentialPlatform>(
    platform: &P,
    settings: &Settings,
    name: &CredentialName,
    challenge: Challenge,
    out: &mut impl Write,
) -> ExitStatus {
    let mut entry = settings
        .audit_path
        .as_ref()
        .map(|_| audit_entry(name, &challenge, ExitStatus::Success));
    let options = VerifyOptions {
        legacy_sign_status: settings.legacy_sign_status,
    };

    let outcome = verify_and_sign(platform, name, challenge, options);
    let mut status = outcome.exit_status();
    let written = match &outcome {
        VerificationOutcome::Signature(sig) => write_signature(out, settings.json, name, sig),
        VerificationOutcome::Failure { code, message } => {
            write_failure(out, settings.json, *code, message)
        }
    };
    if let Err(e) = written {
        tracing::error!(error = %e, "cannot write result");
        status = ExitStatus::UnknownError;
    }

    if let (Some(path), Some(entry)) = (&settings.audit_path, entry.as_mut()) {
        entry.code = status.code();
        audit(path, entry);
    }
    status
}

fn fail(out: &mut impl Write, json: bool, code: ExitStatus, message: &str) -> ExitStatus {
    if let Err(e) = write_failure(out, json, code, message) {
        tracing::error!(error = %e, "cannot write failure");
    }
    code
}
