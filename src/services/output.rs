use crate::domain::exit_code::ExitStatus;
use crate::domain::models::{CredentialName, ErrorBody, JsonErr, JsonOut, SignatureReport};
use std::io::Write;

/// Writes the raw signature, no trailing newline.
pub fn write_signature(
    out: &mut impl Write,
    json: bool,
    name: &CredentialName,
    signature: &[u8],
) -> anyhow::Result<()> {
    if json {
        let report = SignatureReport {
            credential: name.clone(),
            signature: hex::encode(signature),
        };
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: report
            })?
        )?;
    } else {
        out.write_all(signature)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_failure(
    out: &mut impl Write,
    json: bool,
    code: ExitStatus,
    message: &str,
) -> anyhow::Result<()> {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.code(),
                kind: code.kind(),
                message: message.to_string(),
            },
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        writeln!(out, "{}", message)?;
    }
    out.flush()?;
    Ok(())
}
