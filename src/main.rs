use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod domain;
mod services;

use crate::cli::Cli;

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("hello_auth=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hello_auth=warn"))
    };

    // stdout carries the signature; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let stdout = std::io::stdout();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return commands::handle_parse_error(&e, &mut stdout.lock()).into(),
    };
    init_tracing(cli.verbose);

    let stdin = std::io::stdin();
    let status = commands::handle_sign(&cli, &mut stdin.lock(), &mut stdout.lock());
    tracing::debug!(code = status.code(), "exiting");
    status.into()
}
