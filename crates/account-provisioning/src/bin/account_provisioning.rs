//! Account provisioning CLI.
//!
//! This binary delegates to `account_provisioning::cli` for the command flow,
//! keeping the behaviour testable without spawning a process.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use account_provisioning::AccountSettings;
use account_provisioning::cli::{Cli, run};
use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = match AccountSettings::load_from_iter([OsString::from("account-provisioning")])
    {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "failed to load account settings");
            write_line(io::stderr().lock(), &err.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &settings, Arc::new(DefaultClock)) {
        Ok(output) => {
            write_line(io::stdout().lock(), &output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            write_line(io::stderr().lock(), &err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn write_line(mut out: impl Write, message: &str) {
    if let Err(err) = writeln!(out, "{message}") {
        drop(err);
    }
}
