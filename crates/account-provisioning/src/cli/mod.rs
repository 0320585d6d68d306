//! Command-line presentation adapter for the account service.
//!
//! The binary parses arguments and delegates to [`run`], which returns the
//! text to print. Keeping rendering here lets the command flow be exercised
//! in tests without spawning a process.

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use clap::{Args, Parser, Subcommand};
use mockable::Clock;
use tracing::debug;

use crate::config::AccountSettings;
use crate::export::{ExportArtifact, write_export};
use crate::record::UserRecord;
use crate::repository::UserRepository;
use crate::service::AccountService;
use crate::store::{DirStore, DurableStore};
use crate::validation::RegistrationSubmission;

pub use error::CliError;

/// `account-provisioning` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "account-provisioning",
    about = "Register, list, export, and clear simulated social network accounts",
    version
)]
pub struct Cli {
    /// Directory holding the account store. Overrides `ACCOUNTS_STORE_DIR`.
    #[arg(long = "store-dir", value_name = "path", global = true)]
    pub store_dir: Option<PathBuf>,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a new account.
    Register(RegisterArgs),
    /// List registered accounts in registration order.
    List,
    /// Print or write an export of one or all accounts.
    Export(ExportArgs),
    /// Delete every registered account.
    Clear(ClearArgs),
}

/// Registration form fields.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Given name.
    #[arg(long = "first-name", value_name = "name", default_value = "")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name", default_value = "")]
    pub last_name: String,
    /// Contact email address.
    #[arg(long, value_name = "address", default_value = "")]
    pub email: String,
    /// Chosen password.
    #[arg(long, value_name = "password", default_value = "")]
    pub password: String,
    /// Password typed a second time.
    #[arg(long = "confirm-password", value_name = "password", default_value = "")]
    pub confirm_password: String,
    /// Accept the terms and conditions.
    #[arg(long = "accept-terms")]
    pub accept_terms: bool,
}

impl RegisterArgs {
    fn submission(&self) -> RegistrationSubmission {
        RegistrationSubmission {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

/// Export target selection.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Export only the account with this id.
    #[arg(long, value_name = "id")]
    pub id: Option<String>,
    /// Write the export file into this directory instead of printing it.
    #[arg(long = "out", value_name = "dir")]
    pub out_dir: Option<PathBuf>,
}

/// Confirmation for destructive clearing.
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    /// Confirm deletion of every account.
    #[arg(long)]
    pub yes: bool,
}

/// Runs a parsed command against the configured store.
///
/// Returns the text to print on success.
///
/// # Errors
///
/// Returns [`CliError`] when the store cannot be opened or the command fails.
pub fn run(cli: &Cli, settings: &AccountSettings, clock: Arc<dyn Clock>) -> Result<String, CliError> {
    let store_dir = utf8_path(cli.store_dir.clone().unwrap_or_else(|| settings.store_dir()))?;
    let store = DirStore::open(&store_dir)?;
    debug!(store_dir = %store.root(), key = settings.storage_key(), "account store opened");
    let repository = UserRepository::load_with_key(store, settings.storage_key())?;
    let mut service = AccountService::new(repository, clock);
    execute(&mut service, &cli.command)
}

/// Executes one command against an already constructed service.
///
/// # Errors
///
/// Returns [`CliError`] when the command fails.
pub fn execute<S: DurableStore>(
    service: &mut AccountService<S>,
    command: &Command,
) -> Result<String, CliError> {
    match command {
        Command::Register(args) => {
            let record = service.register(&args.submission(), args.accept_terms)?;
            Ok(format!(
                "Registered {} <{}> with id {}",
                record.profile.username, record.personal_info.email, record.id
            ))
        }
        Command::List => Ok(render_list(service.list())),
        Command::Export(args) => {
            let artifact = match &args.id {
                Some(id) => service.export_one(id)?,
                None => service.export_all()?,
            };
            match &args.out_dir {
                Some(dir) => write_artifact(dir, &artifact),
                None => Ok(artifact.contents),
            }
        }
        Command::Clear(args) => {
            if !args.yes {
                return Err(CliError::ClearNotConfirmed);
            }
            let removed = service.list().len();
            service.clear()?;
            Ok(format!("Cleared {removed} account(s)"))
        }
    }
}

fn render_list(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return "No registered accounts".to_owned();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}\t{} <{}>",
                record.profile.username, record.personal_info.full_name, record.personal_info.email
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<String, CliError> {
    let utf8_dir = utf8_path(dir.to_path_buf())?;
    let open_error = |err: std::io::Error| CliError::ExportDirectory {
        path: utf8_dir.to_string(),
        message: err.to_string(),
    };
    Dir::create_ambient_dir_all(&utf8_dir, ambient_authority()).map_err(open_error)?;
    let handle = Dir::open_ambient_dir(&utf8_dir, ambient_authority()).map_err(open_error)?;
    write_export(&handle, artifact)?;
    Ok(format!("Wrote {}", utf8_dir.join(&artifact.file_name)))
}

fn utf8_path(path: PathBuf) -> Result<Utf8PathBuf, CliError> {
    Utf8PathBuf::from_path_buf(path).map_err(|rejected| CliError::NonUtf8Path {
        path: rejected.to_string_lossy().into_owned(),
    })
}

#[cfg(test)]
mod tests;
