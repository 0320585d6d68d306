//! Unit tests for the account CLI helpers.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use camino::Utf8PathBuf;
use clap::Parser;
use env_lock::lock_env;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};

use super::*;
use crate::error::{ExportError, RegistrationError};
use crate::export::parse_all;
use crate::repository::DEFAULT_STORAGE_KEY;
use crate::store::MemoryStore;

struct StoreDirFixture {
    path: Utf8PathBuf,
}

impl StoreDirFixture {
    fn cli(&self, args: &[&str]) -> Cli {
        let mut argv = vec!["account-provisioning", "--store-dir", self.path.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("parse args")
    }
}

impl Drop for StoreDirFixture {
    fn drop(&mut self) {
        drop(std::fs::remove_dir_all(&self.path));
    }
}

fn settings() -> AccountSettings {
    AccountSettings {
        store_dir: None,
        storage_key: DEFAULT_STORAGE_KEY.to_owned(),
    }
}

#[fixture]
fn store_dir() -> StoreDirFixture {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = Utf8PathBuf::from("target")
        .join("account-provisioning-tests")
        .join(format!("cli-{}-{counter}", std::process::id()));
    StoreDirFixture { path }
}

#[fixture]
fn service() -> AccountService<MemoryStore> {
    let repository = UserRepository::load(MemoryStore::default()).expect("load");
    AccountService::new(repository, Arc::new(DefaultClock))
}

fn register_command(first: &str, last: &str, email: &str) -> Command {
    Command::Register(RegisterArgs {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: email.to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
        accept_terms: true,
    })
}

#[test]
fn parses_register_flags() {
    let cli = Cli::try_parse_from([
        "account-provisioning",
        "register",
        "--first-name",
        "John",
        "--last-name",
        "Doe",
        "--email",
        "john@example.com",
        "--password",
        "secret1",
        "--confirm-password",
        "secret1",
        "--accept-terms",
    ])
    .expect("parse args");

    let Command::Register(args) = cli.command else {
        panic!("expected register command");
    };
    assert_eq!(args.first_name, "John");
    assert!(args.accept_terms);
    assert!(cli.store_dir.is_none());
}

#[test]
fn omitted_register_fields_default_to_empty() {
    let cli = Cli::try_parse_from(["account-provisioning", "register", "--accept-terms"])
        .expect("parse args");

    let Command::Register(args) = cli.command else {
        panic!("expected register command");
    };
    assert!(args.first_name.is_empty());
    assert!(args.password.is_empty());
}

#[test]
fn store_dir_is_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["account-provisioning", "list", "--store-dir", "/tmp/x"])
        .expect("parse args");
    assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/x")));
}

#[rstest]
fn register_reports_username_and_id(mut service: AccountService<MemoryStore>) {
    let output = execute(&mut service, &register_command("John", "Doe", "John@Example.com"))
        .expect("register");

    assert!(output.starts_with("Registered johndoe <john@example.com> with id "));
}

#[rstest]
fn register_without_terms_is_rejected(mut service: AccountService<MemoryStore>) {
    let Command::Register(mut args) = register_command("John", "Doe", "john@example.com") else {
        panic!("expected register command");
    };
    args.accept_terms = false;

    let err = execute(&mut service, &Command::Register(args)).expect_err("expected error");

    assert_eq!(
        err,
        CliError::Registration(RegistrationError::TermsNotAccepted)
    );
}

#[rstest]
fn list_renders_one_line_per_account(mut service: AccountService<MemoryStore>) {
    execute(&mut service, &register_command("John", "Doe", "john@example.com")).expect("first");
    execute(&mut service, &register_command("John", "Doe", "jd@example.com")).expect("second");

    let output = execute(&mut service, &Command::List).expect("list");

    assert_eq!(
        output,
        "johndoe\tJohn Doe <john@example.com>\njohndoe1\tJohn Doe <jd@example.com>"
    );
}

#[rstest]
fn list_reports_empty_collection(mut service: AccountService<MemoryStore>) {
    let output = execute(&mut service, &Command::List).expect("list");
    assert_eq!(output, "No registered accounts");
}

#[rstest]
fn clear_requires_confirmation(mut service: AccountService<MemoryStore>) {
    execute(&mut service, &register_command("John", "Doe", "john@example.com")).expect("register");

    let err = execute(&mut service, &Command::Clear(ClearArgs { yes: false }))
        .expect_err("expected error");

    assert_eq!(err, CliError::ClearNotConfirmed);
    assert_eq!(service.list().len(), 1);
}

#[rstest]
fn clear_reports_removed_count(mut service: AccountService<MemoryStore>) {
    execute(&mut service, &register_command("John", "Doe", "john@example.com")).expect("register");

    let output = execute(&mut service, &Command::Clear(ClearArgs { yes: true })).expect("clear");

    assert_eq!(output, "Cleared 1 account(s)");
    assert!(service.list().is_empty());
}

#[rstest]
fn export_unknown_id_is_not_found(mut service: AccountService<MemoryStore>) {
    let command = Command::Export(ExportArgs {
        id: Some("missing".to_owned()),
        out_dir: None,
    });

    let err = execute(&mut service, &command).expect_err("expected error");

    assert_eq!(
        err,
        CliError::Export(ExportError::NotFound {
            id: "missing".to_owned()
        })
    );
}

#[rstest]
fn run_persists_accounts_between_invocations(store_dir: StoreDirFixture) {
    let register = store_dir.cli(&[
        "register",
        "--first-name",
        "Ada",
        "--last-name",
        "Lovelace",
        "--email",
        "ada@example.com",
        "--password",
        "engine1",
        "--confirm-password",
        "engine1",
        "--accept-terms",
    ]);
    run(&register, &settings(), Arc::new(DefaultClock)).expect("register");

    let export = store_dir.cli(&["export"]);
    let output = run(&export, &settings(), Arc::new(DefaultClock)).expect("export");

    let records = parse_all(&output).expect("parse export");
    assert_eq!(records.len(), 1);
    assert!(
        records
            .first()
            .is_some_and(|record| record.profile.username == "adalovelace")
    );
}

#[rstest]
fn run_writes_export_file(store_dir: StoreDirFixture) {
    let out_dir = store_dir.path.join("exports");
    let export = store_dir.cli(&["export", "--out", out_dir.as_str()]);

    let output = run(&export, &settings(), Arc::new(DefaultClock)).expect("export");

    assert_eq!(output, format!("Wrote {}", out_dir.join("all_users.json")));
    let written = std::fs::read_to_string(out_dir.join("all_users.json")).expect("read export");
    assert_eq!(written, "[]");
}

#[rstest]
fn run_accepts_settings_loaded_without_environment(store_dir: StoreDirFixture) {
    let _guard = lock_env([
        ("ACCOUNTS_STORE_DIR", None::<String>),
        ("ACCOUNTS_STORAGE_KEY", None::<String>),
    ]);
    let loaded = AccountSettings::load_from_iter([OsString::from("account-provisioning")])
        .expect("settings should load with no environment");

    let output = run(&store_dir.cli(&["list"]), &loaded, Arc::new(DefaultClock)).expect("list");

    assert_eq!(output, "No registered accounts");
    assert_eq!(loaded.storage_key(), DEFAULT_STORAGE_KEY);
}
