//! Account provisioning for a simulated social network client.
//!
//! This crate validates registration submissions, derives unique
//! identifiers and usernames, expands them into complete user records, and
//! keeps the growing collection in a durable key-value store. Records can be
//! exported as indented JSON for preview or download.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Ordered, short-circuiting validation of registration forms
//! - Case-insensitive email and exact username uniqueness
//! - Deterministic record construction with defaults for every section
//! - Pluggable storage through [`DurableStore`]
//! - Lossless JSON export of one record or the whole collection
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use account_provisioning::{
//!     AccountService, MemoryStore, RegistrationError, RegistrationSubmission, UserRepository,
//! };
//! use mockable::DefaultClock;
//!
//! let repository = UserRepository::load(MemoryStore::default()).expect("load");
//! let mut service = AccountService::new(repository, Arc::new(DefaultClock));
//!
//! let first = RegistrationSubmission::new("John", "Doe", "john@example.com", "secret1");
//! let second = RegistrationSubmission::new("John", "Doe", "jd@example.com", "secret1");
//! service.register(&first, true).expect("first registration");
//! let record = service.register(&second, true).expect("second registration");
//! assert_eq!(record.profile.username, "johndoe1");
//!
//! let duplicate = RegistrationSubmission::new("Jo", "Doe", "JOHN@EXAMPLE.COM", "secret1");
//! assert_eq!(
//!     service.register(&duplicate, true),
//!     Err(RegistrationError::DuplicateEmail)
//! );
//! ```

mod atomic_io;
mod builder;
pub mod cli;
mod config;
mod error;
mod export;
mod identity;
mod record;
mod repository;
mod service;
mod store;
mod validation;

pub use builder::build_user_record;
pub use config::AccountSettings;
pub use error::{ExportError, RegistrationError, RequiredField, StoreError};
pub use export::{
    ALL_USERS_FILE_NAME, ExportArtifact, parse_all, parse_one, serialize_all, serialize_one,
    write_export,
};
pub use identity::{
    ID_SUFFIX_LENGTH, MAX_ID_ATTEMPTS, generate_id, generate_username, username_base,
};
pub use record::{
    AccountInfo, DEFAULT_LANGUAGE, DEFAULT_PROFILE_PICTURE, NotificationSettings, PersonalInfo,
    Preferences, PrivacySettings, Profile, ProfileVisibility, SocialGraph, Statistics, Theme,
    UserRecord,
};
pub use repository::{DEFAULT_STORAGE_KEY, UserRepository};
pub use service::AccountService;
pub use store::{DirStore, DurableStore, MemoryStore};
pub use validation::{
    MIN_PASSWORD_LENGTH, RegistrationSubmission, is_email_registered, is_valid_email,
    validate_submission,
};
