//! Registration service composing validation, identity, and persistence.
//!
//! The service is the whole surface a presentation adapter needs: it returns
//! records, artifacts, or typed errors and never renders anything itself.

use std::sync::Arc;

use mockable::Clock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::builder::build_user_record;
use crate::error::{ExportError, RegistrationError, StoreError};
use crate::export::ExportArtifact;
use crate::identity::{generate_id, generate_username};
use crate::record::UserRecord;
use crate::repository::UserRepository;
use crate::store::DurableStore;
use crate::validation::{RegistrationSubmission, validate_submission};

/// Account registration and export operations over a user repository.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use account_provisioning::{AccountService, MemoryStore, RegistrationSubmission, UserRepository};
/// use mockable::DefaultClock;
///
/// let repository = UserRepository::load(MemoryStore::default()).expect("load");
/// let mut service = AccountService::new(repository, Arc::new(DefaultClock));
///
/// let submission = RegistrationSubmission::new("John", "Doe", "John@Example.com", "secret1");
/// let record = service.register(&submission, true).expect("registered");
///
/// assert_eq!(record.profile.username, "johndoe");
/// assert_eq!(record.personal_info.email, "john@example.com");
/// assert_eq!(service.list().len(), 1);
/// ```
pub struct AccountService<S> {
    repository: UserRepository<S>,
    clock: Arc<dyn Clock>,
    rng: ChaCha8Rng,
}

impl<S: DurableStore> AccountService<S> {
    /// Creates a service whose id suffixes come from a thread-seeded RNG.
    #[must_use]
    pub fn new(repository: UserRepository<S>, clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(repository, clock, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Creates a service with an explicit RNG, making ids reproducible.
    #[must_use]
    pub fn with_rng(repository: UserRepository<S>, clock: Arc<dyn Clock>, rng: ChaCha8Rng) -> Self {
        Self {
            repository,
            clock,
            rng,
        }
    }

    /// Registers a new account.
    ///
    /// The submission is validated against the current collection; only a
    /// valid submission gets an id and username, is built into a record, and
    /// is appended to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::TermsNotAccepted`] when
    /// `terms_accepted` is `false`, a validation variant when a rule fails,
    /// [`RegistrationError::IdGenerationExhausted`] when no unique id could be
    /// drawn, or [`RegistrationError::Store`] when the appended collection
    /// could not be persisted.
    pub fn register(
        &mut self,
        submission: &RegistrationSubmission,
        terms_accepted: bool,
    ) -> Result<UserRecord, RegistrationError> {
        if !terms_accepted {
            debug!("registration rejected: terms not accepted");
            return Err(RegistrationError::TermsNotAccepted);
        }
        let existing = self.repository.list();
        validate_submission(submission, existing).inspect_err(|err| {
            debug!(reason = %err, "registration rejected");
        })?;

        let now = self.clock.utc();
        let id = generate_id(now, &mut self.rng, existing)?;
        let username = generate_username(&submission.first_name, &submission.last_name, existing);
        let record = build_user_record(submission, id, username, now);

        self.repository.append(record.clone())?;
        info!(
            user_id = %record.id,
            username = %record.profile.username,
            total = self.repository.len(),
            "account registered"
        );
        Ok(record)
    }

    /// Returns every registered record in registration order.
    #[must_use]
    pub fn list(&self) -> &[UserRecord] {
        self.repository.list()
    }

    /// Deletes every registered record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the empty collection cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.repository.clear()
    }

    /// Exports the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] if no record has this identifier.
    pub fn export_one(&self, id: &str) -> Result<ExportArtifact, ExportError> {
        let record = self
            .repository
            .find(id)
            .ok_or_else(|| ExportError::NotFound { id: id.to_owned() })?;
        ExportArtifact::for_record(record)
    }

    /// Exports the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`] if the collection cannot be
    /// rendered.
    pub fn export_all(&self) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::for_collection(self.repository.list())
    }

    /// Returns the underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &UserRepository<S> {
        &self.repository
    }
}
