//! Record identifier and username generation.
//!
//! Both generators consult the current collection to avoid collisions. Every
//! probe is a linear scan over the records.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::error::RegistrationError;
use crate::record::UserRecord;

/// Number of base-36 characters appended to the timestamp in an id.
pub const ID_SUFFIX_LENGTH: usize = 9;

/// Maximum number of identifiers drawn before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

const BASE36_RADIX: u32 = 36;

/// Generates a record identifier unique within `existing`.
///
/// The identifier is the millisecond timestamp of `now` followed by
/// [`ID_SUFFIX_LENGTH`] random base-36 characters. A fresh suffix is drawn
/// whenever the candidate already exists.
///
/// # Errors
///
/// Returns [`RegistrationError::IdGenerationExhausted`] if
/// [`MAX_ID_ATTEMPTS`] candidates all collide.
///
/// # Example
///
/// ```
/// use account_provisioning::generate_id;
/// use chrono::{TimeZone, Utc};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let now = Utc.timestamp_millis_opt(1_700_000_000_000).single().expect("valid");
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let id = generate_id(now, &mut rng, &[]).expect("unique id");
///
/// assert!(id.starts_with("1700000000000"));
/// assert_eq!(id.len(), 13 + 9);
/// ```
pub fn generate_id<R>(
    now: DateTime<Utc>,
    rng: &mut R,
    existing: &[UserRecord],
) -> Result<String, RegistrationError>
where
    R: Rng + ?Sized,
{
    let millis = now.timestamp_millis();
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = format!("{millis}{}", base36_suffix(rng, ID_SUFFIX_LENGTH));
        if !existing.iter().any(|record| record.id == candidate) {
            return Ok(candidate);
        }
        debug!(candidate = %candidate, "generated id collided; redrawing suffix");
    }

    Err(RegistrationError::IdGenerationExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}

/// Draws `length` random characters from `[0-9a-z]`.
fn base36_suffix<R>(rng: &mut R, length: usize) -> String
where
    R: Rng + ?Sized,
{
    (0..length)
        .filter_map(|_| char::from_digit(rng.random_range(0..BASE36_RADIX), BASE36_RADIX))
        .collect()
}

/// Derives the collision-free base of a username from a person's name.
///
/// The first and last names are concatenated, lower-cased, and stripped of
/// every character outside `[a-z0-9]`. A name with no ASCII letters or
/// digits yields an empty base.
///
/// # Examples
///
/// ```
/// use account_provisioning::username_base;
///
/// assert_eq!(username_base("John", "Doe"), "johndoe");
/// assert_eq!(username_base("Mary-Kate", "O'Neil 3rd"), "marykateoneil3rd");
/// assert_eq!(username_base("李", "小龍"), "");
/// ```
#[must_use]
pub fn username_base(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .chain(last_name.chars())
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Generates a username not yet used in `existing`.
///
/// Starts from [`username_base`]; while the candidate is taken a counter
/// starting at 1 is appended (`johndoe1`, `johndoe2`, ...). With `n` existing
/// records at most `n + 1` counters are probed, so the loop always ends.
///
/// # Example
///
/// ```
/// use account_provisioning::generate_username;
///
/// assert_eq!(generate_username("John", "Doe", &[]), "johndoe");
/// ```
#[must_use]
pub fn generate_username(first_name: &str, last_name: &str, existing: &[UserRecord]) -> String {
    let base = username_base(first_name, last_name);
    if !is_username_taken(&base, existing) {
        return base;
    }

    let mut counter: usize = 1;
    loop {
        let candidate = format!("{base}{counter}");
        if !is_username_taken(&candidate, existing) {
            debug!(username = %candidate, probes = counter, "username deduplicated");
            return candidate;
        }
        counter += 1;
    }
}

fn is_username_taken(candidate: &str, existing: &[UserRecord]) -> bool {
    existing
        .iter()
        .any(|record| record.profile.username == candidate)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::builder::build_user_record;
    use crate::validation::RegistrationSubmission;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn record_with(id: &str, username: &str) -> UserRecord {
        let submission = RegistrationSubmission::new("John", "Doe", "x@example.com", "secret1");
        build_user_record(&submission, id.to_owned(), username.to_owned(), Utc::now())
    }

    #[rstest]
    fn id_is_timestamp_followed_by_base36_suffix(now: DateTime<Utc>) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let id = generate_id(now, &mut rng, &[]).expect("id");

        let millis = now.timestamp_millis().to_string();
        let suffix = id.strip_prefix(&millis).expect("timestamp prefix");
        assert_eq!(suffix.len(), ID_SUFFIX_LENGTH);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[rstest]
    fn id_generation_is_deterministic_for_a_seed(now: DateTime<Utc>) {
        let first = generate_id(now, &mut ChaCha8Rng::seed_from_u64(9), &[]).expect("id");
        let second = generate_id(now, &mut ChaCha8Rng::seed_from_u64(9), &[]).expect("id");
        assert_eq!(first, second);
    }

    #[rstest]
    fn id_collision_redraws_suffix(now: DateTime<Utc>) {
        let clashing = generate_id(now, &mut ChaCha8Rng::seed_from_u64(3), &[]).expect("id");
        let existing = vec![record_with(&clashing, "johndoe")];

        let id = generate_id(now, &mut ChaCha8Rng::seed_from_u64(3), &existing).expect("id");

        assert_ne!(id, clashing);
    }

    #[rstest]
    fn id_generation_gives_up_after_max_attempts(now: DateTime<Utc>) {
        let existing: Vec<UserRecord> = {
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            (0..MAX_ID_ATTEMPTS)
                .map(|_| {
                    let suffix = base36_suffix(&mut rng, ID_SUFFIX_LENGTH);
                    let id = format!("{}{suffix}", now.timestamp_millis());
                    record_with(&id, &id)
                })
                .collect()
        };

        let result = generate_id(now, &mut ChaCha8Rng::seed_from_u64(11), &existing);

        assert_eq!(
            result,
            Err(RegistrationError::IdGenerationExhausted {
                attempts: MAX_ID_ATTEMPTS
            })
        );
    }

    #[rstest]
    #[case("John", "Doe", "johndoe")]
    #[case("JOHN", "DOE", "johndoe")]
    #[case("Anne Marie", "Smith-Jones", "annemariesmithjones")]
    #[case("R2", "D2", "r2d2")]
    #[case("José", "Núñez", "josnez")]
    #[case("", "", "")]
    #[case("!!!", "???", "")]
    #[case("李", "小龍", "")]
    fn username_base_strips_to_lowercase_alphanumerics(
        #[case] first: &str,
        #[case] last: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(username_base(first, last), expected);
    }

    #[test]
    fn first_collision_gets_suffix_one() {
        let existing = vec![record_with("1", "johndoe")];
        assert_eq!(generate_username("John", "Doe", &existing), "johndoe1");
    }

    #[test]
    fn counter_skips_every_taken_suffix() {
        let existing = vec![
            record_with("1", "johndoe"),
            record_with("2", "johndoe1"),
            record_with("3", "johndoe2"),
        ];
        assert_eq!(generate_username("John", "Doe", &existing), "johndoe3");
    }

    #[test]
    fn counter_fills_gaps() {
        let existing = vec![record_with("1", "johndoe"), record_with("3", "johndoe2")];
        assert_eq!(generate_username("John", "Doe", &existing), "johndoe1");
    }

    #[test]
    fn names_without_ascii_alphanumerics_dedupe_on_the_bare_counter() {
        assert_eq!(generate_username("李", "小龍", &[]), "");

        let existing = vec![record_with("1", ""), record_with("2", "1")];
        assert_eq!(generate_username("李", "小龍", &existing), "2");
    }

    #[test]
    fn username_comparison_is_exact() {
        let existing = vec![record_with("1", "JohnDoe")];
        assert_eq!(generate_username("John", "Doe", &existing), "johndoe");
    }
}
