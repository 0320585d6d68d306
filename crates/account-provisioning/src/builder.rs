//! Expansion of a validated submission into a complete user record.

use chrono::{DateTime, Utc};

use crate::record::{
    AccountInfo, DEFAULT_PROFILE_PICTURE, PersonalInfo, Preferences, PrivacySettings, Profile,
    SocialGraph, Statistics, UserRecord,
};
use crate::validation::RegistrationSubmission;

/// Builds the full nested record for a newly registered user.
///
/// Names are kept as submitted, `full_name` joins them with a single space,
/// and the email is lower-cased. Every other field takes its default: an
/// active unverified account that has never signed in, an empty profile with
/// the default avatar, public visibility, empty social lists, light theme,
/// and zeroed statistics. The password is not stored.
///
/// # Example
///
/// ```
/// use account_provisioning::{RegistrationSubmission, build_user_record};
/// use chrono::Utc;
///
/// let submission = RegistrationSubmission::new("John", "Doe", "John@Example.com", "secret1");
/// let record = build_user_record(&submission, "1".to_owned(), "johndoe".to_owned(), Utc::now());
///
/// assert_eq!(record.personal_info.email, "john@example.com");
/// assert_eq!(record.profile.username, "johndoe");
/// assert_eq!(record.statistics.total_posts, 0);
/// ```
#[must_use]
pub fn build_user_record(
    submission: &RegistrationSubmission,
    id: String,
    username: String,
    created_at: DateTime<Utc>,
) -> UserRecord {
    UserRecord {
        id,
        personal_info: PersonalInfo {
            first_name: submission.first_name.clone(),
            last_name: submission.last_name.clone(),
            full_name: format!("{} {}", submission.first_name, submission.last_name),
            email: submission.email.to_lowercase(),
        },
        account: AccountInfo {
            created_at,
            last_login: None,
            is_active: true,
            is_verified: false,
        },
        profile: Profile {
            username,
            bio: String::new(),
            profile_picture: DEFAULT_PROFILE_PICTURE.to_owned(),
            cover_photo: String::new(),
            location: String::new(),
            website: String::new(),
            birth_date: None,
        },
        privacy: PrivacySettings::default(),
        social: SocialGraph::default(),
        preferences: Preferences::default(),
        statistics: Statistics::default(),
    }
}
