//! Persisted user record types.
//!
//! A [`UserRecord`] is the only entity this crate stores. Field names
//! serialise in camelCase so exported JSON matches the shape the web client
//! reads back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Asset path used for every new account's avatar.
pub const DEFAULT_PROFILE_PICTURE: &str = "/assets/default-avatar.png";

/// Language assigned to every new account.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One registered identity.
///
/// # Example
///
/// ```
/// use account_provisioning::{RegistrationSubmission, build_user_record};
/// use chrono::Utc;
///
/// let submission = RegistrationSubmission::new("Ada", "Lovelace", "ada@example.com", "engine1");
/// let record = build_user_record(&submission, "1700000000000k3j9x0a2b".to_owned(), "adalovelace".to_owned(), Utc::now());
///
/// assert_eq!(record.personal_info.full_name, "Ada Lovelace");
/// assert!(record.social.friends.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Identifier assigned at creation; never changes.
    pub id: String,
    /// Names and contact address.
    pub personal_info: PersonalInfo,
    /// Account lifecycle flags and timestamps.
    pub account: AccountInfo,
    /// Public profile details.
    pub profile: Profile,
    /// Visibility and contact permissions.
    pub privacy: PrivacySettings,
    /// Relationship lists.
    pub social: SocialGraph,
    /// Interface preferences.
    pub preferences: Preferences,
    /// Activity counters.
    pub statistics: Statistics,
}

/// Names and contact address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Given name as submitted.
    pub first_name: String,
    /// Family name as submitted.
    pub last_name: String,
    /// `first_name` and `last_name` joined by a single space.
    pub full_name: String,
    /// Lower-cased email address.
    pub email: String,
}

/// Lifecycle state of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// When the record was built.
    pub created_at: DateTime<Utc>,
    /// Most recent sign-in; `None` until the user signs in.
    pub last_login: Option<DateTime<Utc>>,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the email address has been confirmed.
    pub is_verified: bool,
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique handle derived from the user's name.
    pub username: String,
    /// Free-form biography.
    pub bio: String,
    /// Avatar asset path.
    pub profile_picture: String,
    /// Cover image asset path; empty when unset.
    pub cover_photo: String,
    /// Free-form location.
    pub location: String,
    /// Personal website URL.
    pub website: String,
    /// Date of birth, when supplied.
    pub birth_date: Option<NaiveDate>,
}

/// Audience allowed to see a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    /// Anyone.
    #[default]
    Public,
    /// Confirmed friends only.
    Friends,
    /// Nobody but the owner.
    Private,
}

/// Privacy switches for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    /// Who can view the profile.
    pub profile_visibility: ProfileVisibility,
    /// Whether other users may send direct messages.
    pub allow_messages: bool,
    /// Whether other users may send friend requests.
    pub allow_friend_requests: bool,
    /// Whether the email address is shown on the profile.
    pub show_email: bool,
    /// Whether the phone number is shown on the profile.
    pub show_phone_number: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::Public,
            allow_messages: true,
            allow_friend_requests: true,
            show_email: false,
            show_phone_number: false,
        }
    }
}

/// Relationship lists, each holding record identifiers in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialGraph {
    /// Confirmed friends.
    pub friends: Vec<String>,
    /// Users following this user.
    pub followers: Vec<String>,
    /// Users this user follows.
    pub following: Vec<String>,
    /// Authored posts.
    pub posts: Vec<String>,
    /// Joined groups.
    pub groups: Vec<String>,
    /// Followed pages.
    pub pages: Vec<String>,
}

/// Colour scheme of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light backgrounds.
    #[default]
    Light,
    /// Dark backgrounds.
    Dark,
}

/// Channels on which a user receives notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Email notifications.
    pub email: bool,
    /// Push notifications.
    pub push: bool,
    /// Text message notifications.
    pub sms: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

/// Interface preferences of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Colour scheme.
    pub theme: Theme,
    /// Interface language tag.
    pub language: String,
    /// Notification channels.
    pub notifications: NotificationSettings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: DEFAULT_LANGUAGE.to_owned(),
            notifications: NotificationSettings::default(),
        }
    }
}

/// Activity counters of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Posts authored.
    pub total_posts: u64,
    /// Confirmed friends.
    pub total_friends: u64,
    /// Followers.
    pub total_followers: u64,
    /// Accounts followed.
    pub total_following: u64,
    /// Profile page views.
    pub profile_views: u64,
}
