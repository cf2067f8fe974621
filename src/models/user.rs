use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user document as held by the credential store
///
/// Carries the password hash and therefore never leaves the store/service
/// boundary; handlers only ever see [`PublicUser`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    /// Lowercase, unique
    pub username: String,
    /// Unique
    pub email: String,
    /// PHC-format argon2 hash
    pub password_hash: String,
    /// First letter of the username or display name, uppercased
    pub initials: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The sanitized view of a user returned to clients
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub initials: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserRecord> for PublicUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            initials: user.initials.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Uppercased first character of `source`, empty when `source` is empty
pub fn initials_from(source: &str) -> String {
    source
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
