//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use super::Identifiable;
use crate::config::BYPASS_USERNAME;
use crate::errors::{AppError, AppResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Unique, used as the login key
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Create a user after checking the account invariants.
    ///
    /// # Errors
    /// `Validation` when the username is blank or the email is malformed.
    pub fn try_new(username: String, email: String, password_hash: String) -> AppResult<Self> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }

        Ok(Self::new(username, email, password_hash))
    }

    /// In-memory record for the built-in bypass account.
    ///
    /// Never persisted; carries the nil id and no password hash.
    pub fn bypass(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            username: BYPASS_USERNAME.to_string(),
            email: email.into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_user_shape() {
        let user = User::bypass("admin@admin.com");

        assert_eq!(user.id, Uuid::nil());
        assert_eq!(user.username, "Admin");
        assert_eq!(user.email, "admin@admin.com");
        assert!(user.password_hash.is_empty());
    }

    #[test]
    fn test_try_new_checks_username_and_email() {
        let blank = User::try_new("  ".into(), "bob@example.com".into(), "hash".into());
        assert!(matches!(blank, Err(AppError::Validation(_))));

        let malformed = User::try_new("bob".into(), "not-an-email".into(), "hash".into());
        assert!(matches!(malformed, Err(AppError::Validation(_))));

        let user = User::try_new("bob".into(), "bob@example.com".into(), "hash".into()).unwrap();
        assert_eq!(user.username, "bob");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("alice".into(), "alice@example.com".into(), "secret-hash".into());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn test_response_is_camel_case() {
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("password_hash").is_none());
    }
}
