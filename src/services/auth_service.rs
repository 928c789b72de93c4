//! Authentication service - credential validation and token issuance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::token_issuer::{Claims, TokenIssuer};
use crate::config::{Config, BYPASS_EMAIL, BYPASS_PASSWORD};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Filter, Repository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve credentials to a user, or `None` if they do not match.
    async fn validate_user(&self, email: &str, password: &str) -> AppResult<Option<User>>;

    /// Sign a bearer token for an already validated user.
    fn issue_token(&self, user: &User) -> AppResult<String>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Register a new user
    async fn register(&self, email: String, username: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of AuthService over a user repository.
pub struct Authenticator<R: ?Sized> {
    users: Arc<R>,
    tokens: TokenIssuer,
    bypass_enabled: bool,
}

impl<R: Repository<User> + ?Sized> Authenticator<R> {
    pub fn new(users: Arc<R>, tokens: TokenIssuer, bypass_enabled: bool) -> Self {
        Self {
            users,
            tokens,
            bypass_enabled,
        }
    }

    /// Build from the process-wide configuration.
    pub fn from_config(users: Arc<R>, config: &Config) -> Self {
        Self::new(users, TokenIssuer::new(&config.jwt), config.auth_bypass_enabled)
    }

    fn is_bypass(&self, email: &str, password: &str) -> bool {
        self.bypass_enabled && email == BYPASS_EMAIL && password == BYPASS_PASSWORD
    }
}

#[async_trait]
impl<R: Repository<User> + ?Sized> AuthService for Authenticator<R> {
    async fn validate_user(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        info!(email = %email, "Validating user");

        if self.is_bypass(email, password) {
            debug!("Bypass account matched");
            return Ok(Some(User::bypass(email)));
        }

        let user = self
            .users
            .get_by_condition(&Filter::eq("email", email))
            .await?;

        // A miss still pays for one hash verification.
        let verified = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()).verify(password),
            None => Password::verify_dummy(password),
        };

        Ok(user.filter(|_| verified))
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        info!(email = %user.email, "Generating JWT token");
        self.tokens.issue(user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }

    async fn register(&self, email: String, username: String, password: String) -> AppResult<User> {
        if self.bypass_enabled && email == BYPASS_EMAIL {
            return Err(AppError::conflict("User"));
        }

        // Hash is filled in after the duplicate check
        let candidate = User::try_new(username, email, String::new())?;

        if self.users.exists(&Filter::eq("email", candidate.email.as_str())).await? {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .users
            .create(User {
                password_hash,
                ..candidate
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }
}
