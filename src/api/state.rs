//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::User;
use crate::infra::Repository;
use crate::services::{AuthService, Authenticator, LoginHandler};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Login use case over `auth_service`
    pub login: LoginHandler,
    /// User store, also counted by the health check
    pub users: Arc<dyn Repository<User>>,
}

impl AppState {
    /// Wire the default authenticator over `users`.
    pub fn from_config(users: Arc<dyn Repository<User>>, config: &Config) -> Self {
        let auth_service: Arc<dyn AuthService> =
            Arc::new(Authenticator::from_config(users.clone(), config));

        Self::new(auth_service, users)
    }

    /// Create state with a manually injected auth service.
    pub fn new(auth_service: Arc<dyn AuthService>, users: Arc<dyn Repository<User>>) -> Self {
        Self {
            login: LoginHandler::new(auth_service.clone()),
            auth_service,
            users,
        }
    }
}
