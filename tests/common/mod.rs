//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chat_webapp_api::config::JwtConfig;
use chat_webapp_api::domain::{Password, User};
use chat_webapp_api::infra::InMemoryRepository;
use chat_webapp_api::services::{Authenticator, TokenIssuer};

pub const TEST_KEY: &str = "integration-test-signing-key-0123456789";
pub const ALICE_PASSWORD: &str = "Wonderland1!";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_KEY, "chat-webapp", "chat-webapp").expect("valid test key")
}

pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(&jwt_config())
}

pub fn alice() -> User {
    let hash = Password::new(ALICE_PASSWORD).expect("hashable").into_string();
    User::new("alice".into(), "alice@example.com".into(), hash)
}

pub fn store_with_alice() -> Arc<InMemoryRepository<User>> {
    Arc::new(InMemoryRepository::with_records(vec![alice()]))
}

pub fn authenticator(
    users: Arc<InMemoryRepository<User>>,
    bypass_enabled: bool,
) -> Authenticator<InMemoryRepository<User>> {
    Authenticator::new(users, token_issuer(), bypass_enabled)
}
