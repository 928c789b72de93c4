//! Authenticator tests against the in-memory user store.

mod common;

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use chat_webapp_api::errors::AppError;
use chat_webapp_api::infra::{Filter, InMemoryRepository, Repository};
use chat_webapp_api::services::{AuthService, LoginCommand, LoginHandler};

use common::{alice, authenticator, store_with_alice, ALICE_PASSWORD};

#[tokio::test]
async fn test_bypass_account_validates_without_store() {
    let auth = authenticator(Arc::new(InMemoryRepository::new()), true);

    let user = auth
        .validate_user("admin@admin.com", "123456")
        .await
        .unwrap()
        .expect("bypass user");

    assert_eq!(user.id, Uuid::nil());
    assert_eq!(user.username, "Admin");
    assert_eq!(user.email, "admin@admin.com");
}

#[tokio::test]
async fn test_bypass_disabled_falls_through_to_store() {
    let auth = authenticator(Arc::new(InMemoryRepository::new()), false);

    let user = auth.validate_user("admin@admin.com", "123456").await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn test_bypass_requires_exact_password() {
    let auth = authenticator(Arc::new(InMemoryRepository::new()), true);

    let user = auth.validate_user("admin@admin.com", "1234567").await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn test_stored_user_with_correct_password() {
    let auth = authenticator(store_with_alice(), true);

    let user = auth
        .validate_user("alice@example.com", ALICE_PASSWORD)
        .await
        .unwrap();

    assert_eq!(user.map(|u| u.username), Some("alice".to_string()));
}

#[tokio::test]
async fn test_stored_user_with_wrong_password() {
    let auth = authenticator(store_with_alice(), true);

    let user = auth
        .validate_user("alice@example.com", "not-her-password")
        .await
        .unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn test_unknown_email_is_absent() {
    let auth = authenticator(store_with_alice(), true);

    let user = auth.validate_user("nobody@x.com", "whatever").await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn test_issued_token_verifies_back_to_user() {
    let auth = authenticator(store_with_alice(), true);
    let user = alice();

    let token = assert_ok!(auth.issue_token(&user));
    let claims = assert_ok!(auth.verify_token(&token));

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.user_name, "alice");
    assert_eq!(claims.exp - claims.iat, 7200);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let auth = authenticator(store_with_alice(), true);

    assert_err!(auth.verify_token("not.a.jwt"));
}

#[tokio::test]
async fn test_register_then_login() {
    let users = Arc::new(InMemoryRepository::new());
    let auth = Arc::new(authenticator(users.clone(), true));

    let created = auth
        .register("bob@example.com".into(), "bob".into(), "Builder123".into())
        .await
        .unwrap();

    assert_ne!(created.password_hash, "Builder123");
    assert_eq!(
        users.count(&Filter::eq("email", "bob@example.com")).await.unwrap(),
        1
    );

    let handler = LoginHandler::new(auth);
    let response = handler
        .handle(LoginCommand {
            email: "bob@example.com".into(),
            password: "Builder123".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.data.map(|d| d.user_name), Some("bob".to_string()));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let auth = authenticator(store_with_alice(), true);

    let result = auth
        .register("alice@example.com".into(), "alice2".into(), "Another123".into())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_register_cannot_shadow_bypass_account() {
    let auth = authenticator(Arc::new(InMemoryRepository::new()), true);

    let result = auth
        .register("admin@admin.com".into(), "mallory".into(), "Password123".into())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_register_blank_username_is_rejected() {
    let users = Arc::new(InMemoryRepository::new());
    let auth = authenticator(users.clone(), true);

    let result = auth
        .register("x@y.com".into(), "".into(), "Password123".into())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(users.count(&Filter::All).await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_malformed_email_is_rejected() {
    let users = Arc::new(InMemoryRepository::new());
    let auth = authenticator(users.clone(), true);

    let result = auth
        .register("not-an-email".into(), "bob".into(), "Password123".into())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(users.count(&Filter::All).await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_short_password_is_validation_error() {
    let auth = authenticator(Arc::new(InMemoryRepository::new()), true);

    let result = auth
        .register("carol@example.com".into(), "carol".into(), "short".into())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_login_handler_rejects_unknown_user() {
    let handler = LoginHandler::new(Arc::new(authenticator(store_with_alice(), true)));

    let result = handler
        .handle(LoginCommand {
            email: "nobody@x.com".into(),
            password: "anything".into(),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}
