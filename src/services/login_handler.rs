//! Login use case: credentials in, envelope with a bearer token out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AuthService;
use crate::config::LOGIN_SUCCESS_MESSAGE;
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

/// Login input. Not validated: empty strings simply fail to match.
#[derive(Clone, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    /// Username at issuance time
    pub user_name: String,
}

#[derive(Clone)]
pub struct LoginHandler {
    auth: Arc<dyn AuthService>,
}

impl LoginHandler {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    /// Validate credentials and issue a token.
    ///
    /// # Errors
    /// `InvalidCredentials` when no user matches; no token is issued then.
    pub async fn handle(&self, command: LoginCommand) -> AppResult<ApiResponse<LoginResult>> {
        let Some(user) = self
            .auth
            .validate_user(&command.email, &command.password)
            .await?
        else {
            warn!(email = %command.email, "Login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let token = self.auth.issue_token(&user)?;

        Ok(ApiResponse::with_message(
            LoginResult {
                token,
                user_name: user.username,
            },
            LOGIN_SUCCESS_MESSAGE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::services::MockAuthService;

    fn command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_absent_user_is_rejected_without_token() {
        let mut auth = MockAuthService::new();
        auth.expect_validate_user().returning(|_, _| Ok(None));
        auth.expect_issue_token().never();

        let handler = LoginHandler::new(Arc::new(auth));
        let result = handler.handle(command("nobody@x.com", "anything")).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_success_wraps_token_and_username() {
        let mut auth = MockAuthService::new();
        auth.expect_validate_user()
            .withf(|email, password| email == "alice@example.com" && password == "Secret123!")
            .returning(|email, _| {
                Ok(Some(User::new("alice".into(), email.to_string(), "hash".into())))
            });
        auth.expect_issue_token()
            .times(1)
            .returning(|_| Ok("signed.jwt.token".to_string()));

        let handler = LoginHandler::new(Arc::new(auth));
        let response = handler
            .handle(command("alice@example.com", "Secret123!"))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some(LOGIN_SUCCESS_MESSAGE));
        assert_eq!(
            response.data,
            Some(LoginResult {
                token: "signed.jwt.token".into(),
                user_name: "alice".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut auth = MockAuthService::new();
        auth.expect_validate_user().returning(|_, _| {
            Err(AppError::StoreUnavailable(sea_orm::DbErr::Custom("down".into())))
        });

        let handler = LoginHandler::new(Arc::new(auth));
        let result = handler.handle(command("alice@example.com", "x")).await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }

    #[test]
    fn test_command_debug_redacts_password() {
        let rendered = format!("{:?}", command("a@b.c", "hunter22"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_result_wire_names() {
        let json = serde_json::to_value(LoginResult {
            token: "t".into(),
            user_name: "Admin".into(),
        })
        .unwrap();

        assert_eq!(json["userName"], "Admin");
        assert_eq!(json["token"], "t");
    }
}
