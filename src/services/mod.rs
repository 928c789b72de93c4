//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod login_handler;
mod token_issuer;

pub use auth_service::{AuthService, Authenticator};
pub use login_handler::{LoginCommand, LoginHandler, LoginResult};
pub use token_issuer::{Claims, TokenIssuer};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
