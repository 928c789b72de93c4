//! Chat Webapp API - authentication backend for the chat web app
//!
//! Exchanges credentials for a signed, time-limited bearer token and
//! exposes a generic repository contract over the user store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Authentication, token issuance, login use case
//! - **infra**: Database, migrations and repository adapters
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create an account
//! cargo run -- users add --email bob@example.com --username bob --password 'Secret123!'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
