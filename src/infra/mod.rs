//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories (generic contract plus storage adapters)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{Filter, FilterValue, InMemoryRepository, Repository, SeaRepository};
