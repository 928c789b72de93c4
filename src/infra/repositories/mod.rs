//! Repository layer - Data access abstraction
//!
//! A single generic `Repository` trait with one adapter per storage
//! technology: SeaORM for relational databases, and an in-memory store.

mod base;
pub mod entities;
mod filter;
mod memory;
mod sea_repository;

pub use base::Repository;
pub use filter::{Filter, FilterValue};
pub use memory::InMemoryRepository;
pub use sea_repository::{condition, ModelOf, Persisted, SeaRepository};
