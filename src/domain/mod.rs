//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod chat_room;
pub mod message;
pub mod password;
pub mod user;

use uuid::Uuid;

pub use chat_room::ChatRoom;
pub use message::Message;
pub use password::Password;
pub use user::{User, UserResponse};

/// An entity addressable by a UUID primary key.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}
