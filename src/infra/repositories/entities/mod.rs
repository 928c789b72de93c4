//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod chat_room;
pub mod message;
pub mod user;
