//! Chat room entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identifiable;
use crate::config::MAX_CHAT_ROOM_NAME_LENGTH;
use crate::errors::{AppError, AppResult};

/// A named room messages are posted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    /// # Errors
    /// `Validation` when the name is blank or longer than
    /// `MAX_CHAT_ROOM_NAME_LENGTH` characters.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::validation("Chat room name is required"));
        }
        if name.chars().count() > MAX_CHAT_ROOM_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "Chat room name must be at most {} characters",
                MAX_CHAT_ROOM_NAME_LENGTH
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        })
    }
}

impl Identifiable for ChatRoom {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(matches!(ChatRoom::new(" "), Err(AppError::Validation(_))));
        assert!(ChatRoom::new("x".repeat(MAX_CHAT_ROOM_NAME_LENGTH)).is_ok());
        assert!(matches!(
            ChatRoom::new("x".repeat(MAX_CHAT_ROOM_NAME_LENGTH + 1)),
            Err(AppError::Validation(_))
        ));
    }
}
