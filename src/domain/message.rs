//! Chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identifiable;
use crate::config::MAX_MESSAGE_LENGTH;
use crate::errors::{AppError, AppResult};

/// A message posted by a user into a chat room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    /// Author; deleting the user deletes the message
    pub user_id: Uuid,
    /// Room; deleting the room deletes the message
    pub chat_room_id: Uuid,
}

impl Message {
    pub fn new(user_id: Uuid, chat_room_id: Uuid, content: impl Into<String>) -> AppResult<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AppError::validation("Message content is required"));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(AppError::validation(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            content,
            sent_at: Utc::now(),
            user_id,
            chat_room_id,
        })
    }
}

impl Identifiable for Message {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_bounds() {
        let (user, room) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(matches!(Message::new(user, room, ""), Err(AppError::Validation(_))));
        assert!(Message::new(user, room, "é".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(matches!(
            Message::new(user, room, "x".repeat(MAX_MESSAGE_LENGTH + 1)),
            Err(AppError::Validation(_))
        ));
    }
}
