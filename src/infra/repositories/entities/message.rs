//! Message database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Message;
use crate::infra::repositories::Persisted;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub content: String,
    pub sent_at: DateTimeUtc,
    pub user_id: Uuid,
    pub chat_room_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::chat_room::Entity",
        from = "Column::ChatRoomId",
        to = "super::chat_room::Column::Id",
        on_delete = "Cascade"
    )]
    ChatRoom,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::chat_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Persisted for Message {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn from_model(model: Model) -> Self {
        Message {
            id: model.id,
            content: model.content,
            sent_at: model.sent_at,
            user_id: model.user_id,
            chat_room_id: model.chat_room_id,
        }
    }

    fn into_model(self) -> Model {
        Model {
            id: self.id,
            content: self.content,
            sent_at: self.sent_at,
            user_id: self.user_id,
            chat_room_id: self.chat_room_id,
        }
    }
}
