//! Chat room database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ChatRoom;
use crate::infra::repositories::Persisted;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Persisted for ChatRoom {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn from_model(model: Model) -> Self {
        ChatRoom {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }

    fn into_model(self) -> Model {
        Model {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}
