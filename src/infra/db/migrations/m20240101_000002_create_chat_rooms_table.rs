//! Migration: Create the chat_rooms table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatRooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatRooms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ChatRooms::Name).string_len(150).not_null())
                    .col(
                        ColumnDef::new(ChatRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatRooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChatRooms {
    Table,
    Id,
    Name,
    CreatedAt,
}
