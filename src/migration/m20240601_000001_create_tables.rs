//! Creates the whole schema from the entity definitions and seeds the
//! three built-in roles.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entities::{
    address, announcement, author, author_role, email, heading, phone, role, suitable_ad,
    RoleName,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children so foreign keys resolve.
        create(manager, &schema, role::Entity).await?;
        create(manager, &schema, author::Entity).await?;
        create(manager, &schema, heading::Entity).await?;
        create(manager, &schema, author_role::Entity).await?;
        create(manager, &schema, email::Entity).await?;
        create(manager, &schema, phone::Entity).await?;
        create(manager, &schema, address::Entity).await?;
        create(manager, &schema, announcement::Entity).await?;
        create(manager, &schema, suitable_ad::Entity).await?;

        for mut index in schema.create_index_from_entity(announcement::Entity) {
            manager.create_index(index.if_not_exists().to_owned()).await?;
        }

        let db = manager.get_connection();
        for name in [RoleName::User, RoleName::Admin, RoleName::Moderator] {
            role::ActiveModel {
                name: Set(name),
                version: Set(0),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table(manager, suitable_ad::Entity).await?;
        drop_table(manager, announcement::Entity).await?;
        drop_table(manager, address::Entity).await?;
        drop_table(manager, phone::Entity).await?;
        drop_table(manager, email::Entity).await?;
        drop_table(manager, author_role::Entity).await?;
        drop_table(manager, heading::Entity).await?;
        drop_table(manager, author::Entity).await?;
        drop_table(manager, role::Entity).await
    }
}

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

async fn drop_table<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}
