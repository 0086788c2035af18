use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::heading::{ActiveModel, Column, Entity as Heading, Model};

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Heading::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<Model>, DbErr> {
    Heading::find().filter(Column::Name.eq(name)).one(conn).await
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Heading::find().order_by_asc(Column::Id).all(conn).await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    expected_version: i32,
    model: ActiveModel,
) -> Result<u64, DbErr> {
    super::update_versioned(conn, model, Column::Id, Column::Version, id, expected_version).await
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let result = Heading::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
