use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::entities::{
    announcement::{ActiveModel, Column, Entity as Announcement, Model},
    heading,
};

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Announcement::find_by_id(id).one(conn).await
}

/// The announcement together with the heading it is filed under.
pub async fn find_with_heading<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<(Model, Option<heading::Model>)>, DbErr> {
    Announcement::find_by_id(id)
        .find_also_related(heading::Entity)
        .one(conn)
        .await
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
    let result = Announcement::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn find_by_date<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
) -> Result<Vec<Model>, DbErr> {
    Announcement::find()
        .filter(Column::CreationDate.eq(date))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_text<C: ConnectionTrait>(conn: &C, text: &str) -> Result<Vec<Model>, DbErr> {
    Announcement::find()
        .filter(Column::Text.eq(text))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_headings<C: ConnectionTrait>(
    conn: &C,
    heading_ids: &[i32],
) -> Result<Vec<Model>, DbErr> {
    Announcement::find()
        .filter(Column::HeadingId.is_in(heading_ids.iter().copied()))
        .order_by_asc(Column::HeadingId)
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

/// `page` is zero-based here; the API layer converts from its one-based form.
pub async fn fetch_page<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    per_page: u64,
) -> Result<Vec<Model>, DbErr> {
    Announcement::find()
        .order_by_asc(Column::Id)
        .paginate(conn, per_page)
        .fetch_page(page)
        .await
}

pub async fn delete_inactive<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    let result = Announcement::delete_many()
        .filter(Column::Active.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
