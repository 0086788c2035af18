use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::{
    author,
    suitable_ad::{self, ActiveModel, Column, Entity as SuitableAd, Model},
};

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    SuitableAd::find_by_id(id).one(conn).await
}

pub async fn find_by_author<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
) -> Result<Vec<Model>, DbErr> {
    SuitableAd::find()
        .filter(Column::AuthorId.eq(author_id))
        .order_by_asc(Column::Id)
        .all(conn)
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
    let result = SuitableAd::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Authors holding a subscription that matches an announcement filed under
/// `category` with body `text` and price `cost`. Each author appears once even
/// when several of their subscriptions match.
pub async fn find_subscribers<C: ConnectionTrait>(
    conn: &C,
    category: &str,
    text: &str,
    cost: f64,
) -> Result<Vec<author::Model>, DbErr> {
    author::Entity::find()
        .join(JoinType::InnerJoin, author::Relation::SuitableAd.def())
        .filter(suitable_ad::Column::Category.eq(category))
        .filter(suitable_ad::Column::Title.eq(text))
        .filter(suitable_ad::Column::PriceFrom.lte(cost))
        .filter(suitable_ad::Column::PriceTo.gte(cost))
        .distinct()
        .order_by_asc(author::Column::Id)
        .all(conn)
        .await
}
