use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{
    address,
    author::{ActiveModel, Column, Entity as Author, Model},
    author_role, email, phone, role,
};
use crate::mapping::AuthorGraph;

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Author::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<Model>, DbErr> {
    Author::find().filter(Column::Name.eq(name)).one(conn).await
}

/// Loads the author with its contact records and roles.
pub async fn find_graph<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<AuthorGraph>, DbErr> {
    let Some(author) = find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let emails = author
        .find_related(email::Entity)
        .order_by_asc(email::Column::Id)
        .all(conn)
        .await?;
    let phones = author
        .find_related(phone::Entity)
        .order_by_asc(phone::Column::Id)
        .all(conn)
        .await?;
    let addresses = author
        .find_related(address::Entity)
        .order_by_asc(address::Column::Id)
        .all(conn)
        .await?;
    let roles = find_roles(conn, &author).await?;

    Ok(Some(AuthorGraph {
        author,
        emails,
        phones,
        addresses,
        roles,
    }))
}

pub async fn find_roles<C: ConnectionTrait>(
    conn: &C,
    author: &Model,
) -> Result<Vec<role::Model>, DbErr> {
    author
        .find_related(role::Entity)
        .order_by_asc(role::Column::Id)
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
    let result = Author::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Replaces the author's e-mails, phones and addresses with the given rows.
pub async fn replace_contacts<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
    emails: Vec<email::ActiveModel>,
    phones: Vec<phone::ActiveModel>,
    addresses: Vec<address::ActiveModel>,
) -> Result<(), DbErr> {
    email::Entity::delete_many()
        .filter(email::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;
    phone::Entity::delete_many()
        .filter(phone::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;
    address::Entity::delete_many()
        .filter(address::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;

    for model in emails {
        model.insert(conn).await?;
    }
    for model in phones {
        model.insert(conn).await?;
    }
    for model in addresses {
        model.insert(conn).await?;
    }
    Ok(())
}

/// Replaces the author's role links.
pub async fn replace_roles<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
    role_ids: &[i32],
) -> Result<(), DbErr> {
    author_role::Entity::delete_many()
        .filter(author_role::Column::AuthorId.eq(author_id))
        .exec(conn)
        .await?;

    for role_id in role_ids {
        author_role::ActiveModel {
            author_id: sea_orm::ActiveValue::Set(author_id),
            role_id: sea_orm::ActiveValue::Set(*role_id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}
