//! Data access. Every function takes any `ConnectionTrait`, so the same
//! query runs on the pool or inside a service transaction.

pub mod announcement;
pub mod author;
pub mod heading;
pub mod role;
pub mod suitable_ad;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Writes `model` over row `id` only if its version still equals `expected`.
/// Returns the number of rows touched; zero means a missing row or a stale version.
pub async fn update_versioned<E, A, C>(
    conn: &C,
    model: A,
    id_column: E::Column,
    version_column: E::Column,
    id: i32,
    expected: i32,
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E>,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .set(model)
        .filter(id_column.eq(id))
        .filter(version_column.eq(expected))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
