use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::dto::{self, HeadingDto};
use crate::error::{AppError, Result};
use crate::repository::heading as repo;

#[derive(Clone)]
pub struct HeadingService {
    db: DatabaseConnection,
}

impl HeadingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn save(&self, dto: HeadingDto) -> Result<i32> {
        dto::validate(&dto)?;

        let txn = self.db.begin().await?;
        if repo::find_by_name(&txn, &dto.name).await?.is_some() {
            return Err(duplicate_name(&dto.name));
        }
        let saved = repo::insert(&txn, dto.to_active_model(0)).await?;
        txn.commit().await?;

        info!(id = saved.id, name = %saved.name, "heading saved");
        Ok(saved.id)
    }

    pub async fn find(&self, id: i32) -> Result<Option<HeadingDto>> {
        Ok(repo::find_by_id(&self.db, id).await?.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<HeadingDto>> {
        let found = repo::find_all(&self.db).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, dto: HeadingDto) -> Result<()> {
        let id = super::require_id(dto.id)?;
        dto::validate(&dto)?;

        let txn = self.db.begin().await?;
        let current = repo::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Heading", id))?;
        if let Some(other) = repo::find_by_name(&txn, &dto.name).await? {
            if other.id != id {
                return Err(duplicate_name(&dto.name));
            }
        }
        let expected = dto.version.unwrap_or(current.version);
        let next = super::next_version(expected, "Heading", id)?;
        let rows = repo::update(&txn, id, expected, dto.to_active_model(next)).await?;
        super::check_updated(rows, "Heading", id)?;
        txn.commit().await?;

        info!(id, version = next, "heading updated");
        Ok(())
    }

    /// Deletes the heading together with every announcement filed under it.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let rows = repo::delete_by_id(&txn, id).await?;
        if rows == 0 {
            return Err(AppError::not_found("Heading", id));
        }
        txn.commit().await?;

        info!(id, "heading deleted");
        Ok(())
    }
}

fn duplicate_name(name: &str) -> AppError {
    AppError::duplicate(format!("Heading with name {name} already exists"))
}
