use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::dto::{self, SuitableAdDto};
use crate::error::{AppError, Result};
use crate::repository::suitable_ad as repo;

#[derive(Clone)]
pub struct SuitableAdService {
    db: DatabaseConnection,
}

impl SuitableAdService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a subscription owned by `author_id`.
    pub async fn save(&self, dto: SuitableAdDto, author_id: i32) -> Result<i32> {
        dto::validate(&dto)?;

        let txn = self.db.begin().await?;
        let saved = repo::insert(&txn, dto.to_active_model(author_id, 0)).await?;
        txn.commit().await?;

        info!(id = saved.id, author_id, category = %saved.category, "suitable ad saved");
        Ok(saved.id)
    }

    pub async fn find(&self, id: i32) -> Result<Option<SuitableAdDto>> {
        Ok(repo::find_by_id(&self.db, id).await?.map(Into::into))
    }

    pub async fn find_by_author(&self, author_id: i32) -> Result<Vec<SuitableAdDto>> {
        let found = repo::find_by_author(&self.db, author_id).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }

    /// Whole-object replace; the owner is kept.
    pub async fn update(&self, dto: SuitableAdDto) -> Result<()> {
        let id = super::require_id(dto.id)?;
        dto::validate(&dto)?;

        let txn = self.db.begin().await?;
        let current = repo::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("SuitableAd", id))?;
        let expected = dto.version.unwrap_or(current.version);
        let next = super::next_version(expected, "SuitableAd", id)?;
        let model = dto.to_active_model(current.author_id, next);
        let rows = repo::update(&txn, id, expected, model).await?;
        super::check_updated(rows, "SuitableAd", id)?;
        txn.commit().await?;

        info!(id, version = next, "suitable ad updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let rows = repo::delete_by_id(&txn, id).await?;
        if rows == 0 {
            return Err(AppError::not_found("SuitableAd", id));
        }
        txn.commit().await?;

        info!(id, "suitable ad deleted");
        Ok(())
    }
}
