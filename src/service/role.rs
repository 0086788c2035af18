use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::dto::RoleDto;
use crate::error::{AppError, Result};
use crate::repository::role as repo;

#[derive(Clone)]
pub struct RoleService {
    db: DatabaseConnection,
}

impl RoleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn save(&self, dto: RoleDto) -> Result<i32> {
        let txn = self.db.begin().await?;
        if !repo::find_by_names(&txn, &[dto.name]).await?.is_empty() {
            return Err(AppError::duplicate(format!("Role {:?} already exists", dto.name)));
        }
        let saved = repo::insert(&txn, dto.to_active_model(0)).await?;
        txn.commit().await?;

        info!(id = saved.id, name = ?saved.name, "role saved");
        Ok(saved.id)
    }

    pub async fn find(&self, id: i32) -> Result<Option<RoleDto>> {
        Ok(repo::find_by_id(&self.db, id).await?.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<RoleDto>> {
        let found = repo::find_all(&self.db).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, dto: RoleDto) -> Result<()> {
        let id = super::require_id(dto.id)?;

        let txn = self.db.begin().await?;
        let current = repo::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Role", id))?;
        let expected = dto.version.unwrap_or(current.version);
        let next = super::next_version(expected, "Role", id)?;
        let rows = repo::update(&txn, id, expected, dto.to_active_model(next)).await?;
        super::check_updated(rows, "Role", id)?;
        txn.commit().await?;

        info!(id, version = next, "role updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let rows = repo::delete_by_id(&txn, id).await?;
        if rows == 0 {
            return Err(AppError::not_found("Role", id));
        }
        txn.commit().await?;

        info!(id, "role deleted");
        Ok(())
    }
}
