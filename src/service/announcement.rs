use chrono::{Local, NaiveDate};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::dto::{self, AnnouncementDto};
use crate::error::{AppError, Result};
use crate::notification::NotificationQueue;
use crate::repository::announcement as repo;

const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone)]
pub struct AnnouncementService {
    db: DatabaseConnection,
    notifications: NotificationQueue,
}

impl AnnouncementService {
    pub fn new(db: DatabaseConnection, notifications: NotificationQueue) -> Self {
        Self { db, notifications }
    }

    /// Stores a new announcement owned by `author_id` and queues the
    /// suitable-ad notifications for it.
    pub async fn save(&self, dto: AnnouncementDto, author_id: i32) -> Result<i32> {
        dto::validate(&dto)?;

        let today = Local::now().date_naive();
        let txn = self.db.begin().await?;
        let saved = repo::insert(&txn, dto.to_active_model(author_id, today, 0)).await?;
        txn.commit().await?;

        info!(id = saved.id, author_id, heading_id = saved.heading_id, "announcement saved");
        self.notifications.enqueue(saved.id);
        Ok(saved.id)
    }

    pub async fn find(&self, id: i32) -> Result<Option<AnnouncementDto>> {
        Ok(repo::find_by_id(&self.db, id).await?.map(Into::into))
    }

    /// Whole-object replace. The owning author never changes.
    pub async fn update(&self, dto: AnnouncementDto) -> Result<()> {
        let id = super::require_id(dto.id)?;
        dto::validate(&dto)?;

        let txn = self.db.begin().await?;
        let current = repo::find_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement", id))?;
        let expected = dto.version.unwrap_or(current.version);
        let next = super::next_version(expected, "Announcement", id)?;
        let model = dto.to_update_model(&current, next);
        let rows = repo::update(&txn, id, expected, model).await?;
        super::check_updated(rows, "Announcement", id)?;
        txn.commit().await?;

        info!(id, version = next, "announcement updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let rows = repo::delete_by_id(&txn, id).await?;
        if rows == 0 {
            return Err(AppError::not_found("Announcement", id));
        }
        txn.commit().await?;

        info!(id, "announcement deleted");
        Ok(())
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AnnouncementDto>> {
        let found = repo::find_by_date(&self.db, date).await?;
        debug!(%date, count = found.len(), "announcements by date");
        Ok(found.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_text(&self, text: &str) -> Result<Vec<AnnouncementDto>> {
        let found = repo::find_by_text(&self.db, text).await?;
        debug!(count = found.len(), "announcements by text");
        Ok(found.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_headings(&self, heading_ids: &[i32]) -> Result<Vec<AnnouncementDto>> {
        if heading_ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = repo::find_by_headings(&self.db, heading_ids).await?;
        debug!(?heading_ids, count = found.len(), "announcements by headings");
        Ok(found.into_iter().map(Into::into).collect())
    }

    /// One-based `page`; `size` is clamped to `1..=100`.
    pub async fn find_page(&self, page: u64, size: u64) -> Result<Vec<AnnouncementDto>> {
        let page = page.max(1) - 1;
        let size = size.clamp(1, MAX_PAGE_SIZE);
        let found = repo::fetch_page(&self.db, page, size).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }

    /// Removes every announcement flagged inactive; used by the daily cleanup.
    pub async fn delete_inactive(&self) -> Result<u64> {
        let txn = self.db.begin().await?;
        let removed = repo::delete_inactive(&txn).await?;
        txn.commit().await?;
        Ok(removed)
    }
}
