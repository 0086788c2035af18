//! Daily removal of inactive announcements.
//!
//! Runs inside a single instance; several instances would each run it.

use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::service::AnnouncementService;

pub struct CleanupJob {
    announcements: AnnouncementService,
    schedule: Schedule,
}

impl CleanupJob {
    /// `expression` uses the six-field cron form, seconds first.
    pub fn new(announcements: AnnouncementService, expression: &str) -> Result<Self> {
        let schedule = Schedule::from_str(expression)
            .map_err(|e| AppError::config(format!("invalid CLEANUP_CRON {expression:?}: {e}")))?;
        Ok(Self {
            announcements,
            schedule,
        })
    }

    pub fn next_run_after<Z: TimeZone>(&self, after: &DateTime<Z>) -> Option<DateTime<Z>> {
        self.schedule.after(after).next()
    }

    pub async fn run_once(&self) -> Result<u64> {
        let removed = self.announcements.delete_inactive().await?;
        info!(removed, "inactive announcements deleted");
        Ok(removed)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let now = Local::now();
                let Some(next) = self.next_run_after(&now) else {
                    warn!("cleanup schedule has no further runs");
                    return;
                };
                let wait = (next - now).to_std().unwrap_or_default();
                info!(next = %next, "next inactive announcement cleanup scheduled");
                sleep(wait).await;

                if let Err(e) = self.run_once().await {
                    error!(error = %e, "inactive announcement cleanup failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use crate::migration::Migrator;
    use crate::notification::NotificationQueue;

    async fn service() -> AnnouncementService {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let (queue, _rx) = NotificationQueue::channel(1);
        AnnouncementService::new(db, queue)
    }

    #[tokio::test]
    async fn daily_midnight_fires_next_day() {
        let job = CleanupJob::new(service().await, "0 0 0 * * *").unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 1, 13, 30, 0).unwrap();

        let next = job.next_run_after(&after).unwrap();

        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn rejects_malformed_expression() {
        let err = CleanupJob::new(service().await, "every day").err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn run_on_empty_table_removes_nothing() {
        let job = CleanupJob::new(service().await, "0 0 0 * * *").unwrap();
        assert_eq!(job.run_once().await.unwrap(), 0);
    }
}
