//! "Suitable ad" notifications.
//!
//! Saving an announcement only enqueues its id. A background worker picks the
//! id up, finds every author whose saved subscription matches and mails each
//! of their addresses. Delivery failures are logged per recipient and never
//! reach the request that created the announcement.

pub mod mailer;
pub mod template;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, LoaderTrait};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::entities::email;
use crate::error::{AppError, Result};
use crate::repository;

pub use mailer::{LogMailer, Mailer, MemoryMailer, OutgoingMail, SmtpMailer};

/// Sending half handed to the announcement service.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<i32>,
}

impl NotificationQueue {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<i32>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Never blocks; a full or closed queue drops the notification.
    pub fn enqueue(&self, announcement_id: i32) {
        if let Err(e) = self.tx.try_send(announcement_id) {
            warn!(announcement_id, error = %e, "notification dropped");
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    db: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>) -> Self {
        Self { db, mailer }
    }

    /// Mails every subscriber matching the announcement; returns how many
    /// messages were delivered.
    pub async fn notify(&self, announcement_id: i32) -> Result<usize> {
        let Some((announcement, heading)) =
            repository::announcement::find_with_heading(&self.db, announcement_id).await?
        else {
            return Err(AppError::not_found("Announcement", announcement_id));
        };
        let heading =
            heading.ok_or_else(|| AppError::not_found("Heading", announcement.heading_id))?;

        let subscribers = repository::suitable_ad::find_subscribers(
            &self.db,
            &heading.name,
            &announcement.text,
            announcement.cost,
        )
        .await?;
        if subscribers.is_empty() {
            debug!(announcement_id, "no matching subscriptions");
            return Ok(0);
        }

        let addresses = subscribers.load_many(email::Entity, &self.db).await?;

        let mut delivered = 0;
        for (subscriber, emails) in subscribers.iter().zip(addresses) {
            for address in emails {
                let mail = template::render(&address.email, subscriber, &announcement, &heading);
                match self.mailer.send(&mail).await {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!(
                        announcement_id,
                        author_id = subscriber.id,
                        to = %address.email,
                        error = %e,
                        "failed to send notification"
                    ),
                }
            }
        }

        info!(announcement_id, delivered, "suitable ad notifications sent");
        Ok(delivered)
    }

    /// Drains the queue until every sender is gone.
    pub fn spawn(self, mut rx: mpsc::Receiver<i32>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(announcement_id) = rx.recv().await {
                if let Err(e) = self.notify(announcement_id).await {
                    error!(announcement_id, error = %e, "notification run failed");
                }
            }
            debug!("notification queue closed");
        })
    }
}
