use sea_orm::DatabaseConnection;

use crate::notification::NotificationQueue;
use crate::security::TokenProvider;
use crate::service::{
    AnnouncementService, AuthService, AuthorService, HeadingService, RoleService,
    SuitableAdService,
};

/// Every service the HTTP layer talks to, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub announcements: AnnouncementService,
    pub authors: AuthorService,
    pub headings: HeadingService,
    pub suitable_ads: SuitableAdService,
    pub roles: RoleService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenProvider,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            announcements: AnnouncementService::new(db.clone(), notifications),
            authors: AuthorService::new(db.clone()),
            headings: HeadingService::new(db.clone()),
            suitable_ads: SuitableAdService::new(db.clone()),
            roles: RoleService::new(db.clone()),
            auth: AuthService::new(db, tokens),
        }
    }
}
