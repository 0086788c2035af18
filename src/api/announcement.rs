use std::sync::Arc;

use chrono::NaiveDate;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    ApiResponse, OpenApi,
};

use super::{ApiTags, SaveResponse, WriteResponse};
use crate::dto::{AnnouncementDto, SavedId};
use crate::error::AppError;
use crate::security::BearerAuth;
use crate::state::AppState;

#[derive(ApiResponse)]
enum FindResponse {
    #[oai(status = 302)]
    Found(Json<AnnouncementDto>),
}

#[derive(ApiResponse)]
enum ListResponse {
    #[oai(status = 302)]
    Found(Json<Vec<AnnouncementDto>>),
    #[oai(status = 204)]
    NoContent,
}

impl From<Vec<AnnouncementDto>> for ListResponse {
    fn from(found: Vec<AnnouncementDto>) -> Self {
        if found.is_empty() {
            Self::NoContent
        } else {
            Self::Found(Json(found))
        }
    }
}

pub struct AnnouncementApi {
    state: Arc<AppState>,
}

impl AnnouncementApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::Announcement")]
impl AnnouncementApi {
    /// Post a new announcement as the authenticated author
    #[oai(path = "/announcement/announcements", method = "post")]
    async fn save(
        &self,
        auth: BearerAuth,
        Json(dto): Json<AnnouncementDto>,
    ) -> poem::Result<SaveResponse> {
        let id = self.state.announcements.save(dto, auth.0.author_id).await?;
        Ok(SaveResponse::Ok(Json(SavedId { id })))
    }

    /// Replace an announcement
    #[oai(path = "/announcement/announcements", method = "put")]
    async fn update(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<AnnouncementDto>,
    ) -> poem::Result<WriteResponse> {
        self.state.announcements.update(dto).await?;
        Ok(WriteResponse::Ok)
    }

    /// Page through announcements (one-based `page`)
    #[oai(path = "/announcement/announcements", method = "get")]
    async fn page(
        &self,
        _auth: BearerAuth,
        Query(page): Query<Option<u64>>,
        Query(size): Query<Option<u64>>,
    ) -> poem::Result<ListResponse> {
        let found = self
            .state
            .announcements
            .find_page(page.unwrap_or(1), size.unwrap_or(20))
            .await?;
        Ok(found.into())
    }

    #[oai(path = "/announcement/announcements/:id", method = "get")]
    async fn find(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<FindResponse> {
        let found = self.state.announcements.find(id).await?;
        let dto = found.ok_or_else(|| AppError::not_found("Announcement", id))?;
        Ok(FindResponse::Found(Json(dto)))
    }

    #[oai(path = "/announcement/announcements/:id", method = "delete")]
    async fn delete(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<WriteResponse> {
        self.state.announcements.delete(id).await?;
        Ok(WriteResponse::Ok)
    }

    /// Announcements created on exactly this date
    #[oai(path = "/announcement/announcements/date", method = "get")]
    async fn by_date(
        &self,
        _auth: BearerAuth,
        Query(date): Query<NaiveDate>,
    ) -> poem::Result<ListResponse> {
        Ok(self.state.announcements.find_by_date(date).await?.into())
    }

    /// Announcements whose text equals `text`
    #[oai(path = "/announcement/announcements/text", method = "get")]
    async fn by_text(
        &self,
        _auth: BearerAuth,
        Query(text): Query<String>,
    ) -> poem::Result<ListResponse> {
        Ok(self.state.announcements.find_by_text(&text).await?.into())
    }

    /// Announcements filed under any of the given headings
    #[oai(path = "/announcement/announcements/headings", method = "get")]
    async fn by_headings(
        &self,
        _auth: BearerAuth,
        Query(ids): Query<Vec<i32>>,
    ) -> poem::Result<ListResponse> {
        Ok(self.state.announcements.find_by_headings(&ids).await?.into())
    }
}
