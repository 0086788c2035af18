use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi};

use super::{ApiTags, SaveResponse, WriteResponse};
use crate::dto::{SavedId, SuitableAdDto};
use crate::error::AppError;
use crate::security::BearerAuth;
use crate::state::AppState;

#[derive(ApiResponse)]
enum FindResponse {
    #[oai(status = 302)]
    Found(Json<SuitableAdDto>),
}

#[derive(ApiResponse)]
enum ListResponse {
    #[oai(status = 302)]
    Found(Json<Vec<SuitableAdDto>>),
    #[oai(status = 204)]
    NoContent,
}

pub struct SuitableAdApi {
    state: Arc<AppState>,
}

impl SuitableAdApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::SuitableAd")]
impl SuitableAdApi {
    /// Subscribe the authenticated author to matching announcements
    #[oai(path = "/suitableAd/suitable-ads", method = "post")]
    async fn save(
        &self,
        auth: BearerAuth,
        Json(dto): Json<SuitableAdDto>,
    ) -> poem::Result<SaveResponse> {
        let id = self.state.suitable_ads.save(dto, auth.0.author_id).await?;
        Ok(SaveResponse::Ok(Json(SavedId { id })))
    }

    #[oai(path = "/suitableAd/suitable-ads", method = "put")]
    async fn update(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<SuitableAdDto>,
    ) -> poem::Result<WriteResponse> {
        self.state.suitable_ads.update(dto).await?;
        Ok(WriteResponse::Ok)
    }

    #[oai(path = "/suitableAd/suitable-ads/:id", method = "get")]
    async fn find(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<FindResponse> {
        let found = self.state.suitable_ads.find(id).await?;
        let dto = found.ok_or_else(|| AppError::not_found("SuitableAd", id))?;
        Ok(FindResponse::Found(Json(dto)))
    }

    #[oai(path = "/suitableAd/suitable-ads/:id", method = "delete")]
    async fn delete(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<WriteResponse> {
        self.state.suitable_ads.delete(id).await?;
        Ok(WriteResponse::Ok)
    }

    /// Subscriptions held by one author
    #[oai(path = "/suitableAd/suitable-ads/author/:author_id", method = "get")]
    async fn by_author(
        &self,
        _auth: BearerAuth,
        Path(author_id): Path<i32>,
    ) -> poem::Result<ListResponse> {
        let found = self.state.suitable_ads.find_by_author(author_id).await?;
        if found.is_empty() {
            return Ok(ListResponse::NoContent);
        }
        Ok(ListResponse::Found(Json(found)))
    }
}
