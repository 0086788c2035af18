use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi};

use super::{ApiTags, SaveResponse, WriteResponse};
use crate::dto::{HeadingDto, SavedId};
use crate::error::AppError;
use crate::security::BearerAuth;
use crate::state::AppState;

#[derive(ApiResponse)]
enum FindResponse {
    #[oai(status = 302)]
    Found(Json<HeadingDto>),
}

#[derive(ApiResponse)]
enum ListResponse {
    #[oai(status = 302)]
    Found(Json<Vec<HeadingDto>>),
    #[oai(status = 204)]
    NoContent,
}

pub struct HeadingApi {
    state: Arc<AppState>,
}

impl HeadingApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::Heading")]
impl HeadingApi {
    #[oai(path = "/heading/headings", method = "post")]
    async fn save(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<HeadingDto>,
    ) -> poem::Result<SaveResponse> {
        let id = self.state.headings.save(dto).await?;
        Ok(SaveResponse::Ok(Json(SavedId { id })))
    }

    #[oai(path = "/heading/headings", method = "put")]
    async fn update(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<HeadingDto>,
    ) -> poem::Result<WriteResponse> {
        self.state.headings.update(dto).await?;
        Ok(WriteResponse::Ok)
    }

    #[oai(path = "/heading/headings", method = "get")]
    async fn list(&self, _auth: BearerAuth) -> poem::Result<ListResponse> {
        let found = self.state.headings.list().await?;
        if found.is_empty() {
            return Ok(ListResponse::NoContent);
        }
        Ok(ListResponse::Found(Json(found)))
    }

    #[oai(path = "/heading/headings/:id", method = "get")]
    async fn find(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<FindResponse> {
        let found = self.state.headings.find(id).await?;
        let dto = found.ok_or_else(|| AppError::not_found("Heading", id))?;
        Ok(FindResponse::Found(Json(dto)))
    }

    /// Delete a heading and every announcement under it
    #[oai(path = "/heading/headings/:id", method = "delete")]
    async fn delete(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<WriteResponse> {
        self.state.headings.delete(id).await?;
        Ok(WriteResponse::Ok)
    }
}
