use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi};

use super::{ApiTags, SaveResponse, WriteResponse};
use crate::dto::{AuthorDto, SavedId};
use crate::error::AppError;
use crate::security::BearerAuth;
use crate::state::AppState;

#[derive(ApiResponse)]
enum FindResponse {
    #[oai(status = 302)]
    Found(Json<AuthorDto>),
}

pub struct AuthorApi {
    state: Arc<AppState>,
}

impl AuthorApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::Author")]
impl AuthorApi {
    /// Register a new author (no token required)
    #[oai(path = "/author/authors", method = "post")]
    async fn save(&self, Json(dto): Json<AuthorDto>) -> poem::Result<SaveResponse> {
        let id = self.state.authors.save(dto).await?;
        Ok(SaveResponse::Ok(Json(SavedId { id })))
    }

    /// Replace an author, including contacts and roles
    #[oai(path = "/author/authors", method = "put")]
    async fn update(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<AuthorDto>,
    ) -> poem::Result<WriteResponse> {
        self.state.authors.update(dto).await?;
        Ok(WriteResponse::Ok)
    }

    #[oai(path = "/author/authors/:id", method = "get")]
    async fn find(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<FindResponse> {
        let found = self.state.authors.find(id).await?;
        let dto = found.ok_or_else(|| AppError::not_found("Author", id))?;
        Ok(FindResponse::Found(Json(dto)))
    }

    /// Delete an author with all announcements and subscriptions
    #[oai(path = "/author/authors/:id", method = "delete")]
    async fn delete(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<WriteResponse> {
        self.state.authors.delete(id).await?;
        Ok(WriteResponse::Ok)
    }
}
