use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi};

use super::{ApiTags, SaveResponse, WriteResponse};
use crate::dto::{RoleDto, SavedId};
use crate::error::AppError;
use crate::security::BearerAuth;
use crate::state::AppState;

#[derive(ApiResponse)]
enum FindResponse {
    #[oai(status = 302)]
    Found(Json<RoleDto>),
}

#[derive(ApiResponse)]
enum ListResponse {
    #[oai(status = 302)]
    Found(Json<Vec<RoleDto>>),
    #[oai(status = 204)]
    NoContent,
}

pub struct RoleApi {
    state: Arc<AppState>,
}

impl RoleApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::Role")]
impl RoleApi {
    #[oai(path = "/role/roles", method = "post")]
    async fn save(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<RoleDto>,
    ) -> poem::Result<SaveResponse> {
        let id = self.state.roles.save(dto).await?;
        Ok(SaveResponse::Ok(Json(SavedId { id })))
    }

    #[oai(path = "/role/roles", method = "put")]
    async fn update(
        &self,
        _auth: BearerAuth,
        Json(dto): Json<RoleDto>,
    ) -> poem::Result<WriteResponse> {
        self.state.roles.update(dto).await?;
        Ok(WriteResponse::Ok)
    }

    #[oai(path = "/role/roles", method = "get")]
    async fn list(&self, _auth: BearerAuth) -> poem::Result<ListResponse> {
        let found = self.state.roles.list().await?;
        if found.is_empty() {
            return Ok(ListResponse::NoContent);
        }
        Ok(ListResponse::Found(Json(found)))
    }

    #[oai(path = "/role/roles/:id", method = "get")]
    async fn find(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<FindResponse> {
        let found = self.state.roles.find(id).await?;
        let dto = found.ok_or_else(|| AppError::not_found("Role", id))?;
        Ok(FindResponse::Found(Json(dto)))
    }

    #[oai(path = "/role/roles/:id", method = "delete")]
    async fn delete(&self, _auth: BearerAuth, Path(id): Path<i32>) -> poem::Result<WriteResponse> {
        self.state.roles.delete(id).await?;
        Ok(WriteResponse::Ok)
    }
}
