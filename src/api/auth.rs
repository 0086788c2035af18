use std::sync::Arc;

use poem_openapi::{payload::Json, ApiResponse, OpenApi};

use super::ApiTags;
use crate::dto::{LoginRequest, TokenResponse};
use crate::state::AppState;

#[derive(ApiResponse)]
enum LoginResponse {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),
}

pub struct AuthApi {
    state: Arc<AppState>,
}

impl AuthApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[OpenApi(tag = "ApiTags::Auth")]
impl AuthApi {
    /// Exchange author credentials for a bearer token
    #[oai(path = "/auth/login", method = "post")]
    async fn login(&self, Json(req): Json<LoginRequest>) -> poem::Result<LoginResponse> {
        let token = self.state.auth.login(&req.username, &req.password).await?;
        Ok(LoginResponse::Ok(Json(token)))
    }
}
