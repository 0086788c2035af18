//! HTTP adapters. Handlers only translate between HTTP and the services;
//! errors become responses through `AppError`'s status mapping.

mod announcement;
mod auth;
mod author;
mod heading;
mod role;
mod suitable_ad;

use std::sync::Arc;

use poem::{
    middleware::{Cors, Tracing},
    Endpoint, EndpointExt, Response, Route,
};
use poem_openapi::{
    error::ParseRequestPayloadError, payload::Json, ApiResponse, OpenApiService, Tags,
};

use crate::dto::SavedId;
use crate::error::AppError;
use crate::security::AuthFilter;
use crate::state::AppState;

pub use announcement::AnnouncementApi;
pub use auth::AuthApi;
pub use author::AuthorApi;
pub use heading::HeadingApi;
pub use role::RoleApi;
pub use suitable_ad::SuitableAdApi;

#[derive(Tags)]
enum ApiTags {
    Announcement,
    Author,
    Heading,
    SuitableAd,
    Role,
    Auth,
}

#[derive(ApiResponse)]
pub enum SaveResponse {
    #[oai(status = 200)]
    Ok(Json<SavedId>),
}

#[derive(ApiResponse)]
pub enum WriteResponse {
    #[oai(status = 200)]
    Ok,
}

/// Builds the full application: API under `/api`, Swagger UI under `/docs`.
pub fn app(state: Arc<AppState>) -> impl Endpoint {
    let api = OpenApiService::new(
        (
            AnnouncementApi::new(state.clone()),
            AuthorApi::new(state.clone()),
            HeadingApi::new(state.clone()),
            SuitableAdApi::new(state.clone()),
            RoleApi::new(state.clone()),
            AuthApi::new(state.clone()),
        ),
        "Classifieds API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api.swagger_ui();

    Route::new()
        .nest("/api", api)
        .nest("/docs", ui)
        .catch_error(unparsable_payload)
        .with(AuthFilter::new(state.auth.clone()))
        .with(Cors::new())
        .with(Tracing)
}

/// A body that does not deserialize into the DTO, for example one missing a
/// required field, is a constraint violation like any other.
async fn unparsable_payload(err: ParseRequestPayloadError) -> Response {
    poem::Error::from(AppError::validation(err.reason)).into_response()
}
