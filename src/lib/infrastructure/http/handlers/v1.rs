//! Version 1 of the API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::communication::dispatcher::DispatchService,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod application;
pub mod contact;
pub mod stoplight;
pub mod uptime;

/// Routes served under `/api/v1`
pub fn router<D: DispatchService>() -> Router<AppState<D>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/contact", post(contact::handler))
        .route(
            "/application",
            post(application::handler).layer(DefaultBodyLimit::max(application::MAX_BODY_BYTES)),
        )
}
