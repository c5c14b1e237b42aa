//! Uptime handler

use axum::{extract::State, Json};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::communication::dispatcher::DispatchService,
    infrastructure::http::state::AppState,
};

/// How long the server has been accepting submissions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UptimeResponse {
    /// Whole seconds since the server started
    #[schema(example = 123)]
    pub uptime: i64,

    /// When the server started, RFC 3339
    #[schema(example = "2024-03-05T09:30:00Z")]
    pub started_at: String,
}

impl UptimeResponse {
    fn since(start_time: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        Self {
            uptime: (*now - *start_time).num_seconds().max(0),
            started_at: start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Get the uptime of the server
#[utoipa::path(
    get,
    operation_id = "uptime",
    tag = "System",
    path = "/api/v1/uptime",
    responses(
        (status = StatusCode::OK, description = "Uptime response", body = UptimeResponse),
    )
)]
pub async fn handler<D: DispatchService>(
    State(state): State<AppState<D>>,
) -> Json<UptimeResponse> {
    Json(UptimeResponse::since(&state.start_time, &Utc::now()))
}
