//! Contact form handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    domain::{communication::dispatcher::DispatchService, contact::ContactSubmission},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Contact form request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactBody {
    /// The sender's name
    #[schema(example = "Jane Doe")]
    name: Option<String>,

    /// The sender's email address
    #[schema(example = "jane@example.com")]
    email: Option<String>,

    /// The sender's company
    #[schema(example = "Acme Ltd")]
    company: Option<String>,

    /// The subject of the inquiry
    #[schema(example = "Website redesign")]
    subject: Option<String>,

    /// The message
    #[schema(example = "We would like a quote for a new website.")]
    message: Option<String>,
}

impl TryFrom<ContactBody> for ContactSubmission {
    type Error = ApiError;

    fn try_from(body: ContactBody) -> Result<Self, Self::Error> {
        Ok(Self::new(
            body.name.as_deref(),
            body.email.as_deref(),
            body.company.as_deref(),
            body.subject.as_deref(),
            body.message.as_deref(),
        )?)
    }
}

/// Echo of the accepted submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactData {
    #[schema(example = "Jane Doe")]
    name: String,

    #[schema(example = "jane@example.com")]
    email: String,

    #[schema(example = "Acme Ltd")]
    company: Option<String>,

    #[schema(example = "Website redesign")]
    subject: String,

    /// When the submission was accepted, RFC 3339
    #[schema(example = "2024-03-05T09:30:00.000Z")]
    timestamp: String,
}

/// Contact form response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    success: bool,

    #[schema(example = "Message received successfully! We'll get back to you soon.")]
    message: String,

    data: ContactData,
}

/// Send a contact form submission to the site administrator
#[utoipa::path(
    post,
    operation_id = "send_contact",
    tag = "Forms",
    path = "/api/v1/contact",
    request_body = ContactBody,
    responses(
        (status = StatusCode::OK, description = "Message sent", body = ContactResponse),
        (status = StatusCode::BAD_REQUEST, description = "Invalid submission", body = ErrorResponse, example = json!({"error": "Message must be at least 10 characters"})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Email could not be delivered", body = ErrorResponse),
    )
)]
pub async fn handler<D: DispatchService>(
    State(state): State<AppState<D>>,
    request: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(request) = request?;

    let submission: ContactSubmission = request.try_into()?;
    let submitted_at = Utc::now();

    info!(
        name = submission.name(),
        email = %submission.email(),
        company = submission.company().unwrap_or("N/A"),
        subject = submission.subject(),
        message_length = submission.message().chars().count(),
        "contact form submission received"
    );

    let message = submission.to_message(&state.config.admin_email, &submitted_at)?;
    let result = state.dispatcher.send(&message).await;

    if !result.success {
        let reason = result
            .error
            .unwrap_or_else(|| "Failed to send email".to_string());

        error!(error = %reason, "failed to send contact email");

        return Err(ApiError::new_500(&reason));
    }

    info!(
        message_id = result.message_id.as_deref().unwrap_or_default(),
        "contact email sent"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: "Message received successfully! We'll get back to you soon.".to_string(),
        data: ContactData {
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            company: submission.company().map(str::to_string),
            subject: submission.subject().to_string(),
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    }))
}
