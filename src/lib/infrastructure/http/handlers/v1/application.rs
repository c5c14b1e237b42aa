//! Job application handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    domain::{careers::JobApplication, communication::dispatcher::DispatchService},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Largest accepted application body: a 5 MB resume once base64 encoded,
/// plus the other fields
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Job application request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBody {
    /// The identifier of the position applied for
    #[schema(example = 42)]
    position_id: Option<i64>,

    /// The title of the position applied for
    #[schema(example = "Senior Rust Engineer")]
    position_title: Option<String>,

    /// The applicant's name
    #[schema(example = "Jane Doe")]
    name: Option<String>,

    /// The applicant's email address
    #[schema(example = "jane@example.com")]
    email: Option<String>,

    /// The applicant's phone number
    #[schema(example = "+44 20 7946 0000")]
    phone: Option<String>,

    /// The resume, base64 encoded, optionally as a data URL
    #[schema(example = "data:application/pdf;base64,JVBERi0xLjQ=")]
    resume_base64: Option<String>,

    /// The resume's original file name
    #[schema(example = "jane-doe-cv.pdf")]
    resume_file_name: Option<String>,

    /// An optional cover letter
    cover_letter: Option<String>,

    /// An optional LinkedIn profile URL
    #[schema(example = "https://www.linkedin.com/in/janedoe")]
    linkedin_url: Option<String>,

    /// Years of relevant experience
    #[schema(example = 5)]
    experience_years: Option<u32>,
}

impl TryFrom<ApplicationBody> for JobApplication {
    type Error = ApiError;

    fn try_from(body: ApplicationBody) -> Result<Self, Self::Error> {
        Ok(Self::new(
            body.position_title.as_deref(),
            body.name.as_deref(),
            body.email.as_deref(),
            body.phone.as_deref(),
            body.resume_base64.as_deref(),
            body.resume_file_name.as_deref(),
        )?
        .with_position_id(body.position_id)
        .with_cover_letter(body.cover_letter.as_deref())
        .with_linkedin_url(body.linkedin_url.as_deref())
        .with_experience_years(body.experience_years))
    }
}

/// Job application response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    success: bool,

    #[schema(example = "Application submitted successfully!")]
    message: String,
}

/// Send a job application, with the resume attached, to the site administrator
#[utoipa::path(
    post,
    operation_id = "send_application",
    tag = "Forms",
    path = "/api/v1/application",
    request_body = ApplicationBody,
    responses(
        (status = StatusCode::OK, description = "Application sent", body = ApplicationResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing required fields", body = ErrorResponse, example = json!({"error": "Missing required fields"})),
        (status = StatusCode::PAYLOAD_TOO_LARGE, description = "Resume too large", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Email could not be delivered", body = ErrorResponse),
    )
)]
pub async fn handler<D: DispatchService>(
    State(state): State<AppState<D>>,
    request: Result<Json<ApplicationBody>, JsonRejection>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let Json(request) = request?;

    let application: JobApplication = request.try_into()?;

    info!(
        position = application.position_title(),
        position_id = application.position_id(),
        name = application.name(),
        email = application.email(),
        experience_years = application.experience_years(),
        resume_format = application.resume().extension(),
        has_cover_letter = application.cover_letter().is_some(),
        "job application received"
    );

    let message = application.to_message(&state.config.admin_email, &Utc::now())?;
    let result = state.dispatcher.send(&message).await;

    if !result.success {
        let reason = result
            .error
            .unwrap_or_else(|| "Failed to send email".to_string());

        error!(error = %reason, "failed to send application email");

        return Err(ApiError::new_500(&reason));
    }

    info!(
        message_id = result.message_id.as_deref().unwrap_or_default(),
        "application email sent"
    );

    Ok(Json(ApplicationResponse {
        success: true,
        message: "Application submitted successfully!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::{TestResponse, TestServer};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::communication::dispatcher::{tests::MockDispatchService, SendResult},
        infrastructure::http::{
            errors::ErrorResponse,
            router,
            state::tests::{test_state, ADMIN_EMAIL},
        },
    };

    use super::*;

    fn valid_body() -> serde_json::Value {
        json!({
            "positionId": 42,
            "positionTitle": "Senior Rust Engineer",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+44 20 7946 0000",
            "resumeBase64": "data:application/pdf;base64,JVBERi0xLjQ=",
            "resumeFileName": "cv.pdf",
            "coverLetter": "I love Rust.\nHire me.",
            "linkedinUrl": "https://www.linkedin.com/in/janedoe",
            "experienceYears": 5
        })
    }

    fn sent() -> SendResult {
        SendResult {
            success: true,
            message_id: Some("<id@example.com>".to_string()),
            error: None,
        }
    }

    async fn post(
        state: AppState<MockDispatchService>,
        body: &serde_json::Value,
    ) -> TestResult<TestResponse> {
        Ok(TestServer::new(router(state))?
            .post("/api/v1/application")
            .json(body)
            .await)
    }

    #[tokio::test]
    async fn test_application_success() -> TestResult {
        let mut dispatcher = MockDispatchService::new();

        dispatcher
            .expect_send()
            .times(1)
            .withf(|message| {
                let attachment = &message.attachments()[0];

                message.to() == ADMIN_EMAIL
                    && message.from() == "jane@example.com"
                    && message.reply_to() == "jane@example.com"
                    && message.subject() == "New Job Application: Senior Rust Engineer - Jane Doe"
                    && message.html_body().contains("Position ID")
                    && message.html_body().contains("5 years")
                    && message.attachments().len() == 1
                    && attachment.filename == "Jane_Doe_resume.pdf"
                    && attachment.content == "JVBERi0xLjQ="
                    && attachment.content_type == "application/pdf"
            })
            .returning(|_| sent());

        let response = post(test_state(Some(dispatcher)), &valid_body()).await?;

        assert_eq!(response.status_code(), StatusCode::OK);

        let json = response.json::<ApplicationResponse>();

        assert!(json.success);
        assert_eq!(json.message, "Application submitted successfully!");

        Ok(())
    }

    #[tokio::test]
    async fn test_application_with_docx_resume() -> TestResult {
        let mut dispatcher = MockDispatchService::new();

        dispatcher
            .expect_send()
            .times(1)
            .withf(|message| {
                let attachment = &message.attachments()[0];

                attachment.filename == "Jane_Doe_resume.docx"
                    && attachment.content_type
                        == "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            })
            .returning(|_| sent());

        let mut body = valid_body();
        body["resumeFileName"] = json!("Jane CV.DOCX");
        body["resumeBase64"] = json!("UEsDBBQ=");

        let response = post(test_state(Some(dispatcher)), &body).await?;

        assert_eq!(response.status_code(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_application_with_unknown_extension_is_sent_as_pdf() -> TestResult {
        let mut dispatcher = MockDispatchService::new();

        dispatcher
            .expect_send()
            .times(1)
            .withf(|message| {
                let attachment = &message.attachments()[0];

                attachment.filename == "Jane_Doe_resume.xyz"
                    && attachment.content_type == "application/pdf"
            })
            .returning(|_| sent());

        let mut body = valid_body();
        body["resumeFileName"] = json!("resume.xyz");

        let response = post(test_state(Some(dispatcher)), &body).await?;

        assert_eq!(response.status_code(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_application_with_only_required_fields() -> TestResult {
        let mut dispatcher = MockDispatchService::new();

        dispatcher
            .expect_send()
            .times(1)
            .withf(|message| {
                !message.html_body().contains("Position ID")
                    && !message.html_body().contains("Cover Letter")
                    && message.attachments()[0].filename == "Jane_Doe_resume.pdf"
            })
            .returning(|_| sent());

        let body = json!({
            "positionTitle": "Senior Rust Engineer",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+44 20 7946 0000",
            "resumeBase64": "JVBERi0xLjQ="
        });

        let response = post(test_state(Some(dispatcher)), &body).await?;

        assert_eq!(response.status_code(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_application_with_large_resume() -> TestResult {
        // a 4 MB resume, over axum's default 2 MB body limit
        let resume = "A".repeat(4 * 1024 * 1024);
        let expected_len = resume.len();

        let mut dispatcher = MockDispatchService::new();

        dispatcher
            .expect_send()
            .times(1)
            .withf(move |message| message.attachments()[0].content.len() == expected_len)
            .returning(|_| sent());

        let mut body = valid_body();
        body["resumeBase64"] = json!(resume);

        let response = post(test_state(Some(dispatcher)), &body).await?;

        assert_eq!(response.status_code(), StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_application_over_body_limit_is_rejected() -> TestResult {
        let mut body = valid_body();
        body["resumeBase64"] = json!("A".repeat(MAX_BODY_BYTES));

        // test_state without a dispatcher expects zero sends
        let response = post(test_state(None), &body).await?;

        assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        Ok(())
    }

    #[tokio::test]
    async fn test_application_missing_fields_never_dispatch() -> TestResult {
        for field in ["positionTitle", "name", "email", "phone", "resumeBase64"] {
            let mut body = valid_body();
            body[field] = json!(null);

            let response = post(test_state(None), &body).await?;

            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(
                response.json::<ErrorResponse>().error,
                "Missing required fields"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_application_with_malformed_email_fails_delivery() -> TestResult {
        let mut dispatcher = MockDispatchService::new();

        dispatcher.expect_send().times(1).returning(|message| SendResult {
            success: false,
            message_id: None,
            error: Some(format!("Invalid sender email: {}", message.from())),
        });

        let mut body = valid_body();
        body["email"] = json!("not-an-email");

        let response = post(test_state(Some(dispatcher)), &body).await?;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "Invalid sender email: not-an-email"
        );

        Ok(())
    }
}
