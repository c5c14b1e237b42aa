//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Form Mailer"),
    paths(contact::handler, application::handler, uptime::handler),
    components(schemas(
        contact::ContactBody,
        contact::ContactData,
        contact::ContactResponse,
        application::ApplicationBody,
        application::ApplicationResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
