//! Interactive API reference, rendered by Stoplight Elements from the
//! OpenAPI document

use axum::response::Html;
use utoipa::OpenApi;

use crate::infrastructure::http::open_api::ApiDocs;

/// Serves the API reference page
pub async fn handler() -> Html<String> {
    let title = ApiDocs::openapi().info.title;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title} API</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
</head>
<body>
    <elements-api apiDescriptionUrl="/api/v1/openapi.json" router="hash" layout="sidebar" />
</body>
</html>
"#
    ))
}
