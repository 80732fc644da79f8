//! HTTP surface of the content service.
//!
//! `GET /resources/composite-templates?selfLink=&format=&disposition=` renders a stored
//! descriptor; `POST /resources/composite-templates` imports a template body and answers
//! with a `Location` header.

use crate::content::{CompositeContentService, ContentError};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const COMPOSITE_TEMPLATES_LINK: &str = "/resources/composite-templates";

type ServiceState = Arc<CompositeContentService>;

pub fn router(service: CompositeContentService) -> Router {
    Router::new()
        .route(
            COMPOSITE_TEMPLATES_LINK,
            get(render_template).post(import_template),
        )
        .with_state(Arc::new(service))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderQuery {
    pub self_link: Option<String>,
    pub format: Option<String>,
    pub disposition: Option<String>,
}

/// Error body: `{"message": ..., "errorCode": ...}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

pub struct ApiError(ContentError);

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        let body = ErrorBody {
            message: self.0.to_string(),
            error_code: self.0.error_code().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

async fn render_template(
    State(service): State<ServiceState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let rendered = service
        .render(
            query.self_link.as_deref(),
            query.format.as_deref(),
            query.disposition.as_deref(),
        )
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, rendered.content_disposition),
        ],
        rendered.body,
    )
        .into_response())
}

async fn import_template(
    State(service): State<ServiceState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let link = service.import(&body, content_type).await?;
    info!(%link, "Template imported");
    Ok((StatusCode::OK, [(header::LOCATION, link)]).into_response())
}
