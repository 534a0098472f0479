use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::debug;

use super::narrative::NarrativeGenerator;
use super::service::{AssessmentError, AssessmentRequest, HealthCheckService};
use super::tools::ToolCatalogSource;

/// Router builder exposing the health assessment endpoint.
pub fn health_router<C, N>(service: Arc<HealthCheckService<C, N>>) -> Router
where
    C: ToolCatalogSource + 'static,
    N: NarrativeGenerator + 'static,
{
    Router::new()
        .route("/api/v1/health/assessment", post(assessment_handler::<C, N>))
        .with_state(service)
}

pub(crate) async fn assessment_handler<C, N>(
    State(service): State<Arc<HealthCheckService<C, N>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    C: ToolCatalogSource + 'static,
    N: NarrativeGenerator + 'static,
{
    match service.assess(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(AssessmentError::Validation(error)) => {
            debug!(%error, "rejected assessment request");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
