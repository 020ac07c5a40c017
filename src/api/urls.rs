//! URL processing endpoint

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{UrlRequest, UrlResponse},
    AppState,
};

/// Canonicalize and/or redirect a URL
#[utoipa::path(
    post,
    path = "/urls/process",
    tag = "urls",
    request_body = UrlRequest,
    responses(
        (status = 200, description = "Processed URL", body = UrlResponse),
        (status = 400, description = "Invalid URL or unsupported operation", body = ErrorResponse)
    )
)]
pub async fn process_url(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<UrlRequest>, AppError>,
) -> AppResult<Json<UrlResponse>> {
    let processed_url = state
        .services
        .urls
        .process(&request.url, &request.operation)
        .map_err(|e| {
            tracing::warn!("failed to process url {}: {}", request.url, e);
            e
        })?;

    tracing::info!(operation = %request.operation, result = %processed_url, "processed url");
    Ok(Json(UrlResponse { processed_url }))
}
