use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use wishly_core::ScrapedProduct;
use wishly_scraper::ScraperError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    pub url: String,
}

pub(super) async fn scrape_url(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScrapeRequest>,
) -> Result<Json<ApiResponse<ScrapedProduct>>, ApiError> {
    if body.url.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "url must not be empty",
        ));
    }

    let product = state
        .scraper
        .extract(&body.url)
        .await
        .map_err(|e| map_scraper_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: product,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) fn map_scraper_error(request_id: String, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::InvalidUrl { url, reason } => {
            tracing::info!(url = %url, reason = %reason, "rejected scrape request");
            ApiError::new(request_id, "bad_request", format!("invalid URL: {reason}"))
        }
        ScraperError::FetchTimeout { url } => {
            tracing::warn!(url = %url, "product page fetch timed out");
            ApiError::new(
                request_id,
                "upstream_timeout",
                "the product page took too long to respond",
            )
        }
        ScraperError::Fetch { url, reason } => {
            tracing::warn!(url = %url, reason = %reason, "product page fetch failed");
            ApiError::new(
                request_id,
                "upstream_unreachable",
                format!("could not reach the product page: {reason}"),
            )
        }
        ScraperError::Http(e) => {
            tracing::error!(error = %e, "scraper client error");
            ApiError::new(request_id, "internal_error", "scraper client error")
        }
    }
}
