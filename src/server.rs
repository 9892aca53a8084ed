//! HTTP routing for the number-window service.

use aggregator::Aggregator;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{Error, WindowReport};
use serde_json::json;
use tracing::{error, info};

use crate::stats::{self, AverageResponse, PricesInput, StatisticsResponse};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Maps the shared error enum onto an HTTP response.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidCategory(_) => (StatusCode::BAD_REQUEST, "invalid number id".to_string()),
            e if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            e => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/numbers/:numberid", get(numbers))
        .route("/average_stock_prices", post(average_stock_prices))
        .route("/statistics_stock_prices", post(statistics_stock_prices))
        .route("/health", get(health))
        .with_state(state)
}

async fn numbers(
    State(state): State<AppState>,
    Path(numberid): Path<String>,
) -> Result<Json<WindowReport>, ApiError> {
    let report = state.aggregator.handle(&numberid).await?;
    info!(
        "/numbers/{}: fetched={} window={} avg={:.2}",
        numberid,
        report.fetched_numbers.len(),
        report.current_window_state.len(),
        report.average
    );
    Ok(Json(report))
}

async fn average_stock_prices(
    Json(input): Json<PricesInput>,
) -> Result<Json<AverageResponse>, ApiError> {
    Ok(Json(stats::average_prices(input)?))
}

async fn statistics_stock_prices(
    Json(input): Json<PricesInput>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    Ok(Json(stats::price_statistics(input)?))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "windowSize": state.aggregator.store().capacity(),
    }))
}
