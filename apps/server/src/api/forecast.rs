use std::sync::Arc;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::post, Extension, Json, Router};
use fintrack_core::forecast::{ForecastRequest, ForecastResponse};

async fn forecast_expenses(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<ForecastRequest>,
) -> ApiResult<Json<ForecastResponse>> {
    let response = state
        .forecast_service
        .forecast_expenses(&user_id, &request)?;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/forecast/expenses", post(forecast_expenses))
}
