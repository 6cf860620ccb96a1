use std::sync::Arc;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Extension, Json, Router};
use fintrack_core::gamification::{Activity, GamificationSummary};

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<GamificationSummary>> {
    Ok(Json(state.gamification_service.get_summary(&user_id)?))
}

/// Credits points for `activity`. A failure is logged and never fails the request.
pub(crate) async fn reward(state: &AppState, user_id: &str, activity: Activity) {
    if let Err(e) = state
        .gamification_service
        .record_activity(user_id, activity)
        .await
    {
        tracing::warn!(
            "Failed to record {} for user {}: {}",
            activity.activity_type(),
            user_id,
            e
        );
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/gamification", get(get_summary))
}
