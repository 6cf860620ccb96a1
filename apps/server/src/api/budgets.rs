use std::sync::Arc;

use super::gamification::reward;
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::budgets::{Budget, BudgetInput, BudgetUpsert};
use fintrack_core::gamification::Activity;

async fn get_budgets(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets(&user_id)?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(&user_id, &id)?;
    Ok(Json(budget))
}

/// 201 for a new budget, 200 when an identical window was overwritten.
async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<(StatusCode, Json<BudgetUpsert>)> {
    let upsert = state.budget_service.create_budget(&user_id, input).await?;
    let status = if upsert.overwritten {
        StatusCode::OK
    } else {
        reward(&state, &user_id, Activity::BudgetCreated).await;
        StatusCode::CREATED
    };
    Ok((status, Json(upsert)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .update_budget(&user_id, &id, input)
        .await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}
