use std::sync::Arc;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use fintrack_core::categories::{Category, CategoryInput, CategoryUpsert};

async fn get_categories(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.category_service.get_categories(&user_id)?))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<(StatusCode, Json<CategoryUpsert>)> {
    let upsert = state
        .category_service
        .create_category(&user_id, input)
        .await?;
    let status = if upsert.overwritten {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(upsert)))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}
