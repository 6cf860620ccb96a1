use std::sync::Arc;

use super::gamification::reward;
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::gamification::Activity;
use fintrack_core::transactions::{Transaction, TransactionFilter, TransactionInput};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionQuery {
    category_id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = TransactionFilter::from_query(
        query.category_id,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;
    let transactions = state
        .transaction_service
        .get_transactions(&user_id, &filter)?;
    Ok(Json(transactions))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(&user_id, &id)?;
    Ok(Json(transaction))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<TransactionInput>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&user_id, input)
        .await?;
    reward(&state, &user_id, Activity::TransactionAdded).await;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<TransactionInput>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .update_transaction(&user_id, &id, input)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction(&user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
