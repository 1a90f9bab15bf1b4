use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use finboard_core::constants::DEFAULT_PAGE_LIMIT;
use finboard_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionQuery, TransactionType,
    TransactionUpdate,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{JsonBody, PathParam, QueryParams};
use crate::{error::ApiResult, main_lib::AppState};

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Deserialize)]
struct ListQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    category_id: Option<i32>,
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

impl From<ListQuery> for TransactionQuery {
    fn from(q: ListQuery) -> Self {
        TransactionQuery {
            filter: TransactionFilter::between(q.start_date, q.end_date)
                .with_category(q.category_id)
                .with_type(q.transaction_type),
            skip: q.skip,
            limit: q.limit,
        }
    }
}

async fn list_transactions(
    QueryParams(query): QueryParams<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.get_transactions(query.into())?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    JsonBody(new_transaction): JsonBody<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn get_transaction(
    PathParam(transaction_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(transaction_id)?;
    Ok(Json(transaction))
}

async fn update_transaction(
    PathParam(transaction_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
    JsonBody(update): JsonBody<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .update_transaction(transaction_id, update)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    PathParam(transaction_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state
        .transaction_service
        .delete_transaction(transaction_id)
        .await?;
    Ok(Json(json!({
        "message": "Transaction deleted successfully",
        "detail": { "transaction_id": transaction_id },
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
