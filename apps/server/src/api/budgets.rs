use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use finboard_core::budgets::{Budget, BudgetStatus, NewBudget};

use super::{DateRangeQuery, JsonBody, PathParam, QueryParams};
use crate::{error::ApiResult, main_lib::AppState};

async fn set_budget(
    State(state): State<Arc<AppState>>,
    JsonBody(new_budget): JsonBody<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let budget = state.budget_service.set_budget(new_budget).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn get_budget_statuses(
    QueryParams(range): QueryParams<DateRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetStatus>>> {
    let statuses = state
        .budget_service
        .get_budget_statuses(range.start_date, range.end_date)?;
    Ok(Json(statuses))
}

async fn delete_budget(
    PathParam(budget_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budget_statuses).post(set_budget))
        .route("/budgets/", get(get_budget_statuses).post(set_budget))
        .route("/budgets/{id}", delete(delete_budget))
}
