use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use finboard_core::analytics::{
    BalanceResponse, CategoryBreakdown, MonthlyTrend, SummaryResponse,
};
use finboard_core::constants::DEFAULT_TREND_MONTHS;
use finboard_core::transactions::TransactionType;
use serde::Deserialize;

use super::{DateRangeQuery, QueryParams};
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct ByCategoryQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
}

#[derive(Deserialize)]
struct TrendQuery {
    months: Option<u32>,
}

async fn get_summary(
    QueryParams(range): QueryParams<DateRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SummaryResponse>> {
    let summary = state
        .analytics_service
        .get_summary(range.start_date, range.end_date)?;
    Ok(Json(summary))
}

async fn get_by_category(
    QueryParams(query): QueryParams<ByCategoryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryBreakdown>>> {
    let breakdown = state.analytics_service.get_category_breakdown(
        query.start_date,
        query.end_date,
        query.transaction_type,
    )?;
    Ok(Json(breakdown))
}

async fn get_monthly_trend(
    QueryParams(query): QueryParams<TrendQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MonthlyTrend>>> {
    let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);
    let trend = state.analytics_service.get_monthly_trend(months)?;
    Ok(Json(trend))
}

async fn get_balance(
    QueryParams(range): QueryParams<DateRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .analytics_service
        .get_balance(range.start_date, range.end_date)?;
    Ok(Json(balance))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/summary", get(get_summary))
        .route("/analytics/by-category", get(get_by_category))
        .route("/analytics/monthly-trend", get(get_monthly_trend))
        .route("/analytics/balance", get(get_balance))
}
