use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use finboard_storage_sqlite::db;

async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let pool = state.db_pool.clone();
    tokio::task::spawn_blocking(move || db::ping(&pool))
        .await
        .map_err(|e| ApiError::Internal(format!("Health check task failed: {e}")))?
        .map_err(|e| ApiError::ServiceUnavailable(format!("Database connection failed: {e}")))?;
    Ok(Json(json!({
        "status": "healthy",
        "database": "connected",
    })))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Finboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/auth/",
            "categories": "/categories/",
            "transactions": "/transactions/",
            "budgets": "/budgets/",
            "analytics": "/analytics/",
        },
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
