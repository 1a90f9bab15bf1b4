use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use finboard_core::categories::{Category, NewCategory};

use super::{JsonBody, PathParam};
use crate::{error::ApiResult, main_lib::AppState};

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories()?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(new_category): JsonBody<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create_category(new_category).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    PathParam(category_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(category_id)?;
    Ok(Json(category))
}

async fn delete_category(
    PathParam(category_id): PathParam<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).delete(delete_category),
        )
}
