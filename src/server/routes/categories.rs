use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::categories::{get_all_categories, get_category};
use crate::db::questions::get_questions_for_category;
use crate::db::Category;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

use super::{category_map, QuestionListResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

/// Questions belonging to one category. A category with no questions and an
/// unknown category id are indistinguishable; both are a 404.
async fn category_questions(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<QuestionListResponse> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories: Vec<Category> = get_category(&pool, id).await?.into_iter().collect();
    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: questions.len() as i64,
        questions,
        current_category: categories.iter().map(|c| c.id).collect(),
        categories: category_map(&categories),
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/api/categories/", get(list_categories))
        .route("/api/categories/{id}/questions/", get(category_questions))
        .with_state(state)
}
